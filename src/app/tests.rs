use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::*;
use crate::error::{GatewayError, GatewayErrorKind, GatewayResult};
use crate::event::{Outcome, TimerEvent};
use crate::gateway::{KnownSnapshot, Security};

fn app() -> App {
    App::new(Settings::default(), false)
}

fn press(app: &mut App, code: KeyCode) -> Vec<Effect> {
    app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

fn typed(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn profile(name: &str) -> ConnectionProfile {
    ConnectionProfile {
        name: name.into(),
        uuid: format!("uuid-{name}"),
        kind: "wifi".into(),
        device: None,
        ssid: Some(name.into()),
    }
}

fn ap(ssid: &str, signal: u8, security: Security) -> AccessPoint {
    AccessPoint::scanned(ssid, Some(format!("BSSID-{ssid}").as_str()), signal, security)
}

/// Feed a known-networks refresh and a scan through the event path
fn seed(app: &mut App, scanned: Vec<AccessPoint>, known: &[&str], active: Option<&str>) {
    let profiles: KnownProfiles = known
        .iter()
        .map(|name| (name.to_string(), profile(name)))
        .collect();
    let active = active.map(|name| ActiveConnection {
        profile: profile(name),
        device: Some("wlan0".into()),
    });
    app.handle_event(Event::Gateway(Outcome::Known(Ok(KnownSnapshot {
        profiles,
        active,
    }))));
    app.handle_event(Event::Gateway(Outcome::Scanned(Ok(scanned))));
}

fn focus(app: &mut App, ssid: &str) {
    app.list_cursor = app
        .entries
        .iter()
        .position(|e| e.ssid() == Some(ssid))
        .expect("entry present");
}

fn connect_op(effects: &[Effect]) -> OpId {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::Connect { op, .. } => Some(*op),
            _ => None,
        })
        .expect("connect effect")
}

fn clear_token(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::ClearStatusAfter { token, .. } => Some(*token),
            _ => None,
        })
        .expect("status clear effect")
}

fn connected(app: &mut App, op: OpId, ssid: &str, result: GatewayResult<()>) -> Vec<Effect> {
    app.handle_event(Event::Gateway(Outcome::Connected {
        op,
        ssid: ssid.into(),
        result,
    }))
}

#[test]
fn startup_queries_radio_profiles_and_scan() {
    let mut app = app();
    let effects = app.startup();
    assert_eq!(
        effects,
        vec![
            Effect::RadioStatus,
            Effect::RefreshKnown,
            Effect::Scan { rescan: true },
        ]
    );
    assert!(app.scanning);
}

#[test]
fn open_unknown_network_asks_before_connecting() {
    let mut app = app();
    seed(&mut app, vec![ap("Cafe", 70, Security::Open)], &[], None);

    assert!(press(&mut app, KeyCode::Enter).is_empty());
    assert_eq!(app.screen, Screen::ConfirmOpenNetworkConnect);

    let effects = press(&mut app, KeyCode::Char('y'));
    assert_eq!(app.screen, Screen::Connecting);
    let op = connect_op(&effects);
    assert!(effects.contains(&Effect::Connect {
        op,
        ssid: "Cafe".into(),
        password: None,
        hidden: false,
        recreate: false,
    }));
    assert!(effects.contains(&Effect::StartConnectTimer {
        op,
        after: Duration::from_secs(30),
    }));
    assert_eq!(app.pending_connect_target(), Some("Cafe"));
}

#[test]
fn declining_open_network_returns_to_list() {
    let mut app = app();
    seed(&mut app, vec![ap("Cafe", 70, Security::Open)], &[], None);
    press(&mut app, KeyCode::Enter);
    let effects = press(&mut app, KeyCode::Char('n'));
    assert!(effects.is_empty());
    assert_eq!(app.screen, Screen::NetworksList);
}

#[test]
fn secured_unknown_network_prompts_for_password() {
    let mut app = app();
    seed(&mut app, vec![ap("Office", 60, Security::WpaPsk)], &[], None);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen, Screen::PasswordInput);

    typed(&mut app, "hunter22");
    let effects = press(&mut app, KeyCode::Enter);
    let op = connect_op(&effects);
    assert!(effects.contains(&Effect::Connect {
        op,
        ssid: "Office".into(),
        password: Some(Secret::new("hunter22")),
        hidden: false,
        recreate: false,
    }));
    assert!(app.password.is_empty());
    assert_eq!(app.screen, Screen::Connecting);
}

#[test]
fn empty_password_is_not_submitted() {
    let mut app = app();
    seed(&mut app, vec![ap("Office", 60, Security::WpaPsk)], &[], None);
    press(&mut app, KeyCode::Enter);

    let effects = press(&mut app, KeyCode::Enter);
    assert!(effects.is_empty());
    assert_eq!(app.screen, Screen::PasswordInput);
    assert!(app.notice.is_some());
}

#[test]
fn rejected_stored_credentials_escalate_to_password_prompt() {
    let mut app = app();
    seed(&mut app, vec![ap("Home", 80, Security::WpaPsk)], &["Home"], None);

    let effects = press(&mut app, KeyCode::Enter);
    let op = connect_op(&effects);
    assert!(effects.contains(&Effect::Connect {
        op,
        ssid: "Home".into(),
        password: None,
        hidden: false,
        recreate: false,
    }));

    let err = GatewayError::new(GatewayErrorKind::SecretsRequired, "Secrets were required");
    let effects = connected(&mut app, op, "Home", Err(err));
    assert_eq!(app.screen, Screen::PasswordInput);
    assert!(app.notice.as_deref().is_some_and(|n| n.contains("Home")));
    assert!(effects.contains(&Effect::RefreshKnown));

    typed(&mut app, "newpass1");
    let effects = press(&mut app, KeyCode::Enter);
    let retry = connect_op(&effects);
    assert_ne!(retry, op);
    assert!(effects.contains(&Effect::Connect {
        op: retry,
        ssid: "Home".into(),
        password: Some(Secret::new("newpass1")),
        hidden: false,
        recreate: true,
    }));
}

#[test]
fn failure_after_explicit_password_shows_the_result_screen() {
    let mut app = app();
    seed(&mut app, vec![ap("Home", 80, Security::WpaPsk)], &["Home"], None);
    let op = connect_op(&press(&mut app, KeyCode::Enter));

    let err = GatewayError::new(GatewayErrorKind::SecretsRequired, "Secrets were required");
    connected(&mut app, op, "Home", Err(err));
    assert_eq!(app.screen, Screen::PasswordInput);

    typed(&mut app, "wrongpass");
    let retry = connect_op(&press(&mut app, KeyCode::Enter));
    let err = GatewayError::new(GatewayErrorKind::SecretsRequired, "Secrets were required");
    connected(&mut app, retry, "Home", Err(err));
    assert_eq!(app.screen, Screen::ConnectionResult);
    let report = app.report.clone().expect("report");
    assert!(!report.success);
    assert!(report.message.contains("Secrets"));

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen, Screen::NetworksList);
    assert!(app.report.is_none());
}

#[test]
fn unrelated_failure_on_known_network_keeps_the_stored_profile() {
    let mut app = app();
    seed(&mut app, vec![ap("Home", 80, Security::WpaPsk)], &["Home"], None);
    let op = connect_op(&press(&mut app, KeyCode::Enter));

    let err = GatewayError::classify(
        "nmcli command 'device wifi connect Home' failed: Error: No network with SSID 'Home' found.",
    );
    assert_eq!(err.kind, GatewayErrorKind::CommandFailed);
    let effects = connected(&mut app, op, "Home", Err(err));
    assert_eq!(app.screen, Screen::ConnectionResult);
    assert!(app.report.as_ref().is_some_and(|r| !r.success));
    assert!(!effects.iter().any(|e| matches!(e, Effect::Connect { .. })));

    // leaving the result never offers a recreate
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen, Screen::NetworksList);
}

#[test]
fn enterprise_network_is_not_offered_a_psk_retry() {
    let mut app = app();
    seed(&mut app, vec![ap("Corp", 70, Security::Enterprise)], &["Corp"], None);
    let op = connect_op(&press(&mut app, KeyCode::Enter));

    let err = GatewayError::new(GatewayErrorKind::SecretsRequired, "Secrets were required");
    connected(&mut app, op, "Corp", Err(err));
    assert_eq!(app.screen, Screen::ConnectionResult);
    assert!(app.report.as_ref().is_some_and(|r| r.message.contains("Secrets")));
}

#[test]
fn wep_network_is_not_offered_a_psk_retry() {
    let mut app = app();
    seed(&mut app, vec![ap("Legacy", 40, Security::Wep)], &["Legacy"], None);
    let op = connect_op(&press(&mut app, KeyCode::Enter));

    let err = GatewayError::new(GatewayErrorKind::SecretsRequired, "Secrets were required");
    connected(&mut app, op, "Legacy", Err(err));
    assert_eq!(app.screen, Screen::ConnectionResult);
}

#[test]
fn known_open_network_failure_does_not_ask_for_password() {
    let mut app = app();
    seed(&mut app, vec![ap("Library", 60, Security::Open)], &["Library"], None);
    let op = connect_op(&press(&mut app, KeyCode::Enter));

    let err = GatewayError::new(GatewayErrorKind::CommandFailed, "No network with SSID");
    connected(&mut app, op, "Library", Err(err));
    assert_eq!(app.screen, Screen::ConnectionResult);
    assert!(app.report.as_ref().is_some_and(|r| r.message.contains("No network")));
}

#[test]
fn timeout_after_result_is_ignored() {
    let mut app = app();
    seed(&mut app, vec![ap("Home", 80, Security::WpaPsk)], &["Home"], None);
    let op = connect_op(&press(&mut app, KeyCode::Enter));

    connected(&mut app, op, "Home", Ok(()));
    assert_eq!(app.screen, Screen::ConnectionResult);

    let effects = app.handle_event(Event::Timer(TimerEvent::ConnectTimeout { op }));
    assert!(effects.is_empty());
    assert_eq!(app.screen, Screen::ConnectionResult);
    assert!(app.report.as_ref().is_some_and(|r| r.success));
}

#[test]
fn timeout_while_waiting_reports_failure_and_late_result_is_dropped() {
    let mut app = app();
    seed(&mut app, vec![ap("Home", 80, Security::WpaPsk)], &["Home"], None);
    let op = connect_op(&press(&mut app, KeyCode::Enter));

    app.handle_event(Event::Timer(TimerEvent::ConnectTimeout { op }));
    assert_eq!(app.screen, Screen::ConnectionResult);
    let report = app.report.clone().expect("report");
    assert!(!report.success);
    assert_eq!(report.message, "Timed out after 30s");
    assert!(!app.is_pending(OpKind::Connect));

    let effects = connected(&mut app, op, "Home", Ok(()));
    assert_eq!(app.screen, Screen::ConnectionResult);
    assert_eq!(app.report, Some(report));
    assert!(effects.contains(&Effect::RefreshKnown));
}

#[test]
fn abandoned_attempt_timeout_leaves_newer_attempt_alone() {
    let mut app = app();
    seed(&mut app, vec![ap("Home", 80, Security::WpaPsk)], &["Home"], None);
    let first = connect_op(&press(&mut app, KeyCode::Enter));
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.screen, Screen::NetworksList);

    let second = connect_op(&press(&mut app, KeyCode::Enter));
    assert_ne!(first, second);
    assert_eq!(app.screen, Screen::Connecting);

    let effects = app.handle_event(Event::Timer(TimerEvent::ConnectTimeout { op: first }));
    assert!(effects.is_empty());
    assert_eq!(app.screen, Screen::Connecting);
    assert_eq!(app.connecting, Some(second));
    assert_eq!(app.pending_connect_target(), Some("Home"));
    assert!(!app.status.as_ref().is_some_and(|s| s.kind == StatusKind::Error));

    connected(&mut app, second, "Home", Ok(()));
    assert_eq!(app.screen, Screen::ConnectionResult);
    assert!(app.report.as_ref().is_some_and(|r| r.success));
}

#[test]
fn abandoned_attempt_timeout_reports_when_nothing_else_is_waiting() {
    let mut app = app();
    seed(&mut app, vec![ap("Home", 80, Security::WpaPsk)], &["Home"], None);
    let op = connect_op(&press(&mut app, KeyCode::Enter));
    press(&mut app, KeyCode::Esc);

    app.handle_event(Event::Timer(TimerEvent::ConnectTimeout { op }));
    assert_eq!(app.screen, Screen::NetworksList);
    let status = app.status.clone().expect("status");
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("timed out"));
}

#[test]
fn leaving_connecting_screen_turns_result_into_status() {
    let mut app = app();
    seed(&mut app, vec![ap("Home", 80, Security::WpaPsk)], &["Home"], None);
    let op = connect_op(&press(&mut app, KeyCode::Enter));

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.screen, Screen::NetworksList);
    assert!(app.is_pending(OpKind::Connect));

    connected(&mut app, op, "Home", Ok(()));
    assert_eq!(app.screen, Screen::NetworksList);
    let status = app.status.clone().expect("status");
    assert_eq!(status.kind, StatusKind::Success);
    assert!(status.text.contains("Home"));
}

#[test]
fn disconnecting_the_active_network() {
    let mut app = app();
    seed(
        &mut app,
        vec![ap("Home", 80, Security::WpaPsk), ap("Cafe", 50, Security::Open)],
        &["Home"],
        Some("Home"),
    );
    focus(&mut app, "Home");
    assert!(app.entries[app.list_cursor].ap.is_active);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen, Screen::ConfirmDisconnect);

    let effects = press(&mut app, KeyCode::Char('y'));
    let op = match effects.as_slice() {
        [Effect::Disconnect { op, identifier }] if identifier == "Home" => *op,
        other => panic!("unexpected effects {other:?}"),
    };
    // a second confirmation while in flight is ignored
    assert!(press(&mut app, KeyCode::Enter).is_empty());

    let effects = app.handle_event(Event::Gateway(Outcome::Disconnected {
        op,
        identifier: "Home".into(),
        result: Ok(()),
    }));
    assert_eq!(app.screen, Screen::NetworksList);
    assert!(app.active.is_none());
    assert!(app.entries.iter().all(|e| !e.ap.is_active));
    assert!(effects.contains(&Effect::RefreshKnown));
    assert!(effects.contains(&Effect::Scan { rescan: false }));
}

#[test]
fn cancel_is_honoured_while_disconnect_is_in_flight() {
    let mut app = app();
    seed(&mut app, vec![ap("Home", 80, Security::WpaPsk)], &["Home"], Some("Home"));
    focus(&mut app, "Home");
    press(&mut app, KeyCode::Enter);
    let effects = press(&mut app, KeyCode::Char('y'));
    let op = match effects.as_slice() {
        [Effect::Disconnect { op, .. }] => *op,
        other => panic!("unexpected effects {other:?}"),
    };

    assert!(press(&mut app, KeyCode::Esc).is_empty());
    assert_eq!(app.screen, Screen::NetworksList);
    assert!(app.is_pending(OpKind::Disconnect));

    app.handle_event(Event::Gateway(Outcome::Disconnected {
        op,
        identifier: "Home".into(),
        result: Ok(()),
    }));
    assert_eq!(app.screen, Screen::NetworksList);
    assert!(app.active.is_none());
    assert!(app.status.as_ref().is_some_and(|s| s.text.contains("Disconnected")));
}

#[test]
fn disconnect_key_without_connection_sets_status() {
    let mut app = app();
    seed(&mut app, vec![ap("Cafe", 50, Security::Open)], &[], None);
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.screen, Screen::NetworksList);
    assert_eq!(app.status.as_ref().map(|s| s.text.as_str()), Some("Not connected"));
}

#[test]
fn forgetting_from_profiles_returns_to_profiles() {
    let mut app = app();
    seed(&mut app, vec![], &["Home", "Work"], None);

    let effects = press(&mut app, KeyCode::Char('p'));
    assert_eq!(app.screen, Screen::KnownProfilesList);
    assert_eq!(effects, vec![Effect::RefreshKnown]);

    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.selected_profile().map(|p| p.name.as_str()), Some("Work"));

    press(&mut app, KeyCode::Char('f'));
    assert_eq!(app.screen, Screen::ConfirmForget);

    let effects = press(&mut app, KeyCode::Char('y'));
    let op = match effects.as_slice() {
        [Effect::Forget { op, identifier }] if identifier == "Work" => *op,
        other => panic!("unexpected effects {other:?}"),
    };

    app.handle_event(Event::Gateway(Outcome::Forgotten {
        op,
        identifier: "Work".into(),
        result: Ok(()),
    }));
    assert_eq!(app.screen, Screen::KnownProfilesList);
    assert!(!app.known.contains_key("Work"));
    assert!(app.known.contains_key("Home"));
}

#[test]
fn cancelling_forget_returns_to_previous_screen() {
    let mut app = app();
    seed(&mut app, vec![ap("Home", 80, Security::WpaPsk)], &["Home"], None);
    press(&mut app, KeyCode::Char('f'));
    assert_eq!(app.screen, Screen::ConfirmForget);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.screen, Screen::NetworksList);
    assert!(app.forget_target.is_none());
}

#[test]
fn cancelled_forget_still_prunes_when_the_result_lands() {
    let mut app = app();
    seed(&mut app, vec![], &["Home", "Work"], None);
    press(&mut app, KeyCode::Char('p'));
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char('f'));
    let effects = press(&mut app, KeyCode::Char('y'));
    let op = match effects.as_slice() {
        [Effect::Forget { op, .. }] => *op,
        other => panic!("unexpected effects {other:?}"),
    };

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.screen, Screen::KnownProfilesList);
    assert!(app.forget_target.is_some());

    app.handle_event(Event::Gateway(Outcome::Forgotten {
        op,
        identifier: "Work".into(),
        result: Ok(()),
    }));
    assert_eq!(app.screen, Screen::KnownProfilesList);
    assert!(!app.known.contains_key("Work"));
}

#[test]
fn unresolvable_profile_falls_back_to_list() {
    let mut app = app();
    app.previous_screen = Screen::KnownProfilesList;
    app.screen = Screen::ConfirmForget;
    app.forget_target = Some(ConnectionProfile::default());

    let effects = press(&mut app, KeyCode::Char('y'));
    assert_eq!(app.screen, Screen::NetworksList);
    assert!(!effects.iter().any(|e| matches!(e, Effect::Forget { .. })));
    let status = app.status.clone().expect("status");
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.starts_with("Cannot identify"));
}

#[test]
fn filter_input_takes_navigation_and_quit_keys_as_text() {
    let mut app = app();
    seed(
        &mut app,
        vec![
            ap("Alpha", 90, Security::Open),
            ap("Beta", 80, Security::Open),
            ap("Kilo", 70, Security::Open),
        ],
        &[],
        None,
    );
    press(&mut app, KeyCode::Char('/'));
    assert!(app.filter.editing);

    typed(&mut app, "k");
    assert_eq!(app.filter.query, "k");
    assert_eq!(app.entries.len(), 1);

    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit);
    assert_eq!(app.filter.query, "kq");
    assert!(app.entries.is_empty());

    press(&mut app, KeyCode::Esc);
    assert!(!app.filter.editing);
    assert_eq!(app.entries.len(), 3);
}

#[test]
fn committed_filter_survives_rescans() {
    let mut app = app();
    seed(
        &mut app,
        vec![ap("Alpha", 90, Security::Open), ap("Beta", 80, Security::Open)],
        &[],
        None,
    );
    press(&mut app, KeyCode::Char('/'));
    typed(&mut app, "bet");
    press(&mut app, KeyCode::Enter);
    assert!(!app.filter.editing);

    app.handle_event(Event::Gateway(Outcome::Scanned(Ok(vec![
        ap("Alpha", 90, Security::Open),
        ap("Beta", 85, Security::Open),
        ap("Better", 40, Security::Open),
    ]))));
    assert_eq!(app.entries.len(), 2);

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.entries.len(), 3);
}

#[test]
fn superseded_status_timer_does_not_clear_newer_message() {
    let mut app = app();
    let first = clear_token(&press(&mut app, KeyCode::Char('u')));
    let second = clear_token(&press(&mut app, KeyCode::Char('u')));
    assert_ne!(first, second);

    app.handle_event(Event::Timer(TimerEvent::ClearStatus { token: first }));
    assert!(app.status.is_some());

    app.handle_event(Event::Timer(TimerEvent::ClearStatus { token: second }));
    assert!(app.status.is_none());
}

#[test]
fn status_timer_rearms_after_screen_change() {
    let mut app = app();
    let token = clear_token(&press(&mut app, KeyCode::Char('u')));
    press(&mut app, KeyCode::Char('p'));
    assert_eq!(app.screen, Screen::KnownProfilesList);

    let effects = app.handle_event(Event::Timer(TimerEvent::ClearStatus { token }));
    assert!(app.status.is_some());
    let rearmed = clear_token(&effects);
    assert_ne!(rearmed, token);

    app.handle_event(Event::Timer(TimerEvent::ClearStatus { token: rearmed }));
    assert!(app.status.is_none());
}

#[test]
fn refresh_requests_profiles_and_rescan() {
    let mut app = app();
    let effects = press(&mut app, KeyCode::Char('r'));
    assert!(effects.contains(&Effect::RefreshKnown));
    assert!(effects.contains(&Effect::Scan { rescan: true }));
    assert!(app.scanning);
}

#[test]
fn help_overlay_swallows_keys_until_closed() {
    let mut app = app();
    press(&mut app, KeyCode::Char('?'));
    assert!(app.show_help);

    assert!(press(&mut app, KeyCode::Char('r')).is_empty());
    assert!(app.show_help);

    press(&mut app, KeyCode::Esc);
    assert!(!app.show_help);

    press(&mut app, KeyCode::Char('?'));
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
}

#[test]
fn quit_key_is_text_in_password_dialog() {
    let mut app = app();
    seed(&mut app, vec![ap("Office", 60, Security::WpaPsk)], &[], None);
    press(&mut app, KeyCode::Enter);
    typed(&mut app, "q?");
    assert!(!app.should_quit);
    assert!(!app.show_help);
    assert_eq!(app.password.value(), "q?");

    app.handle_event(Event::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    )));
    assert!(app.should_quit);
}

#[test]
fn hidden_network_form_connects_with_hidden_flag() {
    let mut app = app();
    press(&mut app, KeyCode::Char('h'));
    assert_eq!(app.screen, Screen::HiddenSsidInput);

    typed(&mut app, "Secret Lab");
    press(&mut app, KeyCode::Tab);
    typed(&mut app, "labpass1");
    let effects = press(&mut app, KeyCode::Enter);
    let op = connect_op(&effects);
    assert!(effects.contains(&Effect::Connect {
        op,
        ssid: "Secret Lab".into(),
        password: Some(Secret::new("labpass1")),
        hidden: true,
        recreate: false,
    }));
}

#[test]
fn hidden_form_requires_ssid() {
    let mut app = app();
    press(&mut app, KeyCode::Char('h'));
    let effects = press(&mut app, KeyCode::Enter);
    assert!(effects.is_empty());
    assert_eq!(app.screen, Screen::HiddenSsidInput);
    assert!(app.notice.is_some());
}

#[test]
fn disabling_radio_clears_scanned_networks() {
    let mut app = app();
    seed(&mut app, vec![ap("Cafe", 50, Security::Open)], &[], None);
    app.handle_event(Event::Gateway(Outcome::RadioToggled(Ok(RadioState::Disabled))));
    assert!(app.scanned.is_empty());
    assert!(app.entries.is_empty());
    assert_eq!(app.list_title(), "Wi-Fi is disabled");

    let effects = app.handle_event(Event::Gateway(Outcome::RadioToggled(Ok(RadioState::Enabled))));
    assert!(effects.contains(&Effect::Scan { rescan: true }));
}

#[test]
fn cursor_follows_network_across_rescans() {
    let mut app = app();
    seed(
        &mut app,
        vec![ap("Alpha", 60, Security::Open), ap("Beta", 40, Security::Open)],
        &[],
        None,
    );
    focus(&mut app, "Beta");
    assert_eq!(app.list_cursor, 1);

    app.handle_event(Event::Gateway(Outcome::Scanned(Ok(vec![
        ap("Alpha", 60, Security::Open),
        ap("Beta", 90, Security::Open),
    ]))));
    assert_eq!(app.list_cursor, 0);
    assert_eq!(app.selected_entry().and_then(|e| e.ssid()), Some("Beta"));
}

#[test]
fn scan_results_are_cached() {
    let mut app = app();
    let scanned = vec![ap("Cafe", 50, Security::Open)];
    let effects = app.handle_event(Event::Gateway(Outcome::Scanned(Ok(scanned.clone()))));
    assert_eq!(effects, vec![Effect::SaveCache(scanned)]);
    assert!(!app.scanning);
}

#[test]
fn device_detail_after_closing_info_is_discarded() {
    let mut app = app();
    seed(&mut app, vec![ap("Home", 80, Security::WpaPsk)], &["Home"], Some("Home"));

    let effects = press(&mut app, KeyCode::Char('i'));
    assert_eq!(
        effects,
        vec![Effect::FetchDeviceDetail {
            device: "wlan0".into()
        }]
    );
    assert_eq!(app.screen, Screen::ActiveConnectionInfo);
    press(&mut app, KeyCode::Esc);

    app.handle_event(Event::Gateway(Outcome::DeviceDetail(Ok(DeviceDetail {
        device: "wlan0".into(),
        ..DeviceDetail::default()
    }))));
    assert!(app.detail.is_none());
}

#[test]
fn list_title_counts_entries_and_notes_hidden_filter() {
    let mut app = app();
    seed(
        &mut app,
        vec![ap("Cafe", 50, Security::Open), ap("--", 40, Security::Open)],
        &[],
        None,
    );
    assert_eq!(app.list_title(), "Wi-Fi Networks (1) (hiding unnamed)");

    press(&mut app, KeyCode::Char('u'));
    assert_eq!(app.list_title(), "Wi-Fi Networks (2)");
}
