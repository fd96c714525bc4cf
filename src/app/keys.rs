use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::{entry_for_profile, App, HiddenField, HiddenForm, OpKind, Screen, StatusKind};
use crate::coordinator::{Effect, Secret};
use crate::error::AirlinkError;
use crate::merge::NetworkEntry;

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Plain (unmodified or shifted) character
fn plain_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

fn is_confirm(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y'))
}

fn is_cancel(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N'))
}

impl App {
    /// Mode-first key dispatch: global chords, help overlay, then the current screen
    pub(super) fn handle_key(&mut self, key: KeyEvent, effects: &mut Vec<Effect>) {
        if is_ctrl(&key, 'c') {
            self.should_quit = true;
            return;
        }

        let text_entry =
            self.screen.is_text_entry() || (self.screen == Screen::NetworksList && self.filter.editing);

        if self.show_help {
            let ch = plain_char(&key);
            if key.code == KeyCode::Esc || ch == Some(self.keys().help) {
                self.show_help = false;
            } else if ch == Some(self.keys().quit) {
                self.should_quit = true;
            }
            return;
        }
        if !text_entry {
            let ch = plain_char(&key);
            if ch == Some(self.keys().quit) {
                self.should_quit = true;
                return;
            }
            if ch == Some(self.keys().help) {
                self.show_help = true;
                return;
            }
        }

        match self.screen {
            Screen::NetworksList if self.filter.editing => self.filter_key(key),
            Screen::NetworksList => self.networks_key(key, effects),
            Screen::KnownProfilesList => self.profiles_key(key, effects),
            Screen::PasswordInput => self.password_key(key, effects),
            Screen::HiddenSsidInput => self.hidden_key(key, effects),
            Screen::Connecting => self.connecting_key(key, effects),
            Screen::ConnectionResult => self.result_key(key),
            Screen::ActiveConnectionInfo => self.info_key(key, effects),
            Screen::ConfirmDisconnect => self.confirm_disconnect_key(key, effects),
            Screen::ConfirmForget => self.confirm_forget_key(key, effects),
            Screen::ConfirmOpenNetworkConnect => self.confirm_open_key(key, effects),
        }
    }

    // ── Filter sub-mode ───────────────────────────────────────────────

    fn filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.filter.editing = false;
                self.filter.query.clear();
                self.rebuild();
            }
            KeyCode::Enter => {
                self.filter.editing = false;
            }
            KeyCode::Backspace => {
                self.filter.query.pop();
                self.list_cursor = 0;
                self.rebuild();
            }
            _ => {
                if let Some(c) = plain_char(&key) {
                    self.filter.query.push(c);
                    self.list_cursor = 0;
                    self.rebuild();
                }
            }
        }
    }

    // ── Networks list ─────────────────────────────────────────────────

    fn networks_key(&mut self, key: KeyEvent, effects: &mut Vec<Effect>) {
        let count = self.entries.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list_cursor = self.list_cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.list_cursor + 1 < count {
                    self.list_cursor += 1;
                }
            }
            KeyCode::Home | KeyCode::Char('g') => self.list_cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.list_cursor = count.saturating_sub(1),
            KeyCode::Enter => {
                if let Some(entry) = self.selected_entry().cloned() {
                    self.select_entry(entry, effects);
                }
            }
            KeyCode::Esc => {
                if self.filter.active_query().is_some() {
                    self.filter.query.clear();
                    self.rebuild();
                }
            }
            _ => {
                if let Some(c) = plain_char(&key) {
                    self.networks_action(c, effects);
                }
            }
        }
    }

    fn networks_action(&mut self, c: char, effects: &mut Vec<Effect>) {
        let keys = self.keys().clone();
        if c == keys.refresh {
            self.set_status("Scanning…", StatusKind::Info, effects);
            self.refresh_all(true, effects);
        } else if c == keys.filter {
            self.filter.editing = true;
        } else if c == keys.toggle_wifi {
            let enable = !self.wifi_enabled();
            let text = if enable {
                "Turning Wi-Fi on…"
            } else {
                "Turning Wi-Fi off…"
            };
            self.set_status(text, StatusKind::Info, effects);
            effects.push(Effect::SetRadio { enable });
        } else if c == keys.disconnect {
            self.request_disconnect(effects);
        } else if c == keys.info {
            self.open_info(effects);
        } else if c == keys.toggle_hidden {
            self.show_hidden = !self.show_hidden;
            self.rebuild();
            let text = if self.show_hidden {
                "Showing unnamed networks"
            } else {
                "Hiding unnamed networks"
            };
            self.set_status(text, StatusKind::Info, effects);
        } else if c == keys.forget {
            match self.selected_entry().and_then(NetworkEntry::profile).cloned() {
                Some(profile) => {
                    self.forget_target = Some(profile);
                    self.previous_screen = Screen::NetworksList;
                    self.screen = Screen::ConfirmForget;
                }
                None => self.set_status("Not a saved network", StatusKind::Error, effects),
            }
        } else if c == keys.profiles {
            self.profile_cursor = 0;
            self.screen = Screen::KnownProfilesList;
            effects.push(Effect::RefreshKnown);
        } else if c == keys.hidden_connect {
            self.open_hidden_form();
        }
    }

    fn select_entry(&mut self, entry: NetworkEntry, effects: &mut Vec<Effect>) {
        let Some(ssid) = entry.ssid().map(str::to_string) else {
            self.open_hidden_form();
            return;
        };

        if entry.ap.is_active {
            self.disconnect_target = entry.profile().cloned();
            self.selected = Some(entry);
            self.screen = Screen::ConfirmDisconnect;
            return;
        }

        let is_known = entry.ap.is_known;
        let is_open = entry.ap.security.is_open();
        self.selected = Some(entry);

        if is_open && !is_known {
            self.screen = Screen::ConfirmOpenNetworkConnect;
        } else if is_known || is_open {
            self.start_connect(&ssid, None, is_known, false, false, effects);
        } else {
            self.password.clear();
            self.notice = None;
            self.screen = Screen::PasswordInput;
        }
    }

    fn request_disconnect(&mut self, effects: &mut Vec<Effect>) {
        match &self.active {
            Some(active) => {
                self.disconnect_target = Some(active.profile.clone());
                self.screen = Screen::ConfirmDisconnect;
            }
            None => self.set_status("Not connected", StatusKind::Info, effects),
        }
    }

    fn open_info(&mut self, effects: &mut Vec<Effect>) {
        let device = self.active.as_ref().and_then(|a| a.device.clone());
        match device {
            Some(device) => {
                self.detail = None;
                self.detail_error = None;
                self.screen = Screen::ActiveConnectionInfo;
                effects.push(Effect::FetchDeviceDetail { device });
            }
            None => self.set_status("No active Wi-Fi connection", StatusKind::Info, effects),
        }
    }

    fn open_hidden_form(&mut self) {
        self.hidden_form = HiddenForm::default();
        self.screen = Screen::HiddenSsidInput;
    }

    // ── Known profiles ────────────────────────────────────────────────

    fn profiles_key(&mut self, key: KeyEvent, effects: &mut Vec<Effect>) {
        let count = self.known.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.profile_cursor = self.profile_cursor.saturating_sub(1)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.profile_cursor + 1 < count {
                    self.profile_cursor += 1;
                }
            }
            KeyCode::Home | KeyCode::Char('g') => self.profile_cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.profile_cursor = count.saturating_sub(1),
            KeyCode::Esc | KeyCode::Backspace => self.screen = Screen::NetworksList,
            KeyCode::Enter => self.connect_profile(effects),
            _ => {
                let keys = self.keys().clone();
                match plain_char(&key) {
                    Some(c) if c == keys.forget => {
                        if let Some(profile) = self.selected_profile().cloned() {
                            self.forget_target = Some(profile);
                            self.previous_screen = Screen::KnownProfilesList;
                            self.screen = Screen::ConfirmForget;
                        }
                    }
                    Some(c) if c == keys.refresh => effects.push(Effect::RefreshKnown),
                    Some(c) if c == keys.profiles => self.screen = Screen::NetworksList,
                    _ => {}
                }
            }
        }
    }

    fn connect_profile(&mut self, effects: &mut Vec<Effect>) {
        let Some(profile) = self.selected_profile().cloned() else {
            return;
        };
        if self.is_active_profile(&profile) {
            self.set_status(
                format!("Already connected to '{}'", profile.name),
                StatusKind::Info,
                effects,
            );
            return;
        }
        let Some(ssid) = profile.key().map(str::to_string) else {
            self.fail_to_list(
                AirlinkError::UnresolvedIdentifier(format!("the network for '{}'", profile.name)),
                effects,
            );
            return;
        };
        let existing = self.entries.iter().find(|e| e.ssid() == Some(ssid.as_str()));
        self.selected = Some(entry_for_profile(&profile, existing));
        self.start_connect(&ssid, None, true, false, false, effects);
    }

    // ── Text entry ────────────────────────────────────────────────────

    fn password_key(&mut self, key: KeyEvent, effects: &mut Vec<Effect>) {
        if is_ctrl(&key, 'h') {
            self.password.toggle_reveal();
            return;
        }
        match key.code {
            KeyCode::Esc => {
                self.password.clear();
                self.notice = None;
                self.screen = Screen::NetworksList;
            }
            KeyCode::Enter => self.submit_password(effects),
            _ => {
                self.password.handle_key(key);
            }
        }
    }

    fn submit_password(&mut self, effects: &mut Vec<Effect>) {
        if self.password.is_empty() {
            self.notice = Some("Password cannot be empty".into());
            return;
        }
        let Some(entry) = self.selected.clone() else {
            self.password.clear();
            self.fail_to_list(
                AirlinkError::UnresolvedIdentifier("the network to connect to".into()),
                effects,
            );
            return;
        };
        let Some(ssid) = entry.ssid().map(str::to_string) else {
            self.password.clear();
            self.fail_to_list(
                AirlinkError::UnresolvedIdentifier("the network to connect to".into()),
                effects,
            );
            return;
        };
        let secret = Secret::new(self.password.value());
        self.password.clear();
        self.notice = None;
        // a known network reaching this dialog had its stored credentials rejected
        let recreate = entry.ap.is_known;
        self.start_connect(&ssid, Some(secret), false, false, recreate, effects);
    }

    fn hidden_key(&mut self, key: KeyEvent, effects: &mut Vec<Effect>) {
        if is_ctrl(&key, 'h') {
            self.hidden_form.password.toggle_reveal();
            return;
        }
        match key.code {
            KeyCode::Esc => self.screen = Screen::NetworksList,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.hidden_form.focus = match self.hidden_form.focus {
                    HiddenField::Ssid => HiddenField::Password,
                    HiddenField::Password => HiddenField::Ssid,
                };
            }
            KeyCode::Enter => self.submit_hidden(effects),
            _ => {
                self.hidden_form.focused_mut().handle_key(key);
            }
        }
    }

    fn submit_hidden(&mut self, effects: &mut Vec<Effect>) {
        let ssid = self.hidden_form.ssid.value().to_string();
        if ssid.trim().is_empty() {
            self.hidden_form.focus = HiddenField::Ssid;
            self.notice = Some("SSID cannot be empty".into());
            return;
        }
        let password = Some(self.hidden_form.password.value())
            .filter(|p| !p.is_empty())
            .map(Secret::new);
        self.notice = None;
        self.hidden_form = HiddenForm::default();

        let security = if password.is_some() {
            crate::gateway::Security::WpaPsk
        } else {
            crate::gateway::Security::Open
        };
        self.selected = Some(NetworkEntry {
            ap: crate::gateway::AccessPoint::scanned(&ssid, None, 0, security),
            source: crate::merge::Source::ScannedOnly,
        });
        self.start_connect(&ssid, password, false, true, false, effects);
    }

    // ── In-flight and result screens ──────────────────────────────────

    fn connecting_key(&mut self, key: KeyEvent, effects: &mut Vec<Effect>) {
        if key.code == KeyCode::Esc {
            // the attempt keeps running; its result lands as a status line
            let target = self.pending_connect_target().unwrap_or_default().to_string();
            debug!("Leaving Connecting screen while '{target}' is in flight");
            self.connecting = None;
            self.screen = Screen::NetworksList;
            self.set_status(
                format!("Still connecting to '{target}' in the background"),
                StatusKind::Info,
                effects,
            );
        }
    }

    fn result_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.clear_status();
            self.report = None;
            self.screen = Screen::NetworksList;
        }
    }

    fn info_key(&mut self, key: KeyEvent, effects: &mut Vec<Effect>) {
        let keys = self.keys().clone();
        match (key.code, plain_char(&key)) {
            (KeyCode::Esc | KeyCode::Enter, _) => self.screen = Screen::NetworksList,
            (_, Some(c)) if c == keys.info => self.screen = Screen::NetworksList,
            (_, Some(c)) if c == keys.refresh => self.open_info(effects),
            _ => {}
        }
    }

    // ── Confirmations ─────────────────────────────────────────────────

    fn confirm_disconnect_key(&mut self, key: KeyEvent, effects: &mut Vec<Effect>) {
        let in_flight = self.is_pending(OpKind::Disconnect);
        if is_confirm(&key) {
            if in_flight {
                return;
            }
            let identifier = self
                .disconnect_target
                .as_ref()
                .and_then(|p| p.identifier())
                .map(str::to_string);
            match identifier {
                Some(identifier) => {
                    let op = self.begin(OpKind::Disconnect, &identifier, false);
                    effects.push(Effect::Disconnect { op, identifier });
                }
                None => self.fail_to_list(
                    AirlinkError::UnresolvedIdentifier("the connection to disconnect".into()),
                    effects,
                ),
            }
        } else if is_cancel(&key) {
            // an in-flight disconnect still reports through its result
            if !in_flight {
                self.disconnect_target = None;
            }
            self.screen = Screen::NetworksList;
        }
    }

    fn confirm_forget_key(&mut self, key: KeyEvent, effects: &mut Vec<Effect>) {
        let in_flight = self.is_pending(OpKind::Forget);
        if is_confirm(&key) {
            if in_flight {
                return;
            }
            let identifier = self
                .forget_target
                .as_ref()
                .and_then(|p| p.identifier())
                .map(str::to_string);
            match identifier {
                Some(identifier) => {
                    let op = self.begin(OpKind::Forget, &identifier, false);
                    effects.push(Effect::Forget { op, identifier });
                }
                None => {
                    self.forget_target = None;
                    self.fail_to_list(
                        AirlinkError::UnresolvedIdentifier("the profile to forget".into()),
                        effects,
                    )
                }
            }
        } else if is_cancel(&key) {
            // the result still needs the target to prune the profile lists
            if !in_flight {
                self.forget_target = None;
            }
            self.screen = self.previous_screen;
        }
    }

    fn confirm_open_key(&mut self, key: KeyEvent, effects: &mut Vec<Effect>) {
        if is_confirm(&key) {
            match self.selected.as_ref().and_then(|e| e.ssid()).map(str::to_string) {
                Some(ssid) => self.start_connect(&ssid, None, false, false, false, effects),
                None => self.fail_to_list(
                    AirlinkError::UnresolvedIdentifier("the network to connect to".into()),
                    effects,
                ),
            }
        } else if is_cancel(&key) {
            self.screen = Screen::NetworksList;
        }
    }
}
