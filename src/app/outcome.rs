use tracing::{debug, info, warn};

use super::{App, ConnectionReport, OpKind, Screen, StatusKind};
use crate::coordinator::Effect;
use crate::error::GatewayResult;
use crate::event::{OpId, Outcome, TimerEvent};

impl App {
    pub(super) fn on_outcome(&mut self, outcome: Outcome, effects: &mut Vec<Effect>) {
        match outcome {
            Outcome::Scanned(result) => {
                self.scanning = false;
                match result {
                    Ok(aps) => {
                        debug!("Scan returned {} access points", aps.len());
                        effects.push(Effect::SaveCache(aps.clone()));
                        self.scanned = aps;
                        self.rebuild();
                    }
                    Err(e) => {
                        warn!("Scan failed: {e}");
                        self.set_status(format!("Scan failed: {e}"), StatusKind::Error, effects);
                    }
                }
            }
            Outcome::Known(result) => match result {
                Ok(snapshot) => {
                    self.known = snapshot.profiles;
                    self.active = snapshot.active;
                    self.rebuild();
                }
                Err(e) => {
                    warn!("Loading saved networks failed: {e}");
                    self.set_status(
                        format!("Could not load saved networks: {e}"),
                        StatusKind::Error,
                        effects,
                    );
                }
            },
            Outcome::Connected { op, ssid, result } => self.on_connected(op, ssid, result, effects),
            Outcome::Disconnected {
                op,
                identifier,
                result,
            } => self.on_disconnected(op, identifier, result, effects),
            Outcome::Forgotten {
                op,
                identifier,
                result,
            } => self.on_forgotten(op, identifier, result, effects),
            Outcome::RadioToggled(result) => match result {
                Ok(state) => {
                    info!("Wi-Fi radio {state}");
                    self.radio = Some(state);
                    if state.is_enabled() {
                        self.set_status("Wi-Fi enabled", StatusKind::Success, effects);
                        self.refresh_all(true, effects);
                    } else {
                        self.scanned.clear();
                        self.active = None;
                        self.rebuild();
                        self.set_status("Wi-Fi disabled", StatusKind::Success, effects);
                    }
                }
                Err(e) => self.set_status(
                    format!("Could not toggle Wi-Fi: {e}"),
                    StatusKind::Error,
                    effects,
                ),
            },
            Outcome::RadioStatus(result) => match result {
                Ok(state) => {
                    self.radio = Some(state);
                    if !state.is_enabled() {
                        self.scanned.clear();
                        self.rebuild();
                    }
                }
                Err(e) => warn!("Could not read Wi-Fi radio state: {e}"),
            },
            Outcome::DeviceDetail(result) => {
                if self.screen != Screen::ActiveConnectionInfo {
                    debug!("Discarding device details; info screen was closed");
                    return;
                }
                match result {
                    Ok(detail) => {
                        self.detail = Some(detail);
                        self.detail_error = None;
                    }
                    Err(e) => self.detail_error = Some(e.to_string()),
                }
            }
        }
    }

    fn on_connected(
        &mut self,
        op: OpId,
        ssid: String,
        result: GatewayResult<()>,
        effects: &mut Vec<Effect>,
    ) {
        // connect changes both lists whatever the outcome
        self.refresh_all(false, effects);

        let Some(pending) = self.pending.remove(&op) else {
            debug!("Discarding connect result for '{ssid}' (operation {op} already settled)");
            return;
        };

        let waiting = self.screen == Screen::Connecting && self.connecting == Some(op);
        if !waiting {
            debug!("Connect result for '{ssid}' arrived after leaving the Connecting screen");
            match result {
                Ok(()) => self.set_status(
                    format!("Connected to '{ssid}'"),
                    StatusKind::Success,
                    effects,
                ),
                Err(e) => self.set_status(
                    format!("Connecting to '{ssid}' failed: {e}"),
                    StatusKind::Error,
                    effects,
                ),
            }
            return;
        }

        self.connecting = None;
        match result {
            Ok(()) => {
                self.report = Some(ConnectionReport {
                    ssid: ssid.clone(),
                    success: true,
                    message: format!("Connected to '{ssid}'"),
                });
                self.screen = Screen::ConnectionResult;
            }
            Err(e)
                if e.is_secrets_required()
                    && pending.known_no_psk
                    && self.can_retry_with_password(&ssid) =>
            {
                info!("Stored credentials for '{ssid}' failed ({e}); asking for a password");
                self.password.clear();
                self.notice = Some(format!("Stored credentials for '{ssid}' failed"));
                self.screen = Screen::PasswordInput;
            }
            Err(e) => {
                self.report = Some(ConnectionReport {
                    ssid: ssid.clone(),
                    success: false,
                    message: e.to_string(),
                });
                self.screen = Screen::ConnectionResult;
            }
        }
    }

    /// Recreating the profile with a PSK only makes sense for a PSK network that is
    /// still the selection
    fn can_retry_with_password(&self, ssid: &str) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|e| e.ssid() == Some(ssid) && e.ap.security.accepts_psk())
    }

    fn on_disconnected(
        &mut self,
        op: OpId,
        identifier: String,
        result: GatewayResult<()>,
        effects: &mut Vec<Effect>,
    ) {
        if self.pending.remove(&op).is_none() {
            debug!("Discarding disconnect result for '{identifier}' (unknown operation {op})");
        }
        if self.screen == Screen::ConfirmDisconnect {
            self.screen = Screen::NetworksList;
        }
        self.disconnect_target = None;
        match result {
            Ok(()) => {
                self.active = None;
                self.rebuild();
                self.set_status(
                    format!("Disconnected from '{identifier}'"),
                    StatusKind::Success,
                    effects,
                );
            }
            Err(e) => self.set_status(
                format!("Disconnect failed: {e}"),
                StatusKind::Error,
                effects,
            ),
        }
        self.refresh_all(false, effects);
    }

    fn on_forgotten(
        &mut self,
        op: OpId,
        identifier: String,
        result: GatewayResult<()>,
        effects: &mut Vec<Effect>,
    ) {
        if self.pending.remove(&op).is_none() {
            debug!("Discarding forget result for '{identifier}' (unknown operation {op})");
        }
        if self.screen == Screen::ConfirmForget {
            self.screen = self.previous_screen;
        }
        // a newer selection may have replaced the target while this was in flight
        let target = match &self.forget_target {
            Some(t) if t.identifier() == Some(identifier.as_str()) => self.forget_target.take(),
            _ => None,
        };
        match result {
            Ok(()) => {
                if let Some(target) = target {
                    self.known.retain(|_, p| !p.same_profile(&target));
                    if self
                        .active
                        .as_ref()
                        .is_some_and(|a| a.profile.same_profile(&target))
                    {
                        self.active = None;
                    }
                    self.rebuild();
                }
                self.set_status(format!("Forgot '{identifier}'"), StatusKind::Success, effects);
            }
            Err(e) => self.set_status(
                format!("Could not forget '{identifier}': {e}"),
                StatusKind::Error,
                effects,
            ),
        }
        self.refresh_all(false, effects);
    }

    pub(super) fn on_timer(&mut self, timer: TimerEvent, effects: &mut Vec<Effect>) {
        match timer {
            TimerEvent::ConnectTimeout { op } => self.on_connect_timeout(op, effects),
            TimerEvent::ClearStatus { token } => {
                let Some(status) = &self.status else {
                    return;
                };
                if status.token != token {
                    return;
                }
                if status.screen == self.screen {
                    self.clear_status();
                } else {
                    // the view moved on; give the message a fresh lifetime on this screen
                    let (text, kind) = (status.text.clone(), status.kind);
                    self.set_status(text, kind, effects);
                }
            }
        }
    }

    fn on_connect_timeout(&mut self, op: OpId, effects: &mut Vec<Effect>) {
        let Some(pending) = self.pending.get(&op) else {
            debug!("Connect timer for operation {op} fired after its result; ignoring");
            return;
        };
        if pending.kind != OpKind::Connect {
            return;
        }
        let ssid = pending.target.clone();
        self.pending.remove(&op);
        let secs = self.settings.connect_timeout.as_secs();
        warn!("Connecting to '{ssid}' timed out after {secs}s");

        if self.screen == Screen::Connecting && self.connecting == Some(op) {
            self.connecting = None;
            self.report = Some(ConnectionReport {
                ssid: ssid.clone(),
                success: false,
                message: format!("Timed out after {secs}s"),
            });
            self.screen = Screen::ConnectionResult;
        } else if self.is_retrying(&ssid) {
            debug!("Timer for abandoned attempt on '{ssid}' expired during a newer attempt");
        } else {
            self.set_status(
                format!("Connecting to '{ssid}' timed out"),
                StatusKind::Error,
                effects,
            );
        }
    }

    /// A newer connect to the same network is on the Connecting screen
    fn is_retrying(&self, ssid: &str) -> bool {
        self.screen == Screen::Connecting
            && self
                .connecting
                .and_then(|op| self.pending.get(&op))
                .is_some_and(|p| p.kind == OpKind::Connect && p.target == ssid)
    }
}
