//! Session state machine.
//!
//! [`App::handle_event`] is the only entry point: it mutates the session
//! and returns the side effects to run. It never awaits and never touches
//! the gateway, so every transition is testable without a runtime.

mod keys;
mod outcome;

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{debug, error};

use crate::animation::AnimationState;
use crate::config::{Config, KeysConfig};
use crate::coordinator::{Effect, Secret};
use crate::error::AirlinkError;
use crate::event::{Event, OpId};
use crate::gateway::{
    AccessPoint, ActiveConnection, ConnectionProfile, DeviceDetail, KnownProfiles, RadioState,
};
use crate::merge::{self, MergeInput, NetworkEntry, Source};
use crate::ui::components::input_dialog::InputField;

/// Longest WPA passphrase nmcli accepts
pub const PASSWORD_MAX_CHARS: usize = 63;
const SSID_MAX_CHARS: usize = 32;

// ── Screens ───────────────────────────────────────────────────────────

/// The modal view; exactly one is current
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    NetworksList,
    KnownProfilesList,
    PasswordInput,
    HiddenSsidInput,
    Connecting,
    ConnectionResult,
    ActiveConnectionInfo,
    ConfirmDisconnect,
    ConfirmForget,
    ConfirmOpenNetworkConnect,
}

impl Screen {
    pub fn is_text_entry(&self) -> bool {
        matches!(self, Self::PasswordInput | Self::HiddenSsidInput)
    }
}

// ── Pending operations ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Connect,
    Disconnect,
    Forget,
}

/// Correlates an in-flight gateway call with what it targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOperation {
    pub kind: OpKind,
    /// SSID for connects, profile identifier otherwise
    pub target: String,
    /// Known network attempted with its stored credentials
    pub known_no_psk: bool,
}

// ── Status line ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
    token: u64,
    /// Screen current when the message was set
    screen: Screen,
}

/// What the ConnectionResult screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionReport {
    pub ssid: String,
    pub success: bool,
    pub message: String,
}

/// Network list filter. Typing previews live; Enter keeps it, Esc drops it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub editing: bool,
    pub query: String,
}

impl FilterState {
    pub fn active_query(&self) -> Option<&str> {
        Some(self.query.as_str()).filter(|q| !q.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiddenField {
    Ssid,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenForm {
    pub ssid: InputField,
    pub password: InputField,
    pub focus: HiddenField,
}

impl Default for HiddenForm {
    fn default() -> Self {
        Self {
            ssid: InputField::new(false, Some(SSID_MAX_CHARS)),
            password: InputField::new(true, Some(PASSWORD_MAX_CHARS)),
            focus: HiddenField::Ssid,
        }
    }
}

impl HiddenForm {
    pub fn focused_mut(&mut self) -> &mut InputField {
        match self.focus {
            HiddenField::Ssid => &mut self.ssid,
            HiddenField::Password => &mut self.password,
        }
    }
}

/// Timing and bindings the state machine needs from the config
#[derive(Debug, Clone)]
pub struct Settings {
    pub connect_timeout: Duration,
    pub status_clear: Duration,
    pub keys: KeysConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            status_clear: Duration::from_secs(3),
            keys: KeysConfig::default(),
        }
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            connect_timeout: config.connect_timeout(),
            status_clear: config.status_clear(),
            keys: config.keys.clone(),
        }
    }
}

// ── Application State ─────────────────────────────────────────────────

pub struct App {
    pub screen: Screen,
    pub previous_screen: Screen,
    pub should_quit: bool,
    pub show_help: bool,
    pub show_hidden: bool,
    pub radio: Option<RadioState>,
    pub scanning: bool,

    // Authoritative network state
    pub scanned: Vec<AccessPoint>,
    pub known: KnownProfiles,
    pub active: Option<ActiveConnection>,

    // Projection of the above
    pub entries: Vec<NetworkEntry>,
    pub list_cursor: usize,
    pub profile_cursor: usize,
    pub filter: FilterState,

    // Dialog bindings
    pub selected: Option<NetworkEntry>,
    pub disconnect_target: Option<ConnectionProfile>,
    pub forget_target: Option<ConnectionProfile>,
    pub password: InputField,
    pub notice: Option<String>,
    pub hidden_form: HiddenForm,
    pub report: Option<ConnectionReport>,
    pub detail: Option<DeviceDetail>,
    pub detail_error: Option<String>,
    pub connecting: Option<OpId>,

    pub status: Option<Status>,
    pub animation: AnimationState,

    pending: BTreeMap<OpId, PendingOperation>,
    next_op: OpId,
    next_token: u64,
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings, show_hidden: bool) -> Self {
        Self {
            screen: Screen::NetworksList,
            previous_screen: Screen::NetworksList,
            should_quit: false,
            show_help: false,
            show_hidden,
            radio: None,
            scanning: false,

            scanned: Vec::new(),
            known: KnownProfiles::new(),
            active: None,

            entries: Vec::new(),
            list_cursor: 0,
            profile_cursor: 0,
            filter: FilterState::default(),

            selected: None,
            disconnect_target: None,
            forget_target: None,
            password: InputField::new(true, Some(PASSWORD_MAX_CHARS)),
            notice: None,
            hidden_form: HiddenForm::default(),
            report: None,
            detail: None,
            detail_error: None,
            connecting: None,

            status: None,
            animation: AnimationState::default(),

            pending: BTreeMap::new(),
            next_op: 1,
            next_token: 1,
            settings,
        }
    }

    /// Seed the list from the on-disk cache before the first scan lands
    pub fn with_cached(mut self, cached: Option<Vec<AccessPoint>>) -> Self {
        if let Some(aps) = cached {
            debug!("Seeding list with {} cached access points", aps.len());
            self.scanned = aps;
            self.rebuild();
        }
        self
    }

    /// Effects to run once the event loop is up
    pub fn startup(&mut self) -> Vec<Effect> {
        self.scanning = true;
        vec![
            Effect::RadioStatus,
            Effect::RefreshKnown,
            Effect::Scan { rescan: true },
        ]
    }

    pub fn keys(&self) -> &KeysConfig {
        &self.settings.keys
    }

    pub fn handle_event(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            Event::Key(key) => self.handle_key(key, &mut effects),
            Event::Tick => self.animation.tick(),
            Event::Resize(..) => {}
            Event::Gateway(outcome) => self.on_outcome(outcome, &mut effects),
            Event::Timer(timer) => self.on_timer(timer, &mut effects),
        }
        effects
    }

    // ── Queries ───────────────────────────────────────────────────────

    pub fn selected_entry(&self) -> Option<&NetworkEntry> {
        self.entries.get(self.list_cursor)
    }

    /// Known Wi-Fi profiles in display order (by name)
    pub fn profiles_sorted(&self) -> Vec<&ConnectionProfile> {
        let mut profiles: Vec<&ConnectionProfile> = self.known.values().collect();
        profiles.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        profiles
    }

    pub fn selected_profile(&self) -> Option<&ConnectionProfile> {
        self.profiles_sorted().get(self.profile_cursor).copied()
    }

    pub fn is_active_profile(&self, profile: &ConnectionProfile) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.profile.same_profile(profile))
    }

    pub fn wifi_enabled(&self) -> bool {
        self.radio.map_or(true, |r| r.is_enabled())
    }

    pub fn is_pending(&self, kind: OpKind) -> bool {
        self.pending.values().any(|p| p.kind == kind)
    }

    pub fn pending_connect_target(&self) -> Option<&str> {
        self.connecting
            .and_then(|op| self.pending.get(&op))
            .map(|p| p.target.as_str())
    }

    pub fn list_title(&self) -> String {
        if !self.wifi_enabled() {
            return "Wi-Fi is disabled".into();
        }
        let mut title = format!("Wi-Fi Networks ({})", self.entries.len());
        if !self.show_hidden {
            title.push_str(" (hiding unnamed)");
        }
        title
    }

    // ── Internals ─────────────────────────────────────────────────────

    /// Re-run the merge and keep the cursor on the same network if it survived
    fn rebuild(&mut self) {
        let focus = self.selected_entry().map(entry_identity);
        self.entries = merge::merge(&MergeInput {
            scanned: &self.scanned,
            known: &self.known,
            active: self.active.as_ref(),
            show_hidden: self.show_hidden,
            filter: self.filter.active_query(),
        });
        self.list_cursor = focus
            .and_then(|id| self.entries.iter().position(|e| entry_identity(e) == id))
            .unwrap_or(self.list_cursor)
            .min(self.entries.len().saturating_sub(1));

        let profiles = self.known.len();
        self.profile_cursor = self.profile_cursor.min(profiles.saturating_sub(1));
    }

    fn begin(&mut self, kind: OpKind, target: &str, known_no_psk: bool) -> OpId {
        let op = self.next_op;
        self.next_op += 1;
        self.pending.insert(
            op,
            PendingOperation {
                kind,
                target: target.to_string(),
                known_no_psk,
            },
        );
        debug!("Operation {op} started: {kind:?} '{target}'");
        op
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind, effects: &mut Vec<Effect>) {
        let token = self.next_token;
        self.next_token += 1;
        self.status = Some(Status {
            text: text.into(),
            kind,
            token,
            screen: self.screen,
        });
        effects.push(Effect::ClearStatusAfter {
            token,
            after: self.settings.status_clear,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    /// Report an internal failure and fall back to the network list
    fn fail_to_list(&mut self, err: AirlinkError, effects: &mut Vec<Effect>) {
        error!("{err}");
        self.screen = Screen::NetworksList;
        self.set_status(err.to_string(), StatusKind::Error, effects);
    }

    fn refresh_all(&mut self, rescan: bool, effects: &mut Vec<Effect>) {
        self.scanning = true;
        effects.push(Effect::RefreshKnown);
        effects.push(Effect::Scan { rescan });
    }

    fn start_connect(
        &mut self,
        ssid: &str,
        password: Option<Secret>,
        known_no_psk: bool,
        hidden: bool,
        recreate: bool,
        effects: &mut Vec<Effect>,
    ) {
        let op = self.begin(OpKind::Connect, ssid, known_no_psk);
        self.connecting = Some(op);
        self.screen = Screen::Connecting;
        self.report = None;
        self.clear_status();
        effects.push(Effect::Connect {
            op,
            ssid: ssid.to_string(),
            password,
            hidden,
            recreate,
        });
        effects.push(Effect::StartConnectTimer {
            op,
            after: self.settings.connect_timeout,
        });
    }
}

/// Stable identity of a list row across rebuilds
fn entry_identity(entry: &NetworkEntry) -> (Option<String>, Option<String>) {
    match entry.ssid() {
        Some(ssid) => (Some(ssid.to_string()), None),
        None => (None, entry.ap.bssid.clone()),
    }
}

/// List entry standing in for a profile picked outside the network list
fn entry_for_profile(profile: &ConnectionProfile, existing: Option<&NetworkEntry>) -> NetworkEntry {
    if let Some(entry) = existing {
        return entry.clone();
    }
    let ssid = profile.key().unwrap_or(profile.name.as_str());
    let mut ap = AccessPoint::scanned(ssid, None, 0, crate::gateway::Security::Secured);
    ap.is_known = true;
    NetworkEntry {
        ap,
        source: Source::KnownOnly(profile.clone()),
    }
}

#[cfg(test)]
mod tests;
