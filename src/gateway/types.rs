use std::collections::BTreeMap;
use std::fmt;

use ipnet::IpNet;
use serde::{Deserialize, Serialize};

/// Label shown for networks that do not broadcast a name
pub const HIDDEN_LABEL: &str = "<Hidden Network>";

/// nmcli prints `--` for an empty field
pub fn is_placeholder_ssid(ssid: &str) -> bool {
    ssid.is_empty() || ssid == "--"
}

/// Security scheme of a WiFi network, derived from nmcli's SECURITY column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Security {
    Open,
    /// Secured, but the scheme is unknown (e.g. a remembered network out of range)
    Secured,
    Wep,
    WpaPsk,
    Wpa3Sae,
    Enterprise,
}

impl Security {
    pub fn from_nmcli(raw: &str) -> Self {
        let raw = raw.trim();
        if is_placeholder_ssid(raw) || raw.eq_ignore_ascii_case("open") {
            return Self::Open;
        }
        let upper = raw.to_uppercase();
        if upper.contains("802.1X") {
            Self::Enterprise
        } else if upper.contains("SAE") {
            Self::Wpa3Sae
        } else if upper.contains("WPA") {
            Self::WpaPsk
        } else if upper.contains("WEP") {
            Self::Wep
        } else {
            Self::Secured
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Whether a pre-shared key profile can authenticate this network.
    /// `Secured` is a remembered network whose scheme we could not see.
    pub fn accepts_psk(&self) -> bool {
        matches!(self, Self::WpaPsk | Self::Wpa3Sae | Self::Secured)
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Secured => write!(f, "Secured"),
            Self::Wep => write!(f, "WEP"),
            Self::WpaPsk => write!(f, "WPA-PSK"),
            Self::Wpa3Sae => write!(f, "WPA3"),
            Self::Enterprise => write!(f, "802.1X"),
        }
    }
}

/// A scanned or remembered wireless network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPoint {
    pub ssid: Option<String>,
    pub bssid: Option<String>,
    /// 0-100; 0 means remembered but not currently observed
    pub signal: u8,
    pub security: Security,
    #[serde(default)]
    pub is_known: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub interface: Option<String>,
}

impl AccessPoint {
    pub fn scanned(ssid: &str, bssid: Option<&str>, signal: u8, security: Security) -> Self {
        Self {
            ssid: Some(ssid.to_string()).filter(|s| !is_placeholder_ssid(s)),
            bssid: bssid.map(str::to_string).filter(|b| !is_placeholder_ssid(b)),
            signal: signal.min(100),
            security,
            is_known: false,
            is_active: false,
            interface: None,
        }
    }

    /// The SSID, unless the network is hidden
    pub fn named_ssid(&self) -> Option<&str> {
        self.ssid.as_deref().filter(|s| !is_placeholder_ssid(s))
    }

    pub fn is_hidden(&self) -> bool {
        self.named_ssid().is_none()
    }

    pub fn display_ssid(&self) -> &str {
        self.named_ssid().unwrap_or(HIDDEN_LABEL)
    }

    pub fn in_range(&self) -> bool {
        self.signal > 0
    }
}

/// A persisted NetworkManager connection profile
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionProfile {
    pub name: String,
    pub uuid: String,
    /// nmcli TYPE column (`wifi`, `802-11-wireless`, `ethernet`, ...)
    pub kind: String,
    pub device: Option<String>,
    pub ssid: Option<String>,
}

impl ConnectionProfile {
    pub fn is_wifi(&self) -> bool {
        matches!(self.kind.as_str(), "wifi" | "802-11-wireless")
    }

    /// Index key: the SSID, falling back to the profile name
    pub fn key(&self) -> Option<&str> {
        self.ssid
            .as_deref()
            .filter(|s| !is_placeholder_ssid(s))
            .or_else(|| Some(self.name.as_str()).filter(|n| !is_placeholder_ssid(n)))
    }

    /// Identifier accepted by `connection up/down/delete`: name, then UUID, then SSID
    pub fn identifier(&self) -> Option<&str> {
        [Some(self.name.as_str()), Some(self.uuid.as_str()), self.ssid.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !is_placeholder_ssid(s))
    }

    pub fn same_profile(&self, other: &ConnectionProfile) -> bool {
        if !self.uuid.is_empty() && !other.uuid.is_empty() {
            self.uuid == other.uuid
        } else {
            self.name == other.name
        }
    }
}

/// Known WiFi profiles indexed by SSID. Ordered so iteration is deterministic.
pub type KnownProfiles = BTreeMap<String, ConnectionProfile>;

/// The profile currently bound to a wireless device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveConnection {
    pub profile: ConnectionProfile,
    pub device: Option<String>,
}

impl ActiveConnection {
    pub fn ssid(&self) -> Option<&str> {
        self.profile.key()
    }
}

/// Result of one known-networks refresh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownSnapshot {
    pub profiles: KnownProfiles,
    pub active: Option<ActiveConnection>,
}

/// WiFi radio state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioState {
    Enabled,
    Disabled,
}

impl RadioState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl fmt::Display for RadioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => write!(f, "enabled"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// IP-level details for one device (`nmcli device show <dev>`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceDetail {
    pub device: String,
    pub kind: String,
    pub state: String,
    pub connection: Option<String>,
    pub mac: String,
    pub ipv4: Option<IpNet>,
    pub gateway_v4: Option<String>,
    pub dns: Vec<String>,
    pub ipv6: Option<IpNet>,
    pub gateway_v6: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_psk_schemes_take_a_password_profile() {
        assert!(Security::WpaPsk.accepts_psk());
        assert!(Security::Wpa3Sae.accepts_psk());
        assert!(Security::Secured.accepts_psk());
        assert!(!Security::Enterprise.accepts_psk());
        assert!(!Security::Wep.accepts_psk());
        assert!(!Security::Open.accepts_psk());
    }

    #[test]
    fn security_from_nmcli_columns() {
        assert_eq!(Security::from_nmcli(""), Security::Open);
        assert_eq!(Security::from_nmcli("--"), Security::Open);
        assert_eq!(Security::from_nmcli("WPA2"), Security::WpaPsk);
        assert_eq!(Security::from_nmcli("WPA1 WPA2"), Security::WpaPsk);
        assert_eq!(Security::from_nmcli("WPA3 SAE"), Security::Wpa3Sae);
        assert_eq!(Security::from_nmcli("WPA2 802.1X"), Security::Enterprise);
        assert_eq!(Security::from_nmcli("WEP"), Security::Wep);
        assert_eq!(Security::from_nmcli("OWE"), Security::Secured);
    }

    #[test]
    fn placeholder_ssid_is_hidden() {
        let ap = AccessPoint::scanned("--", Some("AA:BB"), 40, Security::Open);
        assert!(ap.is_hidden());
        assert_eq!(ap.display_ssid(), HIDDEN_LABEL);
    }

    #[test]
    fn profile_identifier_falls_back() {
        let mut p = ConnectionProfile {
            name: String::new(),
            uuid: "1234".into(),
            kind: "wifi".into(),
            device: None,
            ssid: Some("Home".into()),
        };
        assert_eq!(p.identifier(), Some("1234"));
        p.uuid.clear();
        assert_eq!(p.identifier(), Some("Home"));
        p.ssid = None;
        assert_eq!(p.identifier(), None);
        assert_eq!(p.key(), None);
    }
}
