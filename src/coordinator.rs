//! Executes the side effects requested by the state machine.
//!
//! Every gateway call runs on its own tokio task and reports back through
//! the event queue as exactly one [`Outcome`]. Nothing here touches app
//! state; tasks get owned copies of what they need at dispatch time.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cache::Cache;
use crate::error::{GatewayError, GatewayResult};
use crate::event::{Event, OpId, Outcome, TimerEvent};
use crate::gateway::{
    AccessPoint, ActiveConnection, ConnectionProfile, KnownProfiles, KnownSnapshot, NetworkGateway,
};

/// Interface pattern for profiles created by airlink (any wireless device)
const ANY_INTERFACE: &str = "*";

/// A password that never shows up in `Debug` output or logs
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(********)")
    }
}

/// A side effect requested by [`crate::app::App::handle_event`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Scan {
        rescan: bool,
    },
    RefreshKnown,
    Connect {
        op: OpId,
        ssid: String,
        password: Option<Secret>,
        hidden: bool,
        /// Replace any stored profile for this SSID before activating
        recreate: bool,
    },
    Disconnect {
        op: OpId,
        identifier: String,
    },
    Forget {
        op: OpId,
        identifier: String,
    },
    SetRadio {
        enable: bool,
    },
    RadioStatus,
    FetchDeviceDetail {
        device: String,
    },
    SaveCache(Vec<AccessPoint>),
    StartConnectTimer {
        op: OpId,
        after: Duration,
    },
    ClearStatusAfter {
        token: u64,
        after: Duration,
    },
}

pub struct Coordinator {
    gateway: Arc<dyn NetworkGateway>,
    tx: mpsc::UnboundedSender<Event>,
    cache: Option<Cache>,
}

impl Coordinator {
    pub fn new(
        gateway: Arc<dyn NetworkGateway>,
        tx: mpsc::UnboundedSender<Event>,
        cache: Option<Cache>,
    ) -> Self {
        Self { gateway, tx, cache }
    }

    pub fn dispatch(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.spawn(effect);
        }
    }

    fn spawn(&self, effect: Effect) {
        debug!("Dispatching {effect:?}");
        let gateway = self.gateway.clone();
        let tx = self.tx.clone();

        match effect {
            Effect::Scan { rescan } => {
                tokio::spawn(async move {
                    let result = gateway.list_access_points(rescan).await;
                    send(&tx, Event::Gateway(Outcome::Scanned(result)));
                });
            }
            Effect::RefreshKnown => {
                tokio::spawn(async move {
                    let result = fetch_known(gateway.as_ref()).await;
                    send(&tx, Event::Gateway(Outcome::Known(result)));
                });
            }
            Effect::Connect {
                op,
                ssid,
                password,
                hidden,
                recreate,
            } => {
                tokio::spawn(async move {
                    let password = password.as_ref().map(Secret::expose);
                    let result =
                        connect_robustly(gateway.as_ref(), &ssid, password, hidden, recreate).await;
                    match &result {
                        Ok(()) => info!("Connected to '{ssid}'"),
                        Err(e) => warn!("Connecting to '{ssid}' failed: {e}"),
                    }
                    send(&tx, Event::Gateway(Outcome::Connected { op, ssid, result }));
                });
            }
            Effect::Disconnect { op, identifier } => {
                tokio::spawn(async move {
                    let result = gateway.connection_down(&identifier).await;
                    send(
                        &tx,
                        Event::Gateway(Outcome::Disconnected {
                            op,
                            identifier,
                            result,
                        }),
                    );
                });
            }
            Effect::Forget { op, identifier } => {
                tokio::spawn(async move {
                    let result = gateway.connection_delete(&identifier).await;
                    send(
                        &tx,
                        Event::Gateway(Outcome::Forgotten {
                            op,
                            identifier,
                            result,
                        }),
                    );
                });
            }
            Effect::SetRadio { enable } => {
                tokio::spawn(async move {
                    let result = if enable {
                        gateway.radio_on().await
                    } else {
                        gateway.radio_off().await
                    };
                    send(&tx, Event::Gateway(Outcome::RadioToggled(result)));
                });
            }
            Effect::RadioStatus => {
                tokio::spawn(async move {
                    let result = gateway.radio_status().await;
                    send(&tx, Event::Gateway(Outcome::RadioStatus(result)));
                });
            }
            Effect::FetchDeviceDetail { device } => {
                tokio::spawn(async move {
                    let result = gateway.device_ip_detail(&device).await;
                    send(&tx, Event::Gateway(Outcome::DeviceDetail(result)));
                });
            }
            Effect::SaveCache(access_points) => {
                let Some(cache) = self.cache.clone() else {
                    return;
                };
                tokio::spawn(async move {
                    if let Err(e) = cache.save(&access_points).await {
                        warn!("Failed to write network cache: {e}");
                    }
                });
            }
            Effect::StartConnectTimer { op, after } => {
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    send(&tx, Event::Timer(TimerEvent::ConnectTimeout { op }));
                });
            }
            Effect::ClearStatusAfter { token, after } => {
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    send(&tx, Event::Timer(TimerEvent::ClearStatus { token }));
                });
            }
        }
    }
}

fn send(tx: &mpsc::UnboundedSender<Event>, event: Event) {
    if tx.send(event).is_err() {
        debug!("Event queue closed; dropping background result");
    }
}

// ── Gateway workflows ─────────────────────────────────────────────────

/// Connect, falling back to a freshly created WPA-PSK profile when the
/// plain attempt is refused for missing secrets and a password is at hand.
pub async fn connect_robustly(
    gateway: &dyn NetworkGateway,
    ssid: &str,
    password: Option<&str>,
    hidden: bool,
    recreate: bool,
) -> GatewayResult<()> {
    let password = password.filter(|p| !p.is_empty());

    if recreate {
        if let Some(password) = password {
            debug!("Replacing stored profile for '{ssid}'");
            return recreate_profile(gateway, ssid, password).await;
        }
    }

    let err = match gateway.connect(ssid, password, hidden).await {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };
    match password {
        Some(password) if err.is_secrets_required() => {
            info!("Plain connect to '{ssid}' needs secrets; configuring an explicit profile");
            recreate_profile(gateway, ssid, password)
                .await
                .map_err(|setup| {
                    GatewayError::new(
                        setup.kind,
                        format!("connect failed ({err}), and profile setup also failed ({setup})"),
                    )
                })
        }
        _ => Err(err),
    }
}

async fn recreate_profile(
    gateway: &dyn NetworkGateway,
    ssid: &str,
    password: &str,
) -> GatewayResult<()> {
    match gateway.list_connection_profiles(false).await {
        Ok(profiles) => {
            for profile in profiles.iter().filter(|p| matches_ssid(p, ssid)) {
                let Some(identifier) = profile.identifier() else {
                    continue;
                };
                match gateway.connection_delete(identifier).await {
                    Ok(()) => debug!("Deleted stale profile '{identifier}'"),
                    Err(e) => warn!("Could not delete stale profile '{identifier}': {e}"),
                }
            }
        }
        Err(e) => warn!("Could not list profiles before recreating '{ssid}': {e}"),
    }

    gateway
        .add_psk_profile(ssid, ANY_INTERFACE, ssid, password)
        .await?;
    gateway.connection_up(ssid).await
}

fn matches_ssid(profile: &ConnectionProfile, ssid: &str) -> bool {
    profile.is_wifi() && (profile.name == ssid || profile.ssid.as_deref() == Some(ssid))
}

/// All Wi-Fi profiles keyed by SSID, plus the active one.
///
/// When two profiles share an SSID the active one wins, otherwise the
/// first in name order.
pub async fn fetch_known(gateway: &dyn NetworkGateway) -> GatewayResult<KnownSnapshot> {
    let all = gateway.list_connection_profiles(false).await?;
    let active_profiles = match gateway.list_connection_profiles(true).await {
        Ok(active) => active,
        Err(e) => {
            warn!("Could not list active connections: {e}");
            Vec::new()
        }
    };
    let active_wifi = active_profiles.into_iter().find(ConnectionProfile::is_wifi);

    let is_active = |p: &ConnectionProfile| active_wifi.as_ref().is_some_and(|a| a.same_profile(p));

    let mut profiles = KnownProfiles::new();
    for profile in all.into_iter().filter(ConnectionProfile::is_wifi) {
        let Some(key) = profile.key().map(str::to_string) else {
            debug!("Skipping profile without a usable name: {:?}", profile.uuid);
            continue;
        };
        let replace = match profiles.get(&key) {
            None => true,
            Some(existing) => !is_active(existing) && is_active(&profile),
        };
        if replace {
            profiles.insert(key, profile);
        }
    }

    let active = active_wifi.map(|record| {
        let device = record.device.clone();
        let profile = profiles
            .values()
            .find(|p| p.same_profile(&record))
            .cloned()
            .unwrap_or(record);
        ActiveConnection { profile, device }
    });

    debug!(
        "Known networks: {} profiles, active: {:?}",
        profiles.len(),
        active.as_ref().map(|a| a.profile.name.as_str())
    );
    Ok(KnownSnapshot { profiles, active })
}
