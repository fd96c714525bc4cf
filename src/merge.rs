//! Reconciles the scanned access points with the known profiles and the
//! active connection into one ordered, deduplicated list.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::gateway::{AccessPoint, ActiveConnection, ConnectionProfile, KnownProfiles, Security};

/// Where a list entry came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    ScannedOnly,
    KnownOnly(ConnectionProfile),
    ScannedAndKnown(ConnectionProfile),
}

/// One row of the network list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkEntry {
    pub ap: AccessPoint,
    pub source: Source,
}

impl NetworkEntry {
    pub fn profile(&self) -> Option<&ConnectionProfile> {
        match &self.source {
            Source::ScannedOnly => None,
            Source::KnownOnly(p) | Source::ScannedAndKnown(p) => Some(p),
        }
    }

    pub fn ssid(&self) -> Option<&str> {
        self.ap.named_ssid()
    }
}

/// Inputs of one merge pass; all borrowed from the app's authoritative state
#[derive(Debug, Clone, Copy)]
pub struct MergeInput<'a> {
    pub scanned: &'a [AccessPoint],
    pub known: &'a KnownProfiles,
    pub active: Option<&'a ActiveConnection>,
    pub show_hidden: bool,
    pub filter: Option<&'a str>,
}

/// Run the full pipeline: dedup, inject known, hide, enrich, sort, filter.
pub fn merge(input: &MergeInput<'_>) -> Vec<NetworkEntry> {
    let deduped = dedup_scanned(input.scanned);

    let scanned_ssids: BTreeSet<&str> = deduped.iter().filter_map(|ap| ap.named_ssid()).collect();

    let mut aps = deduped.clone();
    for (ssid, _) in input.known.iter() {
        if !scanned_ssids.contains(ssid.as_str()) {
            aps.push(AccessPoint {
                ssid: Some(ssid.clone()),
                bssid: None,
                signal: 0,
                security: Security::Secured,
                is_known: true,
                is_active: false,
                interface: None,
            });
        }
    }

    let active = input.active.filter(|active| {
        let resolvable = active
            .ssid()
            .is_some_and(|ssid| scanned_ssids.contains(ssid) || input.known.contains_key(ssid));
        if !resolvable {
            warn!(
                "Active connection '{}' matches no scanned or known network; ignoring it",
                active.profile.name
            );
        }
        resolvable
    });
    if let Some(active) = active {
        if let Some(ssid) = active.ssid() {
            if !scanned_ssids.contains(ssid) {
                debug!("Active network '{ssid}' is not visible in the current scan");
            }
        }
    }

    let mut entries: Vec<NetworkEntry> = aps
        .into_iter()
        .filter(|ap| input.show_hidden || !ap.is_hidden())
        .map(|ap| enrich(ap, input.known, active))
        .collect();

    entries.sort_by(|a, b| compare(&a.ap, &b.ap));

    match input.filter {
        Some(query) => apply_filter(&entries, query),
        None => entries,
    }
}

/// Keep the strongest reading per SSID. Hidden networks are keyed by BSSID,
/// or kept distinct when that is missing too.
fn dedup_scanned(scanned: &[AccessPoint]) -> Vec<AccessPoint> {
    #[derive(PartialEq, Eq, Hash)]
    enum Key<'a> {
        Ssid(&'a str),
        Bssid(&'a str),
        Ordinal(usize),
    }

    let mut slots: HashMap<Key<'_>, usize> = HashMap::new();
    let mut out: Vec<AccessPoint> = Vec::new();

    for (ordinal, ap) in scanned.iter().enumerate() {
        let key = match (ap.named_ssid(), ap.bssid.as_deref()) {
            (Some(ssid), _) => Key::Ssid(ssid),
            (None, Some(bssid)) => Key::Bssid(bssid),
            (None, None) => Key::Ordinal(ordinal),
        };
        match slots.get(&key) {
            Some(&idx) => {
                if ap.signal > out[idx].signal {
                    out[idx] = ap.clone();
                }
            }
            None => {
                slots.insert(key, out.len());
                out.push(ap.clone());
            }
        }
    }
    out
}

fn enrich(
    mut ap: AccessPoint,
    known: &KnownProfiles,
    active: Option<&ActiveConnection>,
) -> NetworkEntry {
    let scanned = ap.in_range() || ap.bssid.is_some();
    ap.is_known = false;
    ap.is_active = false;
    ap.interface = None;

    let profile = ap.named_ssid().and_then(|ssid| known.get(ssid)).cloned();
    let Some(profile) = profile else {
        return NetworkEntry {
            ap,
            source: Source::ScannedOnly,
        };
    };

    ap.is_known = true;
    if let Some(active) = active {
        if active.profile.same_profile(&profile) {
            ap.is_active = true;
            ap.interface = active.device.clone().or_else(|| profile.device.clone());
        }
    }
    let source = if scanned {
        Source::ScannedAndKnown(profile)
    } else {
        Source::KnownOnly(profile)
    };
    NetworkEntry { ap, source }
}

/// Active, known, in range (for known), signal, named, then SSID.
fn compare(a: &AccessPoint, b: &AccessPoint) -> Ordering {
    b.is_active
        .cmp(&a.is_active)
        .then_with(|| b.is_known.cmp(&a.is_known))
        .then_with(|| {
            if a.is_known && b.is_known {
                b.in_range().cmp(&a.in_range())
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| b.signal.cmp(&a.signal))
        .then_with(|| a.is_hidden().cmp(&b.is_hidden()))
        .then_with(|| {
            let la = a.display_ssid().to_lowercase();
            let lb = b.display_ssid().to_lowercase();
            la.cmp(&lb)
        })
        .then_with(|| a.ssid.cmp(&b.ssid))
        .then_with(|| a.bssid.cmp(&b.bssid))
}

/// Case-insensitive substring filter over the display SSID. An empty query keeps everything.
pub fn apply_filter(entries: &[NetworkEntry], query: &str) -> Vec<NetworkEntry> {
    if query.trim().is_empty() {
        return entries.to_vec();
    }
    let query = query.to_lowercase();
    entries
        .iter()
        .filter(|e| e.ap.display_ssid().to_lowercase().contains(&query))
        .cloned()
        .collect()
}
