//! Parsers for nmcli `-m multiline` output.

use std::collections::HashMap;

use ipnet::IpNet;
use tracing::debug;

use super::types::*;
use crate::error::{GatewayError, GatewayResult};

pub type Record = HashMap<String, String>;

pub const FIELD_SSID: &str = "SSID";
pub const FIELD_BSSID: &str = "BSSID";
pub const FIELD_SIGNAL: &str = "SIGNAL";
pub const FIELD_SECURITY: &str = "SECURITY";
pub const FIELD_NAME: &str = "NAME";
pub const FIELD_UUID: &str = "UUID";
pub const FIELD_TYPE: &str = "TYPE";
pub const FIELD_DEVICE: &str = "DEVICE";
pub const FIELD_PROFILE_SSID: &str = "802-11-wireless.ssid";

/// Split multiline output into records. A record ends when its first key repeats.
pub fn parse_multiline(output: &str) -> GatewayResult<Vec<Record>> {
    let mut records = Vec::new();
    let mut current = Record::new();
    let mut first_key: Option<String> = None;

    for (idx, line) in output.trim().lines().enumerate() {
        let trimmed = line.trim_start().trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = trimmed.split_once(':') else {
            // a leading banner line without a colon is tolerated
            if idx == 0 {
                continue;
            }
            return Err(GatewayError::parse(format!(
                "malformed line in multiline output: \"{trimmed}\""
            )));
        };
        let key = key.trim();
        // trailing spaces are significant in SSIDs
        let value = value.trim_start_matches([' ', '\t']);
        if key.is_empty() {
            return Err(GatewayError::parse(format!("empty key for value: \"{value}\"")));
        }

        match &first_key {
            None => first_key = Some(key.to_string()),
            Some(first) if first == key && !current.is_empty() => {
                records.push(std::mem::take(&mut current));
            }
            _ => {}
        }
        current.insert(key.to_string(), value.to_string());
    }

    if !current.is_empty() {
        records.push(current);
    }
    Ok(records)
}

fn field<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .map(String::as_str)
        .filter(|v| !is_placeholder_ssid(v.trim()))
}

pub fn access_point_from_record(record: &Record) -> AccessPoint {
    let signal = record
        .get(FIELD_SIGNAL)
        .and_then(|s| s.trim().parse::<u8>().ok())
        .unwrap_or(0);
    let security = Security::from_nmcli(record.get(FIELD_SECURITY).map_or("", String::as_str));
    AccessPoint::scanned(
        record.get(FIELD_SSID).map_or("", String::as_str),
        field(record, FIELD_BSSID),
        signal,
        security,
    )
}

pub fn profile_from_record(record: &Record) -> ConnectionProfile {
    ConnectionProfile {
        name: record.get(FIELD_NAME).cloned().unwrap_or_default(),
        uuid: record.get(FIELD_UUID).cloned().unwrap_or_default(),
        kind: record.get(FIELD_TYPE).cloned().unwrap_or_default(),
        device: field(record, FIELD_DEVICE).map(str::to_string),
        ssid: field(record, FIELD_SSID)
            .or_else(|| field(record, FIELD_PROFILE_SSID))
            .map(str::to_string),
    }
}

/// NetworkManager device state codes
fn device_state_name(code: u32) -> Option<&'static str> {
    Some(match code {
        0 => "unknown",
        10 => "unmanaged",
        20 => "unavailable",
        30 => "disconnected",
        40 => "prepare",
        50 => "config",
        60 => "need-auth",
        70 => "ip-config",
        80 => "ip-check",
        90 => "secondaries",
        100 => "activated",
        110 => "deactivating",
        120 => "failed",
        _ => return None,
    })
}

/// `"100 (connected)"` → `"connected"`, `"30"` → `"disconnected"`
pub fn parse_device_state(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "unknown".into();
    }
    if let Some((code, rest)) = raw.split_once('(') {
        if code.trim().parse::<u32>().is_ok() {
            if let Some(desc) = rest.strip_suffix(')') {
                return desc.trim().to_string();
            }
        }
    }
    if let Ok(code) = raw.parse::<u32>() {
        return device_state_name(code)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Unknown code ({code})"));
    }
    raw.to_string()
}

fn parse_ip(raw: Option<&str>) -> Option<IpNet> {
    let raw = raw?;
    match raw.trim().parse::<IpNet>() {
        Ok(net) => Some(net),
        Err(e) => {
            debug!("Ignoring unparsable address {raw:?}: {e}");
            None
        }
    }
}

pub fn device_detail_from_record(record: &Record) -> DeviceDetail {
    let dns = ["IP4.DNS[1]", "IP4.DNS[2]"]
        .iter()
        .filter_map(|k| field(record, k))
        .filter_map(|v| v.split_whitespace().next())
        .map(str::to_string)
        .collect();

    DeviceDetail {
        device: record.get("GENERAL.DEVICE").cloned().unwrap_or_default(),
        kind: record.get("GENERAL.TYPE").cloned().unwrap_or_default(),
        state: parse_device_state(record.get("GENERAL.STATE").map_or("", String::as_str)),
        connection: field(record, "GENERAL.CONNECTION").map(str::to_string),
        mac: record.get("GENERAL.HWADDR").cloned().unwrap_or_default(),
        ipv4: parse_ip(field(record, "IP4.ADDRESS[1]")),
        gateway_v4: field(record, "IP4.GATEWAY").map(str::to_string),
        dns,
        ipv6: parse_ip(field(record, "IP6.ADDRESS[1]")),
        gateway_v6: field(record, "IP6.GATEWAY").map(str::to_string),
    }
}
