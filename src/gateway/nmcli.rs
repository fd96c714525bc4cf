use std::io::ErrorKind;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::parse::{self, Record};
use super::types::*;
use super::NetworkGateway;
use crate::error::{GatewayError, GatewayResult};

const KEY_MGMT_WPA_PSK: &str = "wpa-psk";

/// `NetworkGateway` backed by the `nmcli` command-line tool
pub struct Nmcli {
    program: String,
}

impl Nmcli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `nmcli --version`; used at startup to check the tool exists
    pub async fn version(&self) -> GatewayResult<String> {
        self.run(&["--version"]).await
    }

    async fn run(&self, args: &[&str]) -> GatewayResult<String> {
        let shown = redact(args).join(" ");
        debug!("Executing {} {}", self.program, shown);

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    GatewayError::unavailable(format!("'{}' was not found: {e}", self.program))
                }
                _ => GatewayError::unavailable(format!("failed to run '{}': {e}", self.program)),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            let message = if stderr.is_empty() {
                format!("nmcli command '{shown}' failed: {}", output.status)
            } else {
                format!("nmcli command '{shown}' failed: {stderr}")
            };
            debug!("{message}");
            return Err(GatewayError::classify(message));
        }
        if !stderr.is_empty() {
            warn!("nmcli command '{shown}' succeeded with stderr: {stderr}");
        }
        Ok(stdout)
    }

    async fn run_records(&self, args: &[&str]) -> GatewayResult<Vec<Record>> {
        let out = self.run(args).await?;
        parse::parse_multiline(&out)
    }

    /// The bulk profile listing has no SSID column; ask per profile.
    async fn profile_ssid(&self, profile: &ConnectionProfile) -> Option<String> {
        let (selector, value) = if profile.uuid.is_empty() {
            ("id", profile.name.as_str())
        } else {
            ("uuid", profile.uuid.as_str())
        };
        match self
            .run(&["-g", parse::FIELD_PROFILE_SSID, "connection", "show", selector, value])
            .await
        {
            Ok(out) => Some(out.replace("\\:", ":")).filter(|s| !is_placeholder_ssid(s)),
            Err(e) => {
                debug!("No SSID for profile '{}': {e}", profile.name);
                None
            }
        }
    }
}

fn require(value: &str, what: &str) -> GatewayResult<()> {
    if value.trim().is_empty() {
        Err(GatewayError::invalid(format!("{what} cannot be empty")))
    } else {
        Ok(())
    }
}

/// Mask the argument following any credential keyword so it never reaches the log
fn redact(args: &[&str]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut hide_next = false;
    for arg in args {
        if hide_next {
            out.push("********".to_string());
            hide_next = false;
        } else {
            hide_next = matches!(*arg, "password" | "wifi-sec.psk");
            out.push((*arg).to_string());
        }
    }
    out
}

fn parse_radio(out: &str) -> GatewayResult<RadioState> {
    match out.trim() {
        "enabled" => Ok(RadioState::Enabled),
        "disabled" => Ok(RadioState::Disabled),
        other => Err(GatewayError::parse(format!("unexpected radio state '{other}'"))),
    }
}

#[async_trait]
impl NetworkGateway for Nmcli {
    async fn list_access_points(&self, rescan: bool) -> GatewayResult<Vec<AccessPoint>> {
        let rescan = if rescan { "yes" } else { "no" };
        let records = self
            .run_records(&[
                "-m",
                "multiline",
                "-f",
                "IN-USE,BSSID,SSID,SIGNAL,SECURITY",
                "device",
                "wifi",
                "list",
                "--rescan",
                rescan,
            ])
            .await?;
        let aps: Vec<AccessPoint> = records.iter().map(parse::access_point_from_record).collect();
        debug!("Fetched {} access points", aps.len());
        Ok(aps)
    }

    async fn list_connection_profiles(
        &self,
        active_only: bool,
    ) -> GatewayResult<Vec<ConnectionProfile>> {
        let mut args = vec![
            "-m",
            "multiline",
            "-f",
            "NAME,UUID,TYPE,DEVICE",
            "connection",
            "show",
            "--order",
            "name",
        ];
        if active_only {
            args.push("--active");
        }
        let records = self.run_records(&args).await?;

        let mut profiles = Vec::with_capacity(records.len());
        for record in &records {
            let mut profile = parse::profile_from_record(record);
            if profile.is_wifi() && profile.ssid.is_none() {
                profile.ssid = self.profile_ssid(&profile).await;
            }
            profiles.push(profile);
        }
        Ok(profiles)
    }

    async fn connect(&self, ssid: &str, password: Option<&str>, hidden: bool) -> GatewayResult<()> {
        require(ssid, "SSID")?;
        let mut args = vec!["device", "wifi", "connect", ssid];
        if let Some(pw) = password.filter(|p| !p.is_empty()) {
            args.extend(["password", pw]);
        }
        if hidden {
            args.extend(["hidden", "yes"]);
        }
        self.run(&args).await.map(|_| ())
    }

    async fn add_psk_profile(
        &self,
        name: &str,
        interface_pattern: &str,
        ssid: &str,
        password: &str,
    ) -> GatewayResult<()> {
        require(name, "profile name")?;
        require(ssid, "SSID")?;
        require(password, "password for WPA-PSK")?;
        self.run(&[
            "connection",
            "add",
            "type",
            "wifi",
            "con-name",
            name,
            "ifname",
            interface_pattern,
            "ssid",
            ssid,
            "wifi-sec.key-mgmt",
            KEY_MGMT_WPA_PSK,
            "wifi-sec.psk",
            password,
        ])
        .await
        .map(|_| ())
    }

    async fn connection_up(&self, identifier: &str) -> GatewayResult<()> {
        require(identifier, "profile identifier")?;
        self.run(&["connection", "up", identifier]).await.map(|_| ())
    }

    async fn connection_down(&self, identifier: &str) -> GatewayResult<()> {
        require(identifier, "profile identifier")?;
        self.run(&["connection", "down", identifier]).await.map(|_| ())
    }

    async fn connection_delete(&self, identifier: &str) -> GatewayResult<()> {
        require(identifier, "profile identifier")?;
        self.run(&["connection", "delete", identifier]).await.map(|_| ())
    }

    async fn radio_on(&self) -> GatewayResult<RadioState> {
        self.run(&["radio", "wifi", "on"]).await?;
        Ok(RadioState::Enabled)
    }

    async fn radio_off(&self) -> GatewayResult<RadioState> {
        self.run(&["radio", "wifi", "off"]).await?;
        Ok(RadioState::Disabled)
    }

    async fn radio_status(&self) -> GatewayResult<RadioState> {
        let out = self.run(&["radio", "wifi"]).await?;
        parse_radio(&out)
    }

    async fn device_ip_detail(&self, device: &str) -> GatewayResult<DeviceDetail> {
        require(device, "device name")?;
        let records = self
            .run_records(&["-m", "multiline", "device", "show", device])
            .await?;
        records
            .first()
            .map(parse::device_detail_from_record)
            .ok_or_else(|| GatewayError::classify(format!("device '{device}' not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayErrorKind;

    #[test]
    fn credentials_are_redacted() {
        let shown = redact(&["device", "wifi", "connect", "Home", "password", "hunter22"]);
        assert_eq!(shown.last().unwrap(), "********");
        assert!(shown.contains(&"Home".to_string()));

        let shown = redact(&["wifi-sec.psk", "s3cret", "ssid", "Cafe"]);
        assert_eq!(shown, vec!["wifi-sec.psk", "********", "ssid", "Cafe"]);
    }

    #[test]
    fn radio_output() {
        assert_eq!(parse_radio("enabled\n").unwrap(), RadioState::Enabled);
        assert_eq!(parse_radio("disabled").unwrap(), RadioState::Disabled);
        assert_eq!(parse_radio("weird").unwrap_err().kind, GatewayErrorKind::Parse);
    }

    #[tokio::test]
    async fn missing_binary_is_unavailable() {
        let nm = Nmcli::new("/nonexistent/airlink-test-nmcli");
        let err = nm.version().await.unwrap_err();
        assert_eq!(err.kind, GatewayErrorKind::Unavailable);
    }

    #[tokio::test]
    async fn empty_arguments_are_rejected_before_spawning() {
        let nm = Nmcli::new("/nonexistent/airlink-test-nmcli");
        let err = nm.connection_delete("  ").await.unwrap_err();
        assert_eq!(err.kind, GatewayErrorKind::InvalidArgument);
        let err = nm.connect("", None, false).await.unwrap_err();
        assert_eq!(err.kind, GatewayErrorKind::InvalidArgument);
    }
}
