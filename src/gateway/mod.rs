pub mod nmcli;
pub mod parse;
pub mod types;

use async_trait::async_trait;

use crate::error::GatewayResult;
pub use nmcli::Nmcli;
pub use types::*;

/// Narrow boundary to the host network manager.
///
/// Every call may block for seconds (a rescan can take ~15s), so the
/// coordinator only ever awaits these from spawned tasks.
#[async_trait]
pub trait NetworkGateway: Send + Sync {
    async fn list_access_points(&self, rescan: bool) -> GatewayResult<Vec<AccessPoint>>;

    async fn list_connection_profiles(
        &self,
        active_only: bool,
    ) -> GatewayResult<Vec<ConnectionProfile>>;

    async fn connect(&self, ssid: &str, password: Option<&str>, hidden: bool) -> GatewayResult<()>;

    async fn add_psk_profile(
        &self,
        name: &str,
        interface_pattern: &str,
        ssid: &str,
        password: &str,
    ) -> GatewayResult<()>;

    async fn connection_up(&self, identifier: &str) -> GatewayResult<()>;

    async fn connection_down(&self, identifier: &str) -> GatewayResult<()>;

    async fn connection_delete(&self, identifier: &str) -> GatewayResult<()>;

    async fn radio_on(&self) -> GatewayResult<RadioState>;

    async fn radio_off(&self) -> GatewayResult<RadioState>;

    async fn radio_status(&self) -> GatewayResult<RadioState>;

    async fn device_ip_detail(&self, device: &str) -> GatewayResult<DeviceDetail>;
}
