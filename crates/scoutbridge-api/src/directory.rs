// ── Device directory contract ──

use async_trait::async_trait;

use crate::device::Device;
use crate::error::Error;

/// Enumerates the devices paired with a location.
///
/// Implemented by the platform API client. May fail with a transport or
/// authentication error; callers propagate rather than retry — backoff
/// policy belongs to the implementation.
#[async_trait]
pub trait DeviceDirectory: Send + Sync {
    async fn get_devices(&self, location_id: &str) -> Result<Vec<Device>, Error>;
}
