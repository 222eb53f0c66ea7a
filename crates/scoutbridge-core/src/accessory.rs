// ── Accessory records ──
//
// The virtual device object handed to the host runtime. Identity is a
// deterministic v5 UUID over the device id so that host-side persistence
// reattaches to the same accessory across restarts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scoutbridge_api::Device;

/// Namespace for accessory UUIDs. Changing this orphans every accessory
/// the host runtime has persisted.
pub const ACCESSORY_NAMESPACE: Uuid = uuid::uuid!("8f5bcdd1-6c33-4f4f-9be2-2b4c3d1f5e6a");

/// Manufacturer reported to the host when the device doesn't name one.
pub const DEFAULT_MANUFACTURER: &str = "Scout";

const UNKNOWN: &str = "unknown";

/// Accessory category exposed to the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AccessoryCategory {
    Sensor,
}

/// One exposed virtual device.
///
/// Exclusively owned by the registry; the host runtime holds a copy for
/// presentation, but only the registry mutates the snapshot association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessoryRecord {
    /// Stable host-runtime identity, derived from the device id.
    pub uuid: Uuid,
    /// The device identity this accessory mirrors.
    pub device_id: String,
    pub name: String,
    pub category: AccessoryCategory,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
    pub firmware_revision: String,
    /// Latest known device snapshot. Replaced wholesale on trigger
    /// events -- never merged field-by-field.
    pub device: Device,
}

/// Deterministic accessory UUID for a device identity.
pub fn accessory_uuid(device_id: &str) -> Uuid {
    Uuid::new_v5(&ACCESSORY_NAMESPACE, device_id.as_bytes())
}

impl AccessoryRecord {
    /// Build a record from a device snapshot, applying the fallback
    /// defaults for identity fields the report doesn't carry.
    pub fn from_device(device: Device) -> Self {
        let reported = device.reported.as_ref();
        Self {
            uuid: accessory_uuid(&device.id),
            device_id: device.id.clone(),
            name: device.name.clone(),
            category: AccessoryCategory::Sensor,
            manufacturer: reported
                .and_then(|r| r.manufacturer.clone())
                .unwrap_or_else(|| DEFAULT_MANUFACTURER.to_owned()),
            model: reported
                .and_then(|r| r.model.clone())
                .unwrap_or_else(|| UNKNOWN.to_owned()),
            serial_number: device.id.clone(),
            firmware_revision: reported
                .and_then(|r| r.fw_version.clone())
                .unwrap_or_else(|| UNKNOWN.to_owned()),
            device,
        }
    }

    /// Replace the associated snapshot. Identity and presentation fields
    /// keep their values from creation time.
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }
}
