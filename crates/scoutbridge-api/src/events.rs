// ── Push-event payloads ──
//
// Asynchronous notifications delivered by the event-listener transport.
// A trigger event carries a full device snapshot (not a delta); a pair
// event carries only the identity and the pairing direction.

use serde::{Deserialize, Serialize};

use crate::device::Device;

/// The direction of a pairing change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DeviceEventType {
    Paired,
    Unpaired,
}

/// A device's reported state changed.
///
/// The payload is a complete snapshot — consumers replace, never merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceTriggerEvent {
    pub location_id: String,
    #[serde(flatten)]
    pub device: Device,
}

/// A device was paired with or unpaired from a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevicePairEvent {
    /// Identity of the affected device.
    pub id: String,
    pub location_id: String,
    pub event: DeviceEventType,
}

/// Unified event as delivered on the listener channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceEvent {
    Trigger(DeviceTriggerEvent),
    Pair(DevicePairEvent),
}

impl DeviceEvent {
    /// The identity of the device this event concerns.
    pub fn device_id(&self) -> &str {
        match self {
            Self::Trigger(e) => &e.device.id,
            Self::Pair(e) => &e.id,
        }
    }

    pub fn location_id(&self) -> &str {
        match self {
            Self::Trigger(e) => &e.location_id,
            Self::Pair(e) => &e.location_id,
        }
    }
}
