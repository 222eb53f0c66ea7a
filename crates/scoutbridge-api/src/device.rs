// ── Device snapshot model ──
//
// The canonical representation of a Scout device as the platform reports
// it. Every field under `reported` is optional and type-dependent: a
// missing field means the platform does not know the value, and consumers
// must treat it as "not applicable" rather than substituting a default.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::Display;

/// The kind of physical device, as tagged on the wire.
///
/// Only the sensor types are modeled; anything else the platform emits
/// lands in [`Unknown`](Self::Unknown) and is ignored downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum DeviceType {
    DoorPanel,
    AccessSensor,
    MotionSensor,
    WaterSensor,
    SmokeAlarm,
    #[serde(other)]
    Unknown,
}

/// Vendor trigger state, shared across sensor kinds.
///
/// The wire value is a single `state` string whose vocabulary depends on
/// the device type (`start`/`stop` for motion, `open`/`close` for contact
/// sensors, `dry`/`wet` for water, `ok`/`testing`/`emergency` for smoke).
/// Unrecognized values decode to [`Unknown`](Self::Unknown), which every
/// derivation treats as "not applicable".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum TriggerState {
    Start,
    Stop,
    Open,
    Close,
    Dry,
    Wet,
    Ok,
    Testing,
    Emergency,
    #[serde(other)]
    Unknown,
}

/// The `trigger` sub-record of a device report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub state: TriggerState,
}

/// Temperature reading in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub degrees: f64,
}

/// Relative humidity reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Humidity {
    pub percent: f64,
}

/// Battery status sub-record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatteryReport {
    /// Set when the platform has judged the battery low.
    pub low: Option<bool>,
}

/// The loosely-typed `reported` sub-record of a device snapshot.
///
/// Every field is optional. Fields irrelevant to a device's type are
/// simply never populated; fields relevant to its type may still be
/// absent when the platform has no current value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceReport {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub fw_version: Option<String>,

    pub temperature: Option<Temperature>,
    pub humidity: Option<Humidity>,
    pub trigger: Option<Trigger>,
    pub battery: Option<BatteryReport>,

    /// Set when the hub has lost contact with the device.
    pub timedout: Option<bool>,

    /// Mesh network address. Only present on the vendor's legacy
    /// mesh-protocol hardware, which reports unreliable motion data.
    pub mesh_address: Option<String>,

    /// Report fields this model does not interpret, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A device snapshot: the latest known state of one physical sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Stable identity, unique within a location.
    pub id: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub name: String,
    pub reported: Option<DeviceReport>,
}

impl Device {
    /// The trigger state, if the report carries one.
    pub fn trigger_state(&self) -> Option<TriggerState> {
        self.reported.as_ref()?.trigger.map(|t| t.state)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.device_type, self.id)
    }
}
