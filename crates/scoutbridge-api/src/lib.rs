//! Device model and collaborator contracts for the Scout security platform.
//!
//! This crate defines the *contracts* the reconciliation core depends on,
//! not their implementations:
//!
//! - **Domain model** ([`device`]) — the [`Device`] snapshot as reported by
//!   the platform: a stable identity, a device type, and a
//!   partially-populated [`DeviceReport`]. Absent report fields mean
//!   "unknown", never a default.
//!
//! - **Events** ([`events`]) — [`DeviceTriggerEvent`] (state change carrying
//!   a fresh snapshot) and [`DevicePairEvent`] (pair/unpair), unified as
//!   [`DeviceEvent`] for channel delivery.
//!
//! - **Collaborator traits** — [`DeviceDirectory`] (device enumeration for a
//!   location) and [`DeviceListener`] (push-event subscription). Concrete
//!   HTTP/websocket clients implement these; this crate never performs I/O.

pub mod device;
pub mod directory;
pub mod error;
pub mod events;
pub mod listener;

// ── Primary re-exports ──────────────────────────────────────────────
pub use device::{
    BatteryReport, Device, DeviceReport, DeviceType, Humidity, Temperature, Trigger, TriggerState,
};
pub use directory::DeviceDirectory;
pub use error::Error;
pub use events::{DeviceEvent, DeviceEventType, DevicePairEvent, DeviceTriggerEvent};
pub use listener::DeviceListener;
