//! Accessory registry and sensor reconciliation core for scoutbridge.
//!
//! This crate owns the mapping from Scout device identities to the
//! accessory records a home-automation host exposes:
//!
//! - **[`SensorPlatform`]** — Central facade managing the full lifecycle:
//!   [`start()`](SensorPlatform::start) discovers the location's devices,
//!   registers accessories with the host, then spawns the event bridge
//!   (and, when configured, a periodic rediscovery task).
//!   [`configure_accessory()`](SensorPlatform::configure_accessory)
//!   re-indexes host-persisted records before discovery on warm starts.
//!
//! - **Service strategies** ([`strategy`]) — One per sensor facet
//!   (motion, temperature, contact, leak, smoke, humidity). Each derives
//!   service applicability and characteristic values from the same
//!   optional reading, so absence always propagates: no service is
//!   exposed whose defining characteristic cannot be computed, and no
//!   missing reading is replaced by a default.
//!
//! - **Host vocabulary** ([`host`]) — [`ServiceKind`],
//!   [`CharacteristicKind`], [`ServiceSnapshot`], and the
//!   [`AccessoryHost`] trait the embedding plugin implements.
//!
//! - **[`AccessoryStream`]** — Subscription handle over the registry for
//!   reactive consumers.
//!
//! Collaborator contracts (device directory, event listener) live in
//! `scoutbridge-api`; this crate performs no I/O of its own.

pub mod accessory;
pub mod config;
pub mod error;
pub mod host;
pub mod platform;
pub mod strategy;
pub mod stream;

mod registry;

// ── Primary re-exports ──────────────────────────────────────────────
pub use accessory::{ACCESSORY_NAMESPACE, AccessoryCategory, AccessoryRecord, accessory_uuid};
pub use config::PlatformConfig;
pub use error::CoreError;
pub use host::{
    AccessoryHost, CharacteristicKind, CharacteristicValue, HostError, ServiceKind,
    ServiceSnapshot,
};
pub use platform::{PLATFORM_NAME, PLUGIN_NAME, SensorPlatform};
pub use strategy::{ServiceStrategy, default_strategies};
pub use stream::{AccessoryStream, AccessoryWatchStream};
