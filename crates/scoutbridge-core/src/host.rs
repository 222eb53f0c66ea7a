// ── Host runtime contract ──
//
// The accessory-hosting runtime (registration, persistence, presentation
// to connected clients) is an external collaborator. This module defines
// the vocabulary the core maps strategy output into, and the trait a
// host adapter implements.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

use crate::accessory::AccessoryRecord;

/// A host-runtime-recognized capability grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ServiceKind {
    MotionSensor,
    TemperatureSensor,
    ContactSensor,
    LeakSensor,
    SmokeSensor,
    HumiditySensor,
}

/// A single named value within a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CharacteristicKind {
    /// `true` while the sensor observes motion.
    MotionDetected,
    /// Degrees Celsius.
    CurrentTemperature,
    /// Percent relative humidity.
    CurrentRelativeHumidity,
    /// `true` while the contact is open.
    ContactOpen,
    LeakDetected,
    SmokeDetected,
    /// `true` while the hub reports the device timed out.
    StatusFault,
    StatusLowBattery,
}

/// A characteristic value, typed as the host vocabulary expects it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharacteristicValue {
    Bool(bool),
    Float(f64),
}

impl From<bool> for CharacteristicValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for CharacteristicValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// The current state of one exposed service on an accessory.
///
/// Only *present* services are pushed to the host; evicting services and
/// characteristics that are no longer derivable is the host's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSnapshot {
    pub kind: ServiceKind,
    pub characteristics: BTreeMap<CharacteristicKind, CharacteristicValue>,
}

/// Errors surfaced by a host adapter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HostError {
    #[error("Accessory registration failed: {message}")]
    Registration { message: String },

    #[error("Accessory unregistration failed: {message}")]
    Unregistration { message: String },

    #[error("Accessory update failed: {message}")]
    Update { message: String },
}

/// The accessory-hosting runtime.
///
/// `plugin_id` and `platform_id` scope the records within the host's
/// persistence, matching the host's registration vocabulary.
#[async_trait]
pub trait AccessoryHost: Send + Sync {
    async fn register_accessories(
        &self,
        plugin_id: &str,
        platform_id: &str,
        records: &[AccessoryRecord],
    ) -> Result<(), HostError>;

    async fn unregister_accessories(
        &self,
        plugin_id: &str,
        platform_id: &str,
        records: &[AccessoryRecord],
    ) -> Result<(), HostError>;

    /// Push the current service state for one accessory so connected
    /// clients observe it.
    async fn update_accessory(
        &self,
        record: &AccessoryRecord,
        services: &[ServiceSnapshot],
    ) -> Result<(), HostError>;
}
