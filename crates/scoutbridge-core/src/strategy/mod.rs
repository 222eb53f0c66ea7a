// ── Service strategies ──
//
// One strategy per sensor facet. Each decides whether its service is
// applicable to an accessory's current device snapshot and computes the
// characteristic values for it. The two questions are answered from the
// same underlying optional reading, so a service is never exposed when
// its defining characteristic cannot be derived, and no reading is ever
// substituted with a default.

mod contact;
mod humidity;
mod leak;
mod motion;
mod smoke;
mod temperature;

use std::collections::BTreeMap;

use scoutbridge_api::Device;

use crate::host::{CharacteristicKind, CharacteristicValue, ServiceKind};

pub use contact::ContactStrategy;
pub use humidity::HumidityStrategy;
pub use leak::LeakStrategy;
pub use motion::MotionStrategy;
pub use smoke::SmokeStrategy;
pub use temperature::TemperatureStrategy;

/// A capability strategy, evaluated against a device snapshot every time
/// the snapshot changes.
pub trait ServiceStrategy: Send + Sync {
    /// The service to expose for `device`, or `None` when the defining
    /// reading cannot be derived from the current snapshot.
    fn service(&self, device: &Device) -> Option<ServiceKind>;

    /// Characteristic values for the service, including the shared base
    /// set from [`base_characteristics`].
    fn characteristics(
        &self,
        device: &Device,
    ) -> BTreeMap<CharacteristicKind, CharacteristicValue>;
}

/// Characteristics applicable to every sensor kind: fault status from the
/// hub's timeout flag and low-battery status from the battery report.
/// Each entry is omitted entirely when its reading is absent.
pub fn base_characteristics(device: &Device) -> BTreeMap<CharacteristicKind, CharacteristicValue> {
    let mut characteristics = BTreeMap::new();

    if let Some(report) = device.reported.as_ref() {
        if let Some(timedout) = report.timedout {
            characteristics.insert(CharacteristicKind::StatusFault, timedout.into());
        }
        if let Some(low) = report.battery.as_ref().and_then(|b| b.low) {
            characteristics.insert(CharacteristicKind::StatusLowBattery, low.into());
        }
    }

    characteristics
}

/// The full strategy set, one per supported sensor facet.
pub fn default_strategies() -> Vec<Box<dyn ServiceStrategy>> {
    vec![
        Box::new(ContactStrategy),
        Box::new(HumidityStrategy),
        Box::new(LeakStrategy),
        Box::new(MotionStrategy),
        Box::new(SmokeStrategy),
        Box::new(TemperatureStrategy),
    ]
}
