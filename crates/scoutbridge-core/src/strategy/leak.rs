// ── Leak sensor strategy ──

use std::collections::BTreeMap;

use scoutbridge_api::{Device, DeviceType, TriggerState};

use super::{ServiceStrategy, base_characteristics};
use crate::host::{CharacteristicKind, CharacteristicValue, ServiceKind};

/// Derives "leak detected" for water sensors from the vendor `dry`/`wet`
/// trigger state.
pub struct LeakStrategy;

impl LeakStrategy {
    fn leak_detected(device: &Device) -> Option<bool> {
        if device.device_type != DeviceType::WaterSensor {
            return None;
        }
        match device.trigger_state()? {
            TriggerState::Wet => Some(true),
            TriggerState::Dry => Some(false),
            _ => None,
        }
    }
}

impl ServiceStrategy for LeakStrategy {
    fn service(&self, device: &Device) -> Option<ServiceKind> {
        Self::leak_detected(device).map(|_| ServiceKind::LeakSensor)
    }

    fn characteristics(
        &self,
        device: &Device,
    ) -> BTreeMap<CharacteristicKind, CharacteristicValue> {
        let mut characteristics = base_characteristics(device);
        if let Some(detected) = Self::leak_detected(device) {
            characteristics.insert(CharacteristicKind::LeakDetected, detected.into());
        }
        characteristics
    }
}
