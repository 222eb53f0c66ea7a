// ── Motion sensor strategy ──

use std::collections::BTreeMap;

use scoutbridge_api::{Device, DeviceType, TriggerState};

use super::{ServiceStrategy, base_characteristics};
use crate::host::{CharacteristicKind, CharacteristicValue, ServiceKind};

/// Derives "motion detected" from the vendor trigger state of motion
/// sensors. Only `start`/`stop` are meaningful; any other state means the
/// reading is not applicable and the service is withheld.
pub struct MotionStrategy;

impl MotionStrategy {
    fn motion_detected(device: &Device) -> Option<bool> {
        if device.device_type != DeviceType::MotionSensor {
            return None;
        }
        match device.trigger_state()? {
            TriggerState::Start => Some(true),
            TriggerState::Stop => Some(false),
            _ => None,
        }
    }
}

impl ServiceStrategy for MotionStrategy {
    fn service(&self, device: &Device) -> Option<ServiceKind> {
        Self::motion_detected(device).map(|_| ServiceKind::MotionSensor)
    }

    fn characteristics(
        &self,
        device: &Device,
    ) -> BTreeMap<CharacteristicKind, CharacteristicValue> {
        let mut characteristics = base_characteristics(device);
        if let Some(detected) = Self::motion_detected(device) {
            characteristics.insert(CharacteristicKind::MotionDetected, detected.into());
        }
        characteristics
    }
}
