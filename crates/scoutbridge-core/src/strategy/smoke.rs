// ── Smoke sensor strategy ──

use std::collections::BTreeMap;

use scoutbridge_api::{Device, DeviceType, TriggerState};

use super::{ServiceStrategy, base_characteristics};
use crate::host::{CharacteristicKind, CharacteristicValue, ServiceKind};

/// Derives "smoke detected" for smoke alarms. A `testing` state sounds
/// the alarm and is surfaced as detected.
pub struct SmokeStrategy;

impl SmokeStrategy {
    fn smoke_detected(device: &Device) -> Option<bool> {
        if device.device_type != DeviceType::SmokeAlarm {
            return None;
        }
        match device.trigger_state()? {
            TriggerState::Ok => Some(false),
            TriggerState::Emergency | TriggerState::Testing => Some(true),
            _ => None,
        }
    }
}

impl ServiceStrategy for SmokeStrategy {
    fn service(&self, device: &Device) -> Option<ServiceKind> {
        Self::smoke_detected(device).map(|_| ServiceKind::SmokeSensor)
    }

    fn characteristics(
        &self,
        device: &Device,
    ) -> BTreeMap<CharacteristicKind, CharacteristicValue> {
        let mut characteristics = base_characteristics(device);
        if let Some(detected) = Self::smoke_detected(device) {
            characteristics.insert(CharacteristicKind::SmokeDetected, detected.into());
        }
        characteristics
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scoutbridge_api::{DeviceReport, Trigger};

    fn smoke_device(state: Option<TriggerState>) -> Device {
        Device {
            id: "dev-1".to_owned(),
            device_type: DeviceType::SmokeAlarm,
            name: "Landing".to_owned(),
            reported: Some(DeviceReport {
                trigger: state.map(|state| Trigger { state }),
                ..DeviceReport::default()
            }),
        }
    }

    #[test]
    fn ok_maps_to_no_smoke() {
        let device = smoke_device(Some(TriggerState::Ok));
        assert_eq!(SmokeStrategy.service(&device), Some(ServiceKind::SmokeSensor));
        assert_eq!(
            SmokeStrategy.characteristics(&device).get(&CharacteristicKind::SmokeDetected),
            Some(&CharacteristicValue::Bool(false))
        );
    }

    #[test]
    fn emergency_and_testing_map_to_smoke_detected() {
        for state in [TriggerState::Emergency, TriggerState::Testing] {
            let device = smoke_device(Some(state));
            assert_eq!(
                SmokeStrategy.characteristics(&device).get(&CharacteristicKind::SmokeDetected),
                Some(&CharacteristicValue::Bool(true)),
                "state: {state}"
            );
        }
    }

    #[test]
    fn absent_trigger_withholds_service() {
        let device = smoke_device(None);
        assert_eq!(SmokeStrategy.service(&device), None);
    }
}
