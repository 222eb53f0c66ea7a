// ── Contact sensor strategy ──

use std::collections::BTreeMap;

use scoutbridge_api::{Device, DeviceType, TriggerState};

use super::{ServiceStrategy, base_characteristics};
use crate::host::{CharacteristicKind, CharacteristicValue, ServiceKind};

/// Derives contact state for door panels and access sensors from the
/// vendor `open`/`close` trigger state.
pub struct ContactStrategy;

impl ContactStrategy {
    fn contact_open(device: &Device) -> Option<bool> {
        if !matches!(
            device.device_type,
            DeviceType::DoorPanel | DeviceType::AccessSensor
        ) {
            return None;
        }
        match device.trigger_state()? {
            TriggerState::Open => Some(true),
            TriggerState::Close => Some(false),
            _ => None,
        }
    }
}

impl ServiceStrategy for ContactStrategy {
    fn service(&self, device: &Device) -> Option<ServiceKind> {
        Self::contact_open(device).map(|_| ServiceKind::ContactSensor)
    }

    fn characteristics(
        &self,
        device: &Device,
    ) -> BTreeMap<CharacteristicKind, CharacteristicValue> {
        let mut characteristics = base_characteristics(device);
        if let Some(open) = Self::contact_open(device) {
            characteristics.insert(CharacteristicKind::ContactOpen, open.into());
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

    fn device(device_type: DeviceType, state: Option<TriggerState>) -> Device {
        Device {
            id: "dev-1".to_owned(),
            device_type,
            name: "Front Door".to_owned(),
            reported: Some(DeviceReport {
                trigger: state.map(|state| Trigger { state }),
                ..DeviceReport::default()
            }),
        }
    }

    #[test]
    fn door_panel_open_and_close_map_to_contact_state() {
        let open = device(DeviceType::DoorPanel, Some(TriggerState::Open));
        assert_eq!(ContactStrategy.service(&open), Some(ServiceKind::ContactSensor));
        assert_eq!(
            ContactStrategy.characteristics(&open).get(&CharacteristicKind::ContactOpen),
            Some(&CharacteristicValue::Bool(true))
        );

        let closed = device(DeviceType::AccessSensor, Some(TriggerState::Close));
        assert_eq!(
            ContactStrategy.characteristics(&closed).get(&CharacteristicKind::ContactOpen),
            Some(&CharacteristicValue::Bool(false))
        );
    }

    #[test]
    fn foreign_state_withholds_service() {
        let device = device(DeviceType::AccessSensor, Some(TriggerState::Wet));
        assert_eq!(ContactStrategy.service(&device), None);
    }

    #[test]
    fn non_contact_device_is_not_applicable() {
        let device = device(DeviceType::MotionSensor, Some(TriggerState::Open));
        assert_eq!(ContactStrategy.service(&device), None);
    }
}
