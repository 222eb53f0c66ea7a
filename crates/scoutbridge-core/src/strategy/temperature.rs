// ── Temperature sensor strategy ──

use std::collections::BTreeMap;

use scoutbridge_api::{Device, DeviceType};

use super::{ServiceStrategy, base_characteristics};
use crate::host::{CharacteristicKind, CharacteristicValue, ServiceKind};

/// Exposes the reported temperature for any sensor that carries one.
pub struct TemperatureStrategy;

impl TemperatureStrategy {
    fn temperature(device: &Device) -> Option<f64> {
        // Smoke alarm firmware reports garbage temperatures.
        if device.device_type == DeviceType::SmokeAlarm {
            return None;
        }
        Some(device.reported.as_ref()?.temperature?.degrees)
    }
}

impl ServiceStrategy for TemperatureStrategy {
    fn service(&self, device: &Device) -> Option<ServiceKind> {
        Self::temperature(device).map(|_| ServiceKind::TemperatureSensor)
    }

    fn characteristics(
        &self,
        device: &Device,
    ) -> BTreeMap<CharacteristicKind, CharacteristicValue> {
        let mut characteristics = base_characteristics(device);
        if let Some(degrees) = Self::temperature(device) {
            characteristics.insert(CharacteristicKind::CurrentTemperature, degrees.into());
        }
        characteristics
    }
}
