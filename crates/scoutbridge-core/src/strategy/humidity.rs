// ── Humidity sensor strategy ──

use std::collections::BTreeMap;

use scoutbridge_api::Device;

use super::{ServiceStrategy, base_characteristics};
use crate::host::{CharacteristicKind, CharacteristicValue, ServiceKind};

/// Exposes the reported relative humidity for any sensor that carries one.
pub struct HumidityStrategy;

impl HumidityStrategy {
    fn humidity(device: &Device) -> Option<f64> {
        Some(device.reported.as_ref()?.humidity?.percent)
    }
}

impl ServiceStrategy for HumidityStrategy {
    fn service(&self, device: &Device) -> Option<ServiceKind> {
        Self::humidity(device).map(|_| ServiceKind::HumiditySensor)
    }

    fn characteristics(
        &self,
        device: &Device,
    ) -> BTreeMap<CharacteristicKind, CharacteristicValue> {
        let mut characteristics = base_characteristics(device);
        if let Some(percent) = Self::humidity(device) {
            characteristics.insert(CharacteristicKind::CurrentRelativeHumidity, percent.into());
        }
        characteristics
    }
}
