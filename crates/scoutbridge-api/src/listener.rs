// ── Event listener contract ──

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::events::DeviceEvent;

/// Push-event subscription for a location.
///
/// Implemented by the event transport (websocket, polling, ...). Each
/// delivered event appears at most once per receiver; per-device ordering
/// follows the transport's delivery order and is not re-established by
/// consumers. Slow receivers observe `Lagged` like any broadcast channel.
pub trait DeviceListener: Send + Sync {
    fn subscribe(&self, location_id: &str) -> broadcast::Receiver<Arc<DeviceEvent>>;
}
