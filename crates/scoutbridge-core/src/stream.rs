// ── Reactive accessory streams ──
//
// Subscription types for consuming registry changes.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::accessory::AccessoryRecord;

/// A subscription to the accessory registry.
///
/// Offers a point-in-time view of the registered accessories alongside
/// reactive notification: await `changed()`, or convert into a `Stream`
/// of snapshots.
pub struct AccessoryStream {
    current: Arc<Vec<Arc<AccessoryRecord>>>,
    receiver: watch::Receiver<Arc<Vec<Arc<AccessoryRecord>>>>,
}

impl AccessoryStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<Vec<Arc<AccessoryRecord>>>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Get the snapshot captured at creation time.
    pub fn current(&self) -> &Arc<Vec<Arc<AccessoryRecord>>> {
        &self.current
    }

    /// Get the latest snapshot (may have changed since creation).
    pub fn latest(&self) -> Arc<Vec<Arc<AccessoryRecord>>> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next registry mutation, returning the new snapshot.
    /// Returns `None` once the owning platform has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<Vec<Arc<AccessoryRecord>>>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> AccessoryWatchStream {
        AccessoryWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields the snapshot current at subscription time, then a new one on
/// each registry mutation.
pub struct AccessoryWatchStream {
    inner: WatchStream<Arc<Vec<Arc<AccessoryRecord>>>>,
}

impl Stream for AccessoryWatchStream {
    type Item = Arc<Vec<Arc<AccessoryRecord>>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::accessory::AccessoryRecord;
    use crate::registry::AccessoryCollection;
    use scoutbridge_api::{Device, DeviceType};
    use tokio_test::{assert_pending, assert_ready, task};

    fn record(device_id: &str) -> AccessoryRecord {
        AccessoryRecord::from_device(Device {
            id: device_id.to_owned(),
            device_type: DeviceType::WaterSensor,
            name: format!("Sensor {device_id}"),
            reported: None,
        })
    }

    #[test]
    fn current_captures_creation_time_snapshot() {
        let col = AccessoryCollection::new();
        col.upsert(record("dev-1"));

        let stream = AccessoryStream::new(col.subscribe());
        assert_eq!(stream.current().len(), 1);

        col.upsert(record("dev-2"));
        assert_eq!(stream.current().len(), 1);
        assert_eq!(stream.latest().len(), 2);
    }

    #[test]
    fn changed_resolves_after_mutation() {
        let col = AccessoryCollection::new();
        let mut stream = AccessoryStream::new(col.subscribe());

        let mut changed = task::spawn(stream.changed());
        assert_pending!(changed.poll());

        col.upsert(record("dev-1"));
        let snap = assert_ready!(changed.poll()).unwrap();
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn watch_stream_yields_initial_then_updated_snapshots() {
        let col = AccessoryCollection::new();
        col.upsert(record("dev-1"));

        let mut stream = task::spawn(AccessoryStream::new(col.subscribe()).into_stream());
        let first = assert_ready!(stream.poll_next()).unwrap();
        assert_eq!(first.len(), 1);

        assert_pending!(stream.poll_next());
        col.upsert(record("dev-2"));
        let second = assert_ready!(stream.poll_next()).unwrap();
        assert_eq!(second.len(), 2);
    }
}
