// ── Reactive accessory registry ──
//
// Concurrent storage for accessory records with O(1) lookups and
// push-based change notification via `watch` channels. At most one
// record exists per device identity; every mutation rebuilds the
// snapshot that subscribers receive.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;
use uuid::Uuid;

use crate::accessory::AccessoryRecord;

/// The registry map: device identity -> accessory record.
///
/// Uses `DashMap` for concurrent lookups and `watch` channels for
/// push-based change notification. A secondary index resolves the
/// host-runtime UUID back to the device identity.
pub(crate) struct AccessoryCollection {
    /// Primary storage: device id -> record.
    by_device_id: DashMap<String, Arc<AccessoryRecord>>,

    /// Secondary index: accessory UUID -> device id.
    uuid_to_device_id: DashMap<Uuid, String>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot, rebuilt on mutation for efficient subscription.
    snapshot: watch::Sender<Arc<Vec<Arc<AccessoryRecord>>>>,
}

impl AccessoryCollection {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_device_id: DashMap::new(),
            uuid_to_device_id: DashMap::new(),
            version,
            snapshot,
        }
    }

    /// Insert or replace the record for its device identity.
    /// Returns `true` if the identity was new.
    pub(crate) fn upsert(&self, record: AccessoryRecord) -> bool {
        let device_id = record.device_id.clone();

        // Clean up the stale index entry if the identity already existed
        // under a different UUID (e.g. a restored record from an older
        // persistence namespace).
        let is_new = match self.by_device_id.get(&device_id) {
            Some(existing) => {
                if existing.uuid != record.uuid {
                    self.uuid_to_device_id.remove(&existing.uuid);
                }
                false
            }
            None => true,
        };

        self.uuid_to_device_id
            .insert(record.uuid, device_id.clone());
        self.by_device_id.insert(device_id, Arc::new(record));

        self.rebuild_snapshot();
        self.bump_version();

        is_new
    }

    /// Remove the record for a device identity, if present.
    pub(crate) fn remove(&self, device_id: &str) -> Option<Arc<AccessoryRecord>> {
        let removed = self.by_device_id.remove(device_id).map(|(_, v)| v);
        if let Some(ref record) = removed {
            self.uuid_to_device_id.remove(&record.uuid);
            self.rebuild_snapshot();
            self.bump_version();
        }
        removed
    }

    pub(crate) fn get(&self, device_id: &str) -> Option<Arc<AccessoryRecord>> {
        self.by_device_id.get(device_id).map(|r| Arc::clone(r.value()))
    }

    /// Look up a record by its host-runtime UUID (secondary index).
    pub(crate) fn get_by_uuid(&self, uuid: &Uuid) -> Option<Arc<AccessoryRecord>> {
        let device_id = self.uuid_to_device_id.get(uuid)?;
        self.by_device_id
            .get(device_id.value().as_str())
            .map(|r| Arc::clone(r.value()))
    }

    /// Current snapshot of all records (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<AccessoryRecord>>> {
        self.snapshot.borrow().clone()
    }

    /// Receiver that observes every snapshot rebuild.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<AccessoryRecord>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_device_id.len()
    }

    #[allow(dead_code)]
    pub(crate) fn is_empty(&self) -> bool {
        self.by_device_id.is_empty()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Collect all records into a snapshot vec and broadcast to subscribers.
    fn rebuild_snapshot(&self) {
        let values: Vec<Arc<AccessoryRecord>> = self
            .by_device_id
            .iter()
            .map(|r| Arc::clone(r.value()))
            .collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use scoutbridge_api::{Device, DeviceType};

    fn record(device_id: &str) -> AccessoryRecord {
        AccessoryRecord::from_device(Device {
            id: device_id.to_owned(),
            device_type: DeviceType::MotionSensor,
            name: format!("Sensor {device_id}"),
            reported: None,
        })
    }

    #[test]
    fn upsert_returns_true_for_new_identity() {
        let col = AccessoryCollection::new();
        assert!(col.upsert(record("dev-1")));
    }

    #[test]
    fn upsert_returns_false_for_existing_identity() {
        let col = AccessoryCollection::new();
        col.upsert(record("dev-1"));
        assert!(!col.upsert(record("dev-1")));
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn get_by_device_id_and_uuid() {
        let col = AccessoryCollection::new();
        let rec = record("dev-1");
        let uuid = rec.uuid;
        col.upsert(rec);

        assert_eq!(col.get("dev-1").unwrap().device_id, "dev-1");
        assert_eq!(col.get_by_uuid(&uuid).unwrap().device_id, "dev-1");
    }

    #[test]
    fn remove_cleans_up_indexes() {
        let col = AccessoryCollection::new();
        let rec = record("dev-1");
        let uuid = rec.uuid;
        col.upsert(rec);

        let removed = col.remove("dev-1");
        assert_eq!(removed.unwrap().device_id, "dev-1");
        assert!(col.get("dev-1").is_none());
        assert!(col.get_by_uuid(&uuid).is_none());
        assert!(col.is_empty());
    }

    #[test]
    fn remove_of_unknown_identity_is_a_noop() {
        let col = AccessoryCollection::new();
        col.upsert(record("dev-1"));
        let version_before = *col.version.borrow();

        assert!(col.remove("dev-9").is_none());
        assert_eq!(*col.version.borrow(), version_before);
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let col = AccessoryCollection::new();
        assert!(col.snapshot().is_empty());

        col.upsert(record("dev-1"));
        col.upsert(record("dev-2"));

        assert_eq!(col.snapshot().len(), 2);
    }
}
