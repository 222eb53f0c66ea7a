// ── Sensor platform ──
//
// The facade owning the accessory registry and the event reconciliation.
// Discovery enumerates a location's devices and materializes accessory
// records; the event bridge keeps them current. Handlers complete their
// registry mutation before awaiting any collaborator, so an interleaved
// handler never observes a half-updated map.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use scoutbridge_api::{
    Device, DeviceDirectory, DeviceEvent, DeviceEventType, DeviceListener, DevicePairEvent,
    DeviceTriggerEvent, DeviceType,
};

use crate::accessory::AccessoryRecord;
use crate::config::PlatformConfig;
use crate::error::CoreError;
use crate::host::{AccessoryHost, ServiceSnapshot};
use crate::registry::AccessoryCollection;
use crate::strategy::{ServiceStrategy, default_strategies};
use crate::stream::AccessoryStream;

/// Plugin identity under which accessories are registered with the host.
pub const PLUGIN_NAME: &str = "scoutbridge";
/// Platform identity under which accessories are registered with the host.
pub const PLATFORM_NAME: &str = "ScoutBridge";

const SUPPORTED_DEVICE_TYPES: [DeviceType; 5] = [
    DeviceType::DoorPanel,
    DeviceType::AccessSensor,
    DeviceType::MotionSensor,
    DeviceType::WaterSensor,
    DeviceType::SmokeAlarm,
];

// ── SensorPlatform ───────────────────────────────────────────────

/// The main entry point for embedders.
///
/// Cheaply cloneable via `Arc<PlatformInner>`. Maintains a one-to-one
/// correspondence between the location's supported devices and exposed
/// accessory records, and keeps their service state current.
#[derive(Clone)]
pub struct SensorPlatform {
    inner: Arc<PlatformInner>,
}

struct PlatformInner {
    config: PlatformConfig,
    directory: Arc<dyn DeviceDirectory>,
    listener: Arc<dyn DeviceListener>,
    host: Arc<dyn AccessoryHost>,
    strategies: Vec<Box<dyn ServiceStrategy>>,
    accessories: AccessoryCollection,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
    last_discovery: watch::Sender<Option<DateTime<Utc>>>,
    last_event: watch::Sender<Option<DateTime<Utc>>>,
}

impl SensorPlatform {
    /// Create a platform with the default strategy set. Does NOT touch the
    /// collaborators -- call [`start()`](Self::start) to discover and
    /// subscribe.
    pub fn new(
        config: PlatformConfig,
        directory: Arc<dyn DeviceDirectory>,
        listener: Arc<dyn DeviceListener>,
        host: Arc<dyn AccessoryHost>,
    ) -> Self {
        Self::with_strategies(config, directory, listener, host, default_strategies())
    }

    /// Create a platform with an explicit strategy list.
    pub fn with_strategies(
        config: PlatformConfig,
        directory: Arc<dyn DeviceDirectory>,
        listener: Arc<dyn DeviceListener>,
        host: Arc<dyn AccessoryHost>,
        strategies: Vec<Box<dyn ServiceStrategy>>,
    ) -> Self {
        let (last_discovery, _) = watch::channel(None);
        let (last_event, _) = watch::channel(None);

        Self {
            inner: Arc::new(PlatformInner {
                config,
                directory,
                listener,
                host,
                strategies,
                accessories: AccessoryCollection::new(),
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
                last_discovery,
                last_event,
            }),
        }
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.inner.config
    }

    // ── Device support policy ────────────────────────────────────

    /// Whether a device should be materialized as an accessory.
    ///
    /// The type must be in the supported set, and the instance must pass
    /// the per-type eligibility check. Applied at discovery AND at
    /// trigger-driven creation, so an ineligible device never gains an
    /// accessory through either path.
    pub fn is_supported_device(device: &Device) -> bool {
        if !SUPPORTED_DEVICE_TYPES.contains(&device.device_type) {
            return false;
        }

        // The vendor's legacy mesh-protocol motion sensors never deliver
        // usable motion events; a mesh address in the report marks them.
        if device.device_type == DeviceType::MotionSensor
            && device
                .reported
                .as_ref()
                .is_some_and(|r| r.mesh_address.is_some())
        {
            return false;
        }

        true
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Run an initial discovery pass, then subscribe to the location's
    /// event stream. Spawns the periodic refresh task when configured.
    pub async fn start(&self) -> Result<Vec<AccessoryRecord>, CoreError> {
        let records = self.discover().await?;
        self.add_location_listeners().await;

        if self.inner.config.refresh_interval_secs > 0 {
            let platform = self.clone();
            let cancel = self.inner.cancel.child_token();
            let interval_secs = self.inner.config.refresh_interval_secs;
            self.inner
                .task_handles
                .lock()
                .await
                .push(tokio::spawn(refresh_task(platform, interval_secs, cancel)));
        }

        info!(location_id = %self.inner.config.location_id, "platform started");
        Ok(records)
    }

    /// Cancel background tasks and wait for them to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        debug!("platform shut down");
    }

    /// Index a previously-persisted accessory record supplied by the host
    /// at startup. Must run before discovery so that early trigger events
    /// for known devices are routed as updates, not creations.
    pub fn configure_accessory(&self, record: AccessoryRecord) {
        debug!(device_id = %record.device_id, "restored accessory from host cache");
        self.inner.accessories.upsert(record);
    }

    // ── Discovery ────────────────────────────────────────────────

    /// Enumerate the location's devices and reconcile the registry:
    /// unseen eligible devices are registered with the host and indexed,
    /// known ones get their snapshot replaced. Devices absent from the
    /// listing are NOT removed -- only an unpair event removes.
    ///
    /// Directory failures propagate; no retry happens at this layer.
    pub async fn discover(&self) -> Result<Vec<AccessoryRecord>, CoreError> {
        let location_id = &self.inner.config.location_id;
        let devices = self.inner.directory.get_devices(location_id).await?;
        debug!(location_id = %location_id, count = devices.len(), "fetched device listing");

        let mut records = Vec::new();
        let mut created = Vec::new();

        for device in devices {
            if !Self::is_supported_device(&device) {
                debug!(device = %device, "skipping unsupported or ineligible device");
                continue;
            }

            let record = match self.inner.accessories.get(&device.id) {
                Some(existing) => existing.as_ref().clone().with_device(device),
                None => {
                    let record = AccessoryRecord::from_device(device);
                    created.push(record.clone());
                    record
                }
            };
            self.inner.accessories.upsert(record.clone());
            records.push(record);
        }

        if !created.is_empty() {
            self.inner
                .host
                .register_accessories(PLUGIN_NAME, PLATFORM_NAME, &created)
                .await?;
        }

        for record in &records {
            self.push_service_state(record).await;
        }

        let _ = self.inner.last_discovery.send(Some(Utc::now()));
        info!(
            location_id = %location_id,
            total = records.len(),
            added = created.len(),
            "discovery complete"
        );

        Ok(records)
    }

    // ── Event subscription ───────────────────────────────────────

    /// Subscribe to the location's trigger and pair events and spawn the
    /// bridge task that dispatches them to the handlers.
    pub async fn add_location_listeners(&self) {
        let rx = self.inner.listener.subscribe(&self.inner.config.location_id);
        let platform = self.clone();
        let cancel = self.inner.cancel.child_token();
        self.inner
            .task_handles
            .lock()
            .await
            .push(tokio::spawn(event_bridge_task(platform, rx, cancel)));
    }

    // ── Event handlers ───────────────────────────────────────────

    async fn handle_event(&self, event: &DeviceEvent) {
        let _ = self.inner.last_event.send(Some(Utc::now()));
        match event {
            DeviceEvent::Trigger(e) => self.on_device_trigger(e).await,
            DeviceEvent::Pair(e) => self.on_device_pair(e).await,
        }
    }

    /// Reconcile a trigger event: replace the snapshot of a known
    /// accessory, or materialize a new one for an unseen eligible device.
    /// Handler errors are logged, never propagated -- a bad event must
    /// not take down the bridge.
    pub async fn on_device_trigger(&self, event: &DeviceTriggerEvent) {
        debug!(device = %event.device, "device trigger event");

        if let Some(existing) = self.inner.accessories.get(&event.device.id) {
            let record = existing.as_ref().clone().with_device(event.device.clone());
            self.inner.accessories.upsert(record.clone());
            self.push_service_state(&record).await;
            return;
        }

        if !Self::is_supported_device(&event.device) {
            debug!(device = %event.device, "ignoring trigger from unsupported or ineligible device");
            return;
        }

        // Index before awaiting the host so a concurrent event for the
        // same identity already sees the record.
        let record = AccessoryRecord::from_device(event.device.clone());
        self.inner.accessories.upsert(record.clone());

        if let Err(error) = self
            .inner
            .host
            .register_accessories(PLUGIN_NAME, PLATFORM_NAME, std::slice::from_ref(&record))
            .await
        {
            warn!(device_id = %record.device_id, %error, "accessory registration failed");
            return;
        }

        self.push_service_state(&record).await;
        info!(device_id = %record.device_id, "registered accessory for newly seen device");
    }

    /// Reconcile a pair event: an unpair for a known identity removes the
    /// accessory; everything else is ignored. New pairings materialize on
    /// the next trigger event or discovery pass.
    pub async fn on_device_pair(&self, event: &DevicePairEvent) {
        debug!(device_id = %event.id, kind = ?event.event, "device pair event");

        if event.event != DeviceEventType::Unpaired {
            return;
        }

        let Some(record) = self.inner.accessories.remove(&event.id) else {
            return;
        };

        if let Err(error) = self
            .inner
            .host
            .unregister_accessories(PLUGIN_NAME, PLATFORM_NAME, std::slice::from_ref(record.as_ref()))
            .await
        {
            warn!(device_id = %event.id, %error, "accessory unregistration failed");
        }

        info!(device_id = %event.id, "removed accessory for unpaired device");
    }

    // ── Service state ────────────────────────────────────────────

    /// Evaluate every strategy against the accessory's current snapshot.
    /// Only applicable services appear in the result.
    pub fn service_state(&self, record: &AccessoryRecord) -> Vec<ServiceSnapshot> {
        self.inner
            .strategies
            .iter()
            .filter_map(|strategy| {
                let kind = strategy.service(&record.device)?;
                Some(ServiceSnapshot {
                    kind,
                    characteristics: strategy.characteristics(&record.device),
                })
            })
            .collect()
    }

    async fn push_service_state(&self, record: &AccessoryRecord) {
        let services = self.service_state(record);
        if let Err(error) = self.inner.host.update_accessory(record, &services).await {
            warn!(device_id = %record.device_id, %error, "characteristic push failed");
        }
    }

    // ── State observation ────────────────────────────────────────

    pub fn accessories_snapshot(&self) -> Arc<Vec<Arc<AccessoryRecord>>> {
        self.inner.accessories.snapshot()
    }

    pub fn accessory(&self, device_id: &str) -> Option<Arc<AccessoryRecord>> {
        self.inner.accessories.get(device_id)
    }

    pub fn accessory_by_uuid(&self, uuid: &Uuid) -> Option<Arc<AccessoryRecord>> {
        self.inner.accessories.get_by_uuid(uuid)
    }

    pub fn accessory_count(&self) -> usize {
        self.inner.accessories.len()
    }

    /// Subscribe to registry changes.
    pub fn accessories(&self) -> AccessoryStream {
        AccessoryStream::new(self.inner.accessories.subscribe())
    }

    pub fn last_discovery(&self) -> Option<DateTime<Utc>> {
        *self.inner.last_discovery.borrow()
    }

    pub fn last_event(&self) -> Option<DateTime<Utc>> {
        *self.inner.last_event.borrow()
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Bridge task: listener events -> handler dispatch.
async fn event_bridge_task(
    platform: SensorPlatform,
    mut rx: broadcast::Receiver<Arc<DeviceEvent>>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            result = rx.recv() => {
                match result {
                    Ok(event) => platform.handle_event(&event).await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "event bridge: receiver lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }
}

/// Periodic rediscovery. Failures are logged and the next tick retries --
/// a flaky upstream must not stop the event bridge.
async fn refresh_task(platform: SensorPlatform, interval_secs: u64, cancel: CancellationToken) {
    let interval = std::time::Duration::from_secs(interval_secs);
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(interval) => {
                if let Err(error) = platform.discover().await {
                    warn!(%error, "periodic discovery failed");
                }
            }
        }
    }
}
