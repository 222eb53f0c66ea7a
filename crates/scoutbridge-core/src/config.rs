// ── Platform configuration ──
//
// Describes *which* location to bridge and how often to re-enumerate it.
// Built by the embedding plugin and handed in; the core never reads
// config files or credentials -- those belong to the collaborators.

/// Configuration for a single bridged location.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Location whose devices this platform exposes.
    pub location_id: String,
    /// How often to run a full discovery pass (seconds). 0 = never;
    /// new pairings are then only picked up via trigger events.
    pub refresh_interval_secs: u64,
}

impl PlatformConfig {
    pub fn new(location_id: impl Into<String>) -> Self {
        Self {
            location_id: location_id.into(),
            refresh_interval_secs: 0,
        }
    }

    pub fn with_refresh_interval(mut self, secs: u64) -> Self {
        self.refresh_interval_secs = secs;
        self
    }
}
