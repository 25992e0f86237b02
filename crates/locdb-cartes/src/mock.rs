//! Mock provisioner for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use locdb_cartes::mock::MockProvisioner;
//!
//! let provisioner = MockProvisioner::new().with_map_id("map-1");
//! assert_eq!(provisioner.map_call_count(), 0);
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use locdb_core::{Coordinates, Error, MapProvisioner, MapUrls, ProvisionedMap, Result};

/// A call recorded by [`MockProvisioner`].
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    CreateMap { title: String },
    CreateMarker { map_id: String, lat: f64, lng: f64 },
}

#[derive(Debug, Clone, Default)]
struct MockConfig {
    map_id: Option<String>,
    fail_maps: bool,
    fail_markers: bool,
}

/// In-memory provisioner that records calls.
#[derive(Clone)]
pub struct MockProvisioner {
    config: Arc<MockConfig>,
    urls: MapUrls,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl Default for MockProvisioner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvisioner {
    /// Create a mock that succeeds with random map identifiers.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            urls: MapUrls::default(),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return this identifier from every create-map call.
    pub fn with_map_id(mut self, map_id: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).map_id = Some(map_id.into());
        self
    }

    /// Fail every create-map call as rate limited.
    pub fn failing_maps(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail_maps = true;
        self
    }

    /// Fail every create-marker call.
    pub fn failing_markers(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail_markers = true;
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Get number of create-map calls.
    pub fn map_call_count(&self) -> usize {
        self.get_calls()
            .iter()
            .filter(|c| matches!(c, MockCall::CreateMap { .. }))
            .count()
    }

    /// Get number of create-marker calls.
    pub fn marker_call_count(&self) -> usize {
        self.get_calls()
            .iter()
            .filter(|c| matches!(c, MockCall::CreateMarker { .. }))
            .count()
    }

    fn log_call(&self, call: MockCall) {
        self.call_log.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MapProvisioner for MockProvisioner {
    async fn create_map(&self, title: &str) -> Result<ProvisionedMap> {
        self.log_call(MockCall::CreateMap {
            title: title.to_string(),
        });
        if self.config.fail_maps {
            return Err(Error::RateLimited("mock rate limit".to_string()));
        }
        let map_id = self
            .config
            .map_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        Ok(ProvisionedMap::new(map_id))
    }

    async fn create_marker(&self, map_id: &str, coordinates: &Coordinates) -> Result<()> {
        self.log_call(MockCall::CreateMarker {
            map_id: map_id.to_string(),
            lat: coordinates.lat(),
            lng: coordinates.lng(),
        });
        if self.config.fail_markers {
            return Err(Error::Provisioning("mock marker failure".to_string()));
        }
        Ok(())
    }

    fn urls(&self) -> &MapUrls {
        &self.urls
    }
}
