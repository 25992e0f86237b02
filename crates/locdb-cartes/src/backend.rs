//! cartes.io mapping service client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

use locdb_core::{defaults, Coordinates, Error, MapProvisioner, MapUrls, ProvisionedMap, Result};

use crate::error::{to_locdb_error, CartesErrorCode};
use crate::types::*;

/// Configuration for the cartes.io client.
#[derive(Debug, Clone)]
pub struct CartesConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// Host serving the embeddable map viewer.
    pub embed_base_url: String,
    /// API key (optional; anonymous maps need none).
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for CartesConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::CARTES_API_URL.to_string(),
            embed_base_url: defaults::CARTES_EMBED_URL.to_string(),
            api_key: None,
            timeout_seconds: defaults::HTTP_TIMEOUT_SECS,
        }
    }
}

impl CartesConfig {
    /// Read configuration from environment variables, falling back to defaults.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `CARTES_BASE_URL` | `https://cartes.io/api` |
    /// | `CARTES_EMBED_URL` | `https://app.cartes.io` |
    /// | `CARTES_API_KEY` | (none) |
    /// | `CARTES_TIMEOUT` | 30 |
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("CARTES_BASE_URL")
                .unwrap_or_else(|_| defaults::CARTES_API_URL.to_string()),
            embed_base_url: std::env::var("CARTES_EMBED_URL")
                .unwrap_or_else(|_| defaults::CARTES_EMBED_URL.to_string()),
            api_key: std::env::var("CARTES_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            timeout_seconds: std::env::var("CARTES_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::HTTP_TIMEOUT_SECS),
        }
    }
}

/// cartes.io client implementing [`MapProvisioner`].
///
/// Each call is a single attempt; there is no retry.
pub struct CartesBackend {
    client: Client,
    config: CartesConfig,
    urls: MapUrls,
}

impl CartesBackend {
    /// Create a new client with the given configuration.
    pub fn new(config: CartesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            base_url = %config.base_url,
            embed_base_url = %config.embed_base_url,
            "Initializing cartes.io client"
        );

        let urls = MapUrls {
            api_base: config.base_url.trim_end_matches('/').to_string(),
            embed_base: config.embed_base_url.trim_end_matches('/').to_string(),
        };
        Ok(Self {
            client,
            config,
            urls,
        })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(CartesConfig::default())
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(CartesConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &CartesConfig {
        &self.config
    }

    /// Build a JSON POST request with authentication if configured.
    fn build_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.urls.api_base, endpoint);
        let mut req = self.client.post(&url);

        if let Some(ref api_key) = self.config.api_key {
            req = req.bearer_auth(api_key);
        }

        req.header("Content-Type", "application/json")
            .header("Accept", "application/json")
    }

    /// Turn a non-success response into an Error.
    async fn error_from(response: Response) -> Error {
        let status = response.status();
        let body: CartesErrorResponse = response.json().await.unwrap_or_default();
        let message = if body.message.is_empty() {
            status.to_string()
        } else {
            format!("{}: {}", status, body.message)
        };
        warn!(status = status.as_u16(), error = %message, "cartes.io request failed");
        to_locdb_error(CartesErrorCode::from_status(status.as_u16()), &message)
    }
}

#[async_trait]
impl MapProvisioner for CartesBackend {
    #[instrument(skip(self), fields(subsystem = "cartes", op = "create_map"))]
    async fn create_map(&self, title: &str) -> Result<ProvisionedMap> {
        let start = Instant::now();

        let request = CreateMapRequest {
            title,
            privacy: defaults::MAP_PRIVACY,
            users_can_create_markers: defaults::MAP_USERS_CAN_CREATE_MARKERS,
        };

        let response = self
            .build_request("/maps")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Request(format!("Create map failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let result: CreateMapResponse = response
            .json()
            .await
            .map_err(|e| Error::Provisioning(format!("Failed to parse map response: {}", e)))?;

        if result.uuid.is_empty() {
            return Err(Error::Provisioning(
                "Map response has an empty identifier".to_string(),
            ));
        }

        debug!(
            map_id = %result.uuid,
            duration_ms = start.elapsed().as_millis() as u64,
            "Map created"
        );
        Ok(ProvisionedMap::new(result.uuid))
    }

    #[instrument(skip(self, coordinates), fields(
        subsystem = "cartes",
        op = "create_marker",
        coordinates = %coordinates,
    ))]
    async fn create_marker(&self, map_id: &str, coordinates: &Coordinates) -> Result<()> {
        let request = CreateMarkerRequest {
            lat: coordinates.lat(),
            lng: coordinates.lng(),
            category_name: defaults::MARKER_CATEGORY,
        };

        let response = self
            .build_request(&format!("/maps/{}/markers", map_id))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Request(format!("Create marker failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }

    fn urls(&self) -> &MapUrls {
        &self.urls
    }
}
