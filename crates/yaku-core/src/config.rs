//! Dashboard configuration, loaded from TOML.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::error::{Error, Result};

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Maximum log level (`error`, `warn`, `info`, `debug`, `trace`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Where the processing backend lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Prefix for every endpoint; empty means same origin.
    #[serde(default)]
    pub base_url: String,
}

/// Initial map view and tile source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(default = "default_center_lng")]
    pub center_lng: f64,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
    #[serde(default = "default_attribution")]
    pub attribution: String,
}

/// Timings of transient UI elements, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u32,
    #[serde(default = "default_status_refresh_delay_ms")]
    pub status_refresh_delay_ms: u32,
    #[serde(default = "default_coordinate_marker_ms")]
    pub coordinate_marker_ms: u32,
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_center_lat() -> f64 {
    -16.4090
}

const fn default_center_lng() -> f64 {
    -71.5375
}

const fn default_zoom() -> u8 {
    12
}

fn default_tile_url() -> String {
    "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_attribution() -> String {
    "© OpenStreetMap contributors".to_string()
}

const fn default_toast_ms() -> u32 {
    5000
}

const fn default_status_refresh_delay_ms() -> u32 {
    1000
}

const fn default_coordinate_marker_ms() -> u32 {
    2000
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api: ApiConfig::default(),
            map: MapConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            zoom: default_zoom(),
            tile_url: default_tile_url(),
            attribution: default_attribution(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_ms: default_toast_ms(),
            status_refresh_delay_ms: default_status_refresh_delay_ms(),
            coordinate_marker_ms: default_coordinate_marker_ms(),
        }
    }
}

const MAX_ZOOM: u8 = 22;

impl DashboardConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    /// Returns [`Error::TomlParseFailed`] for malformed TOML and
    /// [`Error::InvalidConfig`] for values out of range.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| Error::TomlParseFailed {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns [`Error::InvalidConfig`] naming the first offending value.
    pub fn validate(&self) -> Result<()> {
        if !self.map.center_lat.is_finite() || !self.map.center_lng.is_finite() {
            return Err(Error::invalid_config("map center must be finite"));
        }
        if self.map.zoom > MAX_ZOOM {
            return Err(Error::invalid_config(format!(
                "zoom must be between 0 and {MAX_ZOOM}, got {}",
                self.map.zoom
            )));
        }
        self.level()?;
        Ok(())
    }

    /// Parsed `log_level`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] for an unknown level name.
    pub fn level(&self) -> Result<Level> {
        Level::from_str(self.log_level.trim())
            .map_err(|_| Error::invalid_config(format!("unknown log level '{}'", self.log_level)))
    }
}

impl ApiConfig {
    /// Full URL of an endpoint path such as `/procesar`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
