//! # Application Configuration
//!
//! Parsed from TOML by the frontend. Every field has a default, so an empty
//! document is a valid configuration.
//!
//! ```toml
//! fetch_latency_ms = 250
//! initial_tab = "Campus"
//! fail_resources = ["housing"]
//!
//! [housing]
//! price_ceiling = 3000
//! price_step = 50
//!
//! [map]
//! aspect_ratio = 0.46
//! ```

use serde::Deserialize;
use std::time::Duration;

use crate::effects::MapRegion;
use crate::errors::AppError;
use crate::fetch::{MockCatalog, Resource};
use crate::filter::{DEFAULT_PRICE_CEILING, DEFAULT_PRICE_STEP};
use crate::navigation::Tab;
use crate::views::Coordinate;

/// Housing filter slider settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HousingSettings {
    /// Upper bound of the max-price slider
    pub price_ceiling: u32,
    /// Slider step
    pub price_step: u32,
}

impl Default for HousingSettings {
    fn default() -> Self {
        Self {
            price_ceiling: DEFAULT_PRICE_CEILING,
            price_step: DEFAULT_PRICE_STEP,
        }
    }
}

/// Campus map viewport settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Initial centre latitude
    pub center_latitude: f64,
    /// Initial centre longitude
    pub center_longitude: f64,
    /// Vertical span in degrees
    pub latitude_delta: f64,
    /// Viewport width / height
    pub aspect_ratio: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center_latitude: 32.7302,
            center_longitude: -97.1138,
            latitude_delta: 0.0922,
            aspect_ratio: 0.5,
        }
    }
}

impl MapSettings {
    /// Initial map region; the longitude span follows the viewport shape
    pub fn region(&self) -> MapRegion {
        MapRegion {
            center: Coordinate::new(self.center_latitude, self.center_longitude),
            latitude_delta: self.latitude_delta,
            longitude_delta: self.latitude_delta * self.aspect_ratio,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Simulated latency of the mock catalog
    pub fetch_latency_ms: u64,
    /// Tab shown at start-up
    pub initial_tab: Tab,
    /// Housing filter settings
    pub housing: HousingSettings,
    /// Campus map settings
    pub map: MapSettings,
    /// Resources the mock catalog fails for
    pub fail_resources: Vec<Resource>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fetch_latency_ms: 1000,
            initial_tab: Tab::Essentials,
            housing: HousingSettings::default(),
            map: MapSettings::default(),
            fail_resources: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self, AppError> {
        let config: Self = toml::from_str(input).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the screens cannot work with
    pub fn validate(&self) -> Result<(), AppError> {
        if self.housing.price_step == 0 {
            return Err(AppError::Config(
                "housing.price_step must be greater than zero".to_string(),
            ));
        }
        if self.housing.price_ceiling == 0 {
            return Err(AppError::Config(
                "housing.price_ceiling must be greater than zero".to_string(),
            ));
        }
        if self.map.latitude_delta <= 0.0 || self.map.aspect_ratio <= 0.0 {
            return Err(AppError::Config(
                "map.latitude_delta and map.aspect_ratio must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Simulated latency as a duration
    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }

    /// Mock catalog matching this configuration
    pub fn mock_catalog(&self) -> MockCatalog {
        self.fail_resources
            .iter()
            .fold(MockCatalog::new(self.fetch_latency()), |catalog, r| {
                catalog.failing(*r)
            })
    }
}
