use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::{CanteenId, ConfigError};

/// Public OpenMensa API root.
pub const DEFAULT_API_BASE_URL: &str = "https://openmensa.org/api/v2";

/// Per-request timeout, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Menu refresh cadence.
pub const DEFAULT_REFRESH_HOURS: u64 = 6;

/// Longest accepted refresh interval: one week.
pub const MAX_REFRESH_HOURS: u64 = 168;

/// Allowed canteen search radius, in kilometres.
pub const MIN_RADIUS_KM: u32 = 1;
pub const MAX_RADIUS_KM: u32 = 100;
pub const DEFAULT_RADIUS_KM: u32 = 10;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a single-line summary of all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote menu API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Refresh schedule
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Known geofence zones, used by the setup wizard
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,

    /// One entry per configured canteen
    #[serde(default)]
    pub canteens: Vec<CanteenConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the OpenMensa v2 API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout applied to every request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Hours between scheduled refreshes (default: 6)
    #[serde(default = "default_refresh_hours")]
    pub interval_hours: u64,
}

fn default_refresh_hours() -> u64 {
    DEFAULT_REFRESH_HOURS
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_hours: default_refresh_hours(),
        }
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours.saturating_mul(3600))
    }
}

/// A named geofence with optional coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub entity_id: String,
    pub name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// A configured canteen, as written by the setup wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanteenConfig {
    pub canteen_id: CanteenId,
    pub title: String,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default = "default_radius_km")]
    pub radius_km: u32,
}

fn default_radius_km() -> u32 {
    DEFAULT_RADIUS_KM
}

impl Config {
    /// Load configuration from the default path, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged; errors fail the load.
    pub fn load_validated_from(path: &Path) -> Result<(Self, ValidationResult)> {
        let config = Self::load_from(path)?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.api.base_url, "api.base_url", &mut result);

        if self.api.request_timeout_secs == 0 {
            result.add_error(
                "api.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        } else if self.api.request_timeout_secs > 60 {
            result.add_warning(
                "api.request_timeout_secs",
                "Request timeout is more than a minute",
            );
        }

        if self.refresh.interval_hours == 0 {
            result.add_error(
                "refresh.interval_hours",
                "Refresh interval must be at least one hour",
            );
        } else if self.refresh.interval_hours > MAX_REFRESH_HOURS {
            result.add_error(
                "refresh.interval_hours",
                format!("Refresh interval must be at most {} hours", MAX_REFRESH_HOURS),
            );
        } else if self.refresh.interval_hours != DEFAULT_REFRESH_HOURS {
            result.add_warning(
                "refresh.interval_hours",
                format!(
                    "Refresh interval differs from the recommended {} hours",
                    DEFAULT_REFRESH_HOURS
                ),
            );
        }

        let mut zone_ids = HashSet::new();
        for (i, zone) in self.zones.iter().enumerate() {
            let field = format!("zones[{}]", i);
            if !zone_ids.insert(zone.entity_id.as_str()) {
                result.add_error(&field, format!("Duplicate zone: {}", zone.entity_id));
            }
            if let Some(lat) = zone.latitude {
                if !(-90.0..=90.0).contains(&lat) {
                    result.add_error(format!("{}.latitude", field), "Latitude out of range");
                }
            }
            if let Some(lon) = zone.longitude {
                if !(-180.0..=180.0).contains(&lon) {
                    result.add_error(format!("{}.longitude", field), "Longitude out of range");
                }
            }
        }

        let mut canteen_ids = HashSet::new();
        for (i, canteen) in self.canteens.iter().enumerate() {
            let field = format!("canteens[{}]", i);
            if !canteen_ids.insert(&canteen.canteen_id) {
                result.add_error(
                    &field,
                    format!("Canteen {} is configured twice", canteen.canteen_id),
                );
            }
            if !(MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&canteen.radius_km) {
                result.add_error(
                    format!("{}.radius_km", field),
                    format!(
                        "Radius must be between {} and {} km",
                        MIN_RADIUS_KM, MAX_RADIUS_KM
                    ),
                );
            }
            if let Some(zone) = &canteen.zone {
                if !zone_ids.contains(zone.as_str()) {
                    result.add_warning(
                        format!("{}.zone", field),
                        format!("Unknown zone: {}", zone),
                    );
                }
            }
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Path of the configuration file (`<config dir>/mensa/config.toml`)
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("mensa");

        Ok(config_dir.join("config.toml"))
    }

    /// Look up a zone by its entity id
    pub fn zone(&self, entity_id: &str) -> Option<&ZoneConfig> {
        self.zones.iter().find(|z| z.entity_id == entity_id)
    }
}
