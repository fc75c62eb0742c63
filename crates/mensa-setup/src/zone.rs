//! Zones known to the host, as a lookup for the wizard.

use mensa_core::{Config, ZoneConfig};
use serde::Serialize;

/// Coordinates of a zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    zones: Vec<ZoneConfig>,
}

impl ZoneRegistry {
    pub fn new(zones: Vec<ZoneConfig>) -> Self {
        Self { zones }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.zones.clone())
    }

    pub fn get(&self, entity_id: &str) -> Option<&ZoneConfig> {
        self.zones.iter().find(|z| z.entity_id == entity_id)
    }

    /// Location of a zone; `None` unless both coordinates are set.
    pub fn location(&self, entity_id: &str) -> Option<ZoneLocation> {
        let zone = self.get(entity_id)?;
        Some(ZoneLocation {
            latitude: zone.latitude?,
            longitude: zone.longitude?,
        })
    }

    /// `(entity_id, name)` pairs for a selection list, in config order
    pub fn options(&self) -> Vec<(String, String)> {
        self.zones
            .iter()
            .map(|z| (z.entity_id.clone(), z.name.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
