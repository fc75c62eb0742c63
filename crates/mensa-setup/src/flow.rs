use mensa_core::config::{MAX_RADIUS_KM, MIN_RADIUS_KM};
use mensa_core::{CanteenConfig, CanteenId};
use mensa_menu::{Canteen, MensaClient};
use serde::Serialize;

use crate::error::{FlowAbort, FlowError};
use crate::zone::ZoneRegistry;

/// Entry point of the wizard
pub struct SetupFlow {
    client: MensaClient,
    zones: ZoneRegistry,
}

impl SetupFlow {
    pub fn new(client: MensaClient, zones: ZoneRegistry) -> Self {
        Self { client, zones }
    }

    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    /// Zone step: validate the form and search for canteens around the zone.
    ///
    /// # Errors
    ///
    /// Checks run in order: radius range, zone exists, zone has
    /// coordinates, at least one canteen found. A failed search counts as
    /// an empty result.
    pub async fn submit_zone(&self, zone: &str, radius_km: u32) -> Result<CanteenChoice, FlowError> {
        if !(MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&radius_km) {
            return Err(FlowError::InvalidRadius(radius_km));
        }

        if self.zones.get(zone).is_none() {
            return Err(FlowError::ZoneNotFound(zone.to_string()));
        }

        let location = self
            .zones
            .location(zone)
            .ok_or_else(|| FlowError::ZoneHasNoLocation(zone.to_string()))?;

        let canteens = match self
            .client
            .canteens_near(location.latitude, location.longitude, radius_km)
            .await
        {
            Ok(canteens) => canteens,
            Err(e) => {
                tracing::warn!("Canteen search near {} failed: {}", zone, e);
                Vec::new()
            }
        };

        if canteens.is_empty() {
            return Err(FlowError::NoCanteensFound);
        }

        tracing::debug!("{} canteens within {} km of {}", canteens.len(), radius_km, zone);
        Ok(CanteenChoice {
            zone: zone.to_string(),
            radius_km,
            canteens,
        })
    }
}

/// Canteen step: the search results to pick from
#[derive(Debug, Clone)]
pub struct CanteenChoice {
    zone: String,
    radius_km: u32,
    canteens: Vec<Canteen>,
}

impl CanteenChoice {
    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn radius_km(&self) -> u32 {
        self.radius_km
    }

    pub fn canteens(&self) -> &[Canteen] {
        &self.canteens
    }

    /// `(id, "{name} ({city})")` pairs in search order
    pub fn options(&self) -> Vec<(CanteenId, String)> {
        self.canteens
            .iter()
            .map(|c| (c.id.clone(), c.label()))
            .collect()
    }

    /// Pick a canteen from the results.
    ///
    /// # Errors
    ///
    /// `InvalidCanteen` if the id was not offered, `AlreadyConfigured` if it
    /// is in `configured`.
    pub fn select(&self, canteen_id: &CanteenId, configured: &[CanteenId]) -> Result<ConfigEntry, FlowAbort> {
        let canteen = self
            .canteens
            .iter()
            .find(|c| &c.id == canteen_id)
            .ok_or_else(|| FlowAbort::InvalidCanteen(canteen_id.clone()))?;

        if configured.contains(canteen_id) {
            return Err(FlowAbort::AlreadyConfigured(canteen_id.clone()));
        }

        let title = if canteen.name.trim().is_empty() {
            format!("Mensa {}", canteen_id)
        } else {
            canteen.name.clone()
        };

        Ok(ConfigEntry {
            title,
            canteen_id: canteen_id.clone(),
            radius_km: self.radius_km,
            zone: self.zone.clone(),
        })
    }
}

/// Result of a completed wizard, ready to be stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigEntry {
    pub title: String,
    pub canteen_id: CanteenId,
    pub radius_km: u32,
    pub zone: String,
}

impl From<ConfigEntry> for CanteenConfig {
    fn from(entry: ConfigEntry) -> Self {
        CanteenConfig {
            canteen_id: entry.canteen_id,
            title: entry.title,
            zone: Some(entry.zone),
            radius_km: entry.radius_km,
        }
    }
}
