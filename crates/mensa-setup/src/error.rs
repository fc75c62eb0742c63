use mensa_core::config::{MAX_RADIUS_KM, MIN_RADIUS_KM};
use mensa_core::CanteenId;
use thiserror::Error;

/// Problems with the zone step. The form is shown again with the error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Radius {0} km is outside {}..={} km", MIN_RADIUS_KM, MAX_RADIUS_KM)]
    InvalidRadius(u32),

    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    #[error("Zone {0} has no location")]
    ZoneHasNoLocation(String),

    #[error("No canteens found near the zone")]
    NoCanteensFound,
}

impl FlowError {
    /// Stable key for form error lookups
    pub fn key(&self) -> &'static str {
        match self {
            Self::InvalidRadius(_) => "invalid_radius",
            Self::ZoneNotFound(_) => "zone_not_found",
            Self::ZoneHasNoLocation(_) => "zone_has_no_location",
            Self::NoCanteensFound => "no_canteens_found",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRadius(_) => format!(
                "Choose a radius between {} and {} km.",
                MIN_RADIUS_KM, MAX_RADIUS_KM
            ),
            Self::ZoneNotFound(_) => "The selected zone does not exist.".to_string(),
            Self::ZoneHasNoLocation(_) => "The selected zone has no coordinates.".to_string(),
            Self::NoCanteensFound => {
                "No canteens found in this area. Try a larger radius.".to_string()
            }
        }
    }
}

/// Reasons the canteen step ends the flow without an entry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowAbort {
    #[error("Canteen {0} was not among the search results")]
    InvalidCanteen(CanteenId),

    #[error("Canteen {0} is already configured")]
    AlreadyConfigured(CanteenId),
}

impl FlowAbort {
    pub fn key(&self) -> &'static str {
        match self {
            Self::InvalidCanteen(_) => "invalid_canteen",
            Self::AlreadyConfigured(_) => "already_configured",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCanteen(_) => "The selected canteen is not valid.".to_string(),
            Self::AlreadyConfigured(id) => format!("Canteen {} is already set up.", id),
        }
    }
}
