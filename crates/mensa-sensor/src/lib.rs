//! Sensor entities built on a canteen's menu cache.
//!
//! Sensors hold a clone of the `MenuCache` handle and read it whenever their
//! state is requested. They never trigger a fetch.

use mensa_core::EntityState;
use mensa_menu::Meal;
use serde_json::Value;

pub mod today;
pub mod week;

pub use today::TodaySensor;
pub use week::WeekSensor;

/// State shown for a closed or unknown day
pub const CLOSED_LABEL: &str = "Geschlossen";

pub const ATTRIBUTION: &str = "Daten von OpenMensa.org";

/// A read-only view that renders into an entity state
pub trait Sensor: Send + Sync {
    fn unique_id(&self) -> String;

    fn state(&self) -> EntityState;
}

/// "A, B, C", or the closed label for an empty list
pub(crate) fn meal_names(meals: &[Meal]) -> String {
    if meals.is_empty() {
        return CLOSED_LABEL.to_string();
    }
    meals
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Meals as the JSON objects the API sent
pub(crate) fn meals_value(meals: &[Meal]) -> Value {
    serde_json::to_value(meals).unwrap_or_else(|_| Value::Array(Vec::new()))
}
