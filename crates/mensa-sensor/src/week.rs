use mensa_core::{CanteenId, EntityState};
use mensa_menu::MenuCache;
use serde_json::{Map, Value};

use crate::{meal_names, meals_value, Sensor, ATTRIBUTION};

/// The seven days of the current refresh window, one segment per day.
pub struct WeekSensor {
    canteen_id: CanteenId,
    cache: MenuCache,
}

impl WeekSensor {
    pub const NAME: &'static str = "OpenMensa Week";
    pub const ICON: &'static str = "mdi:calendar-week";

    pub fn new(canteen_id: CanteenId, cache: MenuCache) -> Self {
        Self { canteen_id, cache }
    }
}

impl Sensor for WeekSensor {
    fn unique_id(&self) -> String {
        format!("openmensa_{}_week", self.canteen_id)
    }

    fn state(&self) -> EntityState {
        let week = self.cache.week_summary();

        let summary = week
            .iter()
            .map(|(date, meals)| format!("{}: {}", date.format("%A"), meal_names(meals)))
            .collect::<Vec<_>>()
            .join(" | ");

        let mut days = Map::new();
        for (date, meals) in &week {
            days.insert(date.format("%Y-%m-%d").to_string(), meals_value(meals));
        }

        let mut attributes = Map::new();
        attributes.insert("attribution".into(), Value::from(ATTRIBUTION));
        attributes.insert("week".into(), Value::Object(days));

        EntityState {
            unique_id: self.unique_id(),
            name: Self::NAME.to_string(),
            icon: Self::ICON.to_string(),
            state: summary,
            attributes,
        }
    }
}
