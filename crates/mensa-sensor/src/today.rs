use std::sync::Arc;

use mensa_core::{CanteenId, EntityState};
use mensa_menu::{Clock, MenuCache};
use serde_json::{Map, Value};

use crate::{meal_names, meals_value, Sensor, ATTRIBUTION};

/// Today's meals. The date is taken from the clock on every read, so the
/// sensor follows midnight without a refresh.
pub struct TodaySensor {
    canteen_id: CanteenId,
    cache: MenuCache,
    clock: Arc<dyn Clock>,
}

impl TodaySensor {
    pub const NAME: &'static str = "OpenMensa Today";
    pub const ICON: &'static str = "mdi:calendar-today";

    pub fn new(canteen_id: CanteenId, cache: MenuCache, clock: Arc<dyn Clock>) -> Self {
        Self {
            canteen_id,
            cache,
            clock,
        }
    }
}

impl Sensor for TodaySensor {
    fn unique_id(&self) -> String {
        format!("openmensa_{}_today", self.canteen_id)
    }

    fn state(&self) -> EntityState {
        let today = self.clock.today();
        let meals = self.cache.get_menu(today);

        let mut attributes = Map::new();
        attributes.insert("attribution".into(), Value::from(ATTRIBUTION));
        attributes.insert("date".into(), Value::from(today.format("%Y-%m-%d").to_string()));
        attributes.insert("meals".into(), meals_value(&meals));

        EntityState {
            unique_id: self.unique_id(),
            name: Self::NAME.to_string(),
            icon: Self::ICON.to_string(),
            state: meal_names(&meals),
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CLOSED_LABEL;
    use chrono::{NaiveDate, Utc};
    use mensa_menu::{DayMenu, FixedClock, Meal, MenuSnapshot};
    use std::collections::BTreeMap;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn cache() -> MenuCache {
        let mut pasta = Meal::new("Pasta");
        pasta.extra.insert("category".into(), Value::from("Hauptgericht"));

        let mut days = BTreeMap::new();
        days.insert(date(19), DayMenu::Open(vec![pasta, Meal::new("Salat")]));
        days.insert(date(20), DayMenu::Closed);
        MenuCache::new(MenuSnapshot::new(date(19), days, Utc::now()))
    }

    #[test]
    fn test_today_state() {
        let clock = Arc::new(FixedClock::new(date(19)));
        let sensor = TodaySensor::new(CanteenId::from(1), cache(), clock);

        let state = sensor.state();
        assert_eq!(state.unique_id, "openmensa_1_today");
        assert_eq!(state.name, "OpenMensa Today");
        assert_eq!(state.icon, "mdi:calendar-today");
        assert_eq!(state.state, "Pasta, Salat");
        assert_eq!(state.attributes["attribution"], "Daten von OpenMensa.org");
        assert_eq!(state.attributes["date"], "2026-10-19");
        assert_eq!(state.attributes["meals"][0]["category"], "Hauptgericht");
    }

    #[test]
    fn test_today_follows_the_clock() {
        let clock = Arc::new(FixedClock::new(date(19)));
        let sensor = TodaySensor::new(CanteenId::from(1), cache(), clock.clone());

        clock.advance_days(1);
        let state = sensor.state();
        assert_eq!(state.state, CLOSED_LABEL);
        assert_eq!(state.attributes["date"], "2026-10-20");
        assert_eq!(state.attributes["meals"], Value::Array(vec![]));

        // Unknown days read as closed too
        clock.advance_days(10);
        assert_eq!(sensor.state().state, CLOSED_LABEL);
    }
}
