use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use mensa_core::CanteenId;

/// One dish on a day's menu.
///
/// Only `name` is interpreted. Everything else the API sends (id, category,
/// prices, notes) is carried through untouched and serialized back as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Meal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Category as reported by the API, e.g. "Hauptgericht"
    pub fn category(&self) -> Option<&str> {
        self.extra.get("category").and_then(Value::as_str)
    }
}

/// Menu state of one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub enum DayMenu {
    /// The API answered with a meal list (possibly empty)
    Open(Vec<Meal>),
    /// The API reported the canteen closed (HTTP 404)
    Closed,
}

impl DayMenu {
    pub fn meals(&self) -> &[Meal] {
        match self {
            DayMenu::Open(meals) => meals,
            DayMenu::Closed => &[],
        }
    }

    /// True for an explicit closure and for a day with no meals
    pub fn is_closed(&self) -> bool {
        self.meals().is_empty()
    }
}

/// A canteen as listed by the discovery endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canteen {
    pub id: CanteenId,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// `[latitude, longitude]`
    #[serde(default)]
    pub coordinates: Option<[f64; 2]>,
}

impl Canteen {
    /// Label for selection lists: "Mensa Nord (Berlin)"
    pub fn label(&self) -> String {
        match self.city.as_deref() {
            Some(city) if !city.is_empty() => format!("{} ({})", self.name, city),
            _ => self.name.clone(),
        }
    }
}
