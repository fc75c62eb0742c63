//! Opaque canteen identifier.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier of a canteen in the OpenMensa API.
///
/// OpenMensa uses integers, but the value is treated as opaque: it is
/// accepted as either a JSON/TOML integer or a string and always rendered
/// as a string in URLs and unique ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanteenId(String);

impl CanteenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanteenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for CanteenId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for CanteenId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CanteenId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCanteenId {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for CanteenId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawCanteenId::deserialize(deserializer)? {
            RawCanteenId::Number(n) => CanteenId::from(n),
            RawCanteenId::Text(s) => CanteenId(s),
        })
    }
}

impl Serialize for CanteenId {
    /// Numeric ids stay numeric so config files and API payloads round-trip.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<u64>() {
            Ok(n) if n.to_string() == self.0 => serializer.serialize_u64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}
