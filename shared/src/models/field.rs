//! Measured field catalogue.
//!
//! The set of queryable fields is closed and fixed at compile time. Lookups go
//! through [`Field::parse`] and per-field values are read with a `match`, so no
//! code path ever addresses an observation by a free-form key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric field carried by every observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Air temperature in degrees Celsius.
    Temperature,
    /// Relative humidity in percent.
    Humidity,
    /// Atmospheric pressure in hectopascals.
    Pressure,
}

impl Field {
    /// Every valid field, in catalogue order.
    pub const ALL: [Self; 3] = [Self::Temperature, Self::Humidity, Self::Pressure];

    /// Parses a field name. Matching is exact and case-sensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use shared::models::Field;
    ///
    /// assert_eq!(Field::parse("humidity"), Some(Field::Humidity));
    /// assert_eq!(Field::parse("Humidity"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "temperature" => Some(Self::Temperature),
            "humidity" => Some(Self::Humidity),
            "pressure" => Some(Self::Pressure),
            _ => None,
        }
    }

    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Pressure => "pressure",
        }
    }

    /// Unit symbol the field is recorded in.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity => "%",
            Self::Pressure => "hPa",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature in degrees Celsius (°C)",
            Self::Humidity => "Relative humidity in percent (%)",
            Self::Pressure => "Atmospheric pressure in hectopascals (hPa)",
        }
    }

    /// Comma-separated list of valid names, for error messages.
    #[must_use]
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalogue entry describing a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Field name as accepted by the query API.
    pub name: Field,
    /// Unit symbol.
    pub unit: String,
    /// Human-readable description.
    pub description: String,
}

impl From<Field> for FieldInfo {
    fn from(field: Field) -> Self {
        Self {
            name: field,
            unit: field.unit().to_string(),
            description: field.description().to_string(),
        }
    }
}

/// Returns the catalogue of all fields.
#[must_use]
pub fn field_catalogue() -> Vec<FieldInfo> {
    Field::ALL.into_iter().map(FieldInfo::from).collect()
}
