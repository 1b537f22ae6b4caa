//! Observation data model.
//!
//! Defines the `Observation` record written by the ingestion producer and the
//! projected views returned by list queries.

use super::field::Field;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use validator::{Validate, ValidationError};

/// A single weather observation.
///
/// Observations are immutable once written; the query side only reads them.
///
/// # Example
///
/// ```
/// use shared::models::{Field, Observation};
///
/// let obs = Observation::now(21.5, 48.0, 1013.2);
/// assert_eq!(obs.value(Field::Humidity), 48.0);
/// assert!(obs.validate_observation().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Observation {
    /// Time the observation was taken.
    #[validate(custom(function = "storable_timestamp"))]
    pub timestamp: DateTime<Utc>,

    /// Air temperature in °C.
    #[validate(custom(function = "finite"))]
    pub temperature: f64,

    /// Relative humidity in %.
    #[validate(
        custom(function = "finite"),
        range(min = 0.0, max = 100.0, message = "Humidity must be between 0 and 100")
    )]
    pub humidity: f64,

    /// Atmospheric pressure in hPa.
    #[validate(
        custom(function = "finite"),
        range(exclusive_min = 0.0, message = "Pressure must be positive")
    )]
    pub pressure: f64,
}

fn finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("not_finite").with_message("Value must be a finite number".into()))
    }
}

/// Timestamps must fit in signed 64-bit nanoseconds (1677-09-21 to 2262-04-11).
fn storable_timestamp(timestamp: &DateTime<Utc>) -> Result<(), ValidationError> {
    if timestamp.timestamp_nanos_opt().is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("timestamp_out_of_range")
            .with_message("Timestamp must lie between 1677-09-21 and 2262-04-11".into()))
    }
}

/// Errors that can occur during observation validation.
#[derive(Debug, Error)]
pub enum ObservationValidationError {
    /// One or more fields failed validation.
    #[error("Validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

impl Observation {
    /// Creates an observation taken at the given instant.
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, temperature: f64, humidity: f64, pressure: f64) -> Self {
        Self {
            timestamp,
            temperature,
            humidity,
            pressure,
        }
    }

    /// Creates an observation stamped with the current time.
    #[must_use]
    pub fn now(temperature: f64, humidity: f64, pressure: f64) -> Self {
        Self::new(Utc::now(), temperature, humidity, pressure)
    }

    /// Returns the value recorded for `field`.
    #[must_use]
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Temperature => self.temperature,
            Field::Humidity => self.humidity,
            Field::Pressure => self.pressure,
        }
    }

    /// Validates the observation.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is not finite, humidity lies outside
    /// `0..=100` or pressure is not positive.
    pub fn validate_observation(&self) -> Result<(), ObservationValidationError> {
        self.validate()?;
        Ok(())
    }
}

/// A single field of an observation together with its timestamp.
///
/// Serializes as `{"timestamp": ..., "<field>": value}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldReading {
    /// Time the observation was taken.
    pub timestamp: DateTime<Utc>,
    /// Which field this reading carries.
    pub field: Field,
    /// The recorded value.
    pub value: f64,
}

impl Serialize for FieldReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("timestamp", &self.timestamp)?;
        map.serialize_entry(self.field.as_str(), &self.value)?;
        map.end()
    }
}

/// One row of a list query result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MeasurementView {
    /// The complete observation.
    Full(Observation),
    /// A single projected field.
    Single(FieldReading),
}

impl MeasurementView {
    /// Timestamp of the underlying observation.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Full(obs) => obs.timestamp,
            Self::Single(reading) => reading.timestamp,
        }
    }
}
