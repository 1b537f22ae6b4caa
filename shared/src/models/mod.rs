//! Data models for the Skylog weather service.
//!
//! This module contains the observation record, the closed field catalogue and
//! the shapes returned by queries.

pub mod field;
pub mod observation;

pub use field::{field_catalogue, Field, FieldInfo};
pub use observation::{FieldReading, MeasurementView, Observation, ObservationValidationError};
