//! Query pipeline errors.

use crate::models::Field;
use crate::storage::ObservationStoreError;
use std::fmt;
use thiserror::Error;

/// Which end of the date range a parameter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// The `start_date` parameter.
    Start,
    /// The `end_date` parameter.
    End,
}

impl DateBound {
    /// Query parameter name for this bound.
    #[must_use]
    pub const fn param_name(self) -> &'static str {
        match self {
            Self::Start => "start_date",
            Self::End => "end_date",
        }
    }
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param_name())
    }
}

/// Errors produced while validating, planning or executing a query.
///
/// The first three variants are caller mistakes and are raised before the
/// store is touched. `NoDataFound` is a distinguishable empty outcome rather
/// than a fault.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The `field` parameter is not a known field.
    #[error("Invalid field '{0}'. Must be one of: {valid}", valid = Field::valid_names())]
    InvalidField(String),

    /// A date parameter is not a valid `YYYY-MM-DD` date.
    #[error("Invalid {bound} format. Use YYYY-MM-DD")]
    InvalidDateFormat {
        /// The offending parameter.
        bound: DateBound,
    },

    /// The `field` parameter is required but absent.
    #[error("Field parameter is required. Must be one of: {valid}", valid = Field::valid_names())]
    MissingField,

    /// Nothing matched the filter.
    #[error("No measurements found for the specified criteria")]
    NoDataFound,

    /// The store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] ObservationStoreError),
}

impl QueryError {
    /// Returns true for errors caused by invalid caller input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidField(_) | Self::InvalidDateFormat { .. } | Self::MissingField
        )
    }
}
