//! Query planning.
//!
//! Converts a validated [`FilterDescriptor`] into a store-level range
//! predicate plus either a projection (list queries) or a target field
//! (metrics queries).

use super::error::QueryError;
use super::params::FilterDescriptor;
use crate::models::{Field, FieldReading, MeasurementView, Observation};
use crate::storage::ObservationQuery;

/// Shape of each returned row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Every field of the observation.
    Full,
    /// Timestamp plus one field.
    Single(Field),
}

impl Projection {
    /// Projects an observation into its returned shape.
    #[must_use]
    pub fn apply(self, observation: Observation) -> MeasurementView {
        match self {
            Self::Full => MeasurementView::Full(observation),
            Self::Single(field) => MeasurementView::Single(FieldReading {
                timestamp: observation.timestamp,
                field,
                value: observation.value(field),
            }),
        }
    }
}

/// Plan for a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListPlan {
    /// Range predicate.
    pub query: ObservationQuery,
    /// Row shape.
    pub projection: Projection,
}

/// Plan for a metrics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsPlan {
    /// Range predicate.
    pub query: ObservationQuery,
    /// Field to summarize.
    pub field: Field,
}

fn range_query(filter: &FilterDescriptor) -> ObservationQuery {
    ObservationQuery {
        start_time: filter.start,
        end_time: filter.end,
    }
}

/// Plans a list query.
#[must_use]
pub fn plan_list(filter: &FilterDescriptor) -> ListPlan {
    ListPlan {
        query: range_query(filter),
        projection: filter.field.map_or(Projection::Full, Projection::Single),
    }
}

/// Plans a metrics query.
///
/// # Errors
///
/// Returns [`QueryError::MissingField`] if the filter names no field.
pub fn plan_metrics(filter: &FilterDescriptor) -> Result<MetricsPlan, QueryError> {
    let field = filter.field.ok_or(QueryError::MissingField)?;
    Ok(MetricsPlan {
        query: range_query(filter),
        field,
    })
}
