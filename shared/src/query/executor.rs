//! Query execution.
//!
//! Runs planned list and metrics queries against an observation store. The
//! `list_measurements` and `compute_metrics` entry points cover the whole
//! pipeline from raw parameters to result.

use super::error::QueryError;
use super::params::{parse_filter, parse_metrics_filter, FilterParams};
use super::planner::{plan_list, plan_metrics, ListPlan, MetricsPlan};
use crate::models::MeasurementView;
use crate::stats::MetricsResult;
use crate::storage::ObservationStore;

/// Executes a list plan.
///
/// # Errors
///
/// Returns [`QueryError::NoDataFound`] if nothing matched, or
/// [`QueryError::Storage`] if the scan failed.
pub fn execute_list(
    plan: &ListPlan,
    store: &dyn ObservationStore,
) -> Result<Vec<MeasurementView>, QueryError> {
    let observations = store.scan(&plan.query)?;
    if observations.is_empty() {
        return Err(QueryError::NoDataFound);
    }

    Ok(observations
        .into_iter()
        .map(|o| plan.projection.apply(o))
        .collect())
}

/// Executes a metrics plan.
///
/// # Errors
///
/// Returns [`QueryError::NoDataFound`] if nothing matched, or
/// [`QueryError::Storage`] if the aggregation failed.
pub fn execute_metrics(
    plan: &MetricsPlan,
    store: &dyn ObservationStore,
) -> Result<MetricsResult, QueryError> {
    let summary = store
        .summarize(&plan.query, plan.field)?
        .ok_or(QueryError::NoDataFound)?;

    Ok(MetricsResult::from_summary(plan.field, &summary))
}

/// Validates, plans and runs a list query.
///
/// # Errors
///
/// Returns a validation error before touching the store, otherwise any error
/// [`execute_list`] returns.
///
/// # Example
///
/// ```
/// use shared::models::Observation;
/// use shared::query::{list_measurements, FilterParams, QueryError};
/// use shared::storage::{InMemoryObservationStore, ObservationStore};
///
/// let store = InMemoryObservationStore::new();
/// let result = list_measurements(&store, &FilterParams::new());
/// assert!(matches!(result, Err(QueryError::NoDataFound)));
///
/// store.insert(Observation::now(12.0, 40.0, 1001.0)).unwrap();
/// let rows = list_measurements(&store, &FilterParams::new().with_field("pressure")).unwrap();
/// assert_eq!(rows.len(), 1);
/// ```
pub fn list_measurements(
    store: &dyn ObservationStore,
    params: &FilterParams,
) -> Result<Vec<MeasurementView>, QueryError> {
    let filter = parse_filter(params)?;
    let plan = plan_list(&filter);
    let rows = execute_list(&plan, store)?;

    tracing::debug!(
        rows = rows.len(),
        projection = ?plan.projection,
        "List query executed"
    );
    Ok(rows)
}

/// Validates, plans and runs a metrics query.
///
/// # Errors
///
/// Returns a validation error before touching the store, otherwise any error
/// [`execute_metrics`] returns.
pub fn compute_metrics(
    store: &dyn ObservationStore,
    params: &FilterParams,
) -> Result<MetricsResult, QueryError> {
    let filter = parse_metrics_filter(params)?;
    let plan = plan_metrics(&filter)?;
    let result = execute_metrics(&plan, store)?;

    tracing::debug!(
        field = %result.field,
        count = result.count,
        "Metrics query executed"
    );
    Ok(result)
}
