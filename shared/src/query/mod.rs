//! Measurement query pipeline.
//!
//! Raw parameters flow through three stages:
//!
//! 1. [`parse_filter`] / [`parse_metrics_filter`] validate `field`,
//!    `start_date` and `end_date` into a [`FilterDescriptor`].
//! 2. [`plan_list`] / [`plan_metrics`] turn the filter into a range predicate
//!    and a projection or target field.
//! 3. [`execute_list`] / [`execute_metrics`] run the plan against an
//!    [`ObservationStore`](crate::storage::ObservationStore).
//!
//! # Example
//!
//! ```
//! use shared::query::{parse_filter, plan_list, FilterParams, Projection};
//! use shared::models::Field;
//!
//! let filter = parse_filter(&FilterParams::new().with_field("temperature")).unwrap();
//! let plan = plan_list(&filter);
//! assert_eq!(plan.projection, Projection::Single(Field::Temperature));
//! ```

mod error;
mod executor;
mod params;
mod planner;

pub use error::{DateBound, QueryError};
pub use executor::{compute_metrics, execute_list, execute_metrics, list_measurements};
pub use params::{parse_date, parse_filter, parse_metrics_filter, FilterDescriptor, FilterParams};
pub use planner::{plan_list, plan_metrics, ListPlan, MetricsPlan, Projection};
