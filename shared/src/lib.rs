//! Skylog Shared Library
//!
//! This crate contains the observation model, storage backends and the
//! measurement query pipeline shared by the Skylog API server and CLI.
//!
//! # Modules
//!
//! - [`models`] - Observation record and the closed field catalogue
//! - [`storage`] - Storage trait and implementations
//! - [`query`] - Parameter validation, planning and execution
//! - [`stats`] - Single-pass summary statistics
//!
//! # Example
//!
//! ```
//! use shared::models::Observation;
//! use shared::query::{compute_metrics, FilterParams};
//! use shared::storage::{InMemoryObservationStore, ObservationStore};
//!
//! let store = InMemoryObservationStore::new();
//! store.insert(Observation::now(10.0, 50.0, 1010.0)).unwrap();
//! store.insert(Observation::now(30.0, 70.0, 1030.0)).unwrap();
//!
//! let metrics = compute_metrics(&store, &FilterParams::new().with_field("temperature")).unwrap();
//! assert_eq!(metrics.count, 2);
//! assert_eq!(metrics.avg, 20.0);
//! assert_eq!(metrics.std_dev, 10.0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod models;
pub mod query;
pub mod stats;
pub mod storage;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
pub use validator;
