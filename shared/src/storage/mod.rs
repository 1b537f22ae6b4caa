//! Storage traits and implementations.
//!
//! The `ObservationStore` trait defines the range-scan and aggregation
//! primitives the query pipeline needs, allowing different implementations
//! (in-memory, `ClickHouse`).

pub mod observation_store;

pub use observation_store::{
    ClickHouseObservationStore, InMemoryObservationStore, ObservationQuery, ObservationStore,
    ObservationStoreError,
};
