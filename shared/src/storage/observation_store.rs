//! Observation storage trait and implementations.
//!
//! Provides the `ObservationStore` trait for abstracting range scans and
//! aggregation over stored observations, an `InMemoryObservationStore` for
//! development and testing, and a `ClickHouseObservationStore` for production.

use crate::models::{Field, Observation};
use crate::stats::{FieldSummary, RunningStats};
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors that can occur during observation store operations.
#[derive(Debug, Error)]
pub enum ObservationStoreError {
    /// Failed to acquire lock on the store.
    #[error("Failed to acquire lock on observation store")]
    LockError,

    /// Generic storage error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Timestamp cannot be stored as 64-bit nanoseconds.
    #[error("Timestamp {0} is outside the storable range")]
    TimestampOutOfRange(DateTime<Utc>),
}

/// Timestamp range predicate for scans and aggregations.
///
/// Both bounds are inclusive; an absent bound leaves that side open. A start
/// after the end is not rejected, it simply matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObservationQuery {
    /// Earliest matching timestamp (inclusive).
    pub start_time: Option<DateTime<Utc>>,

    /// Latest matching timestamp (inclusive).
    pub end_time: Option<DateTime<Utc>>,
}

impl ObservationQuery {
    /// Creates an unbounded query (matches every observation).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start time filter.
    #[must_use]
    pub fn with_start_time(mut self, start: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self
    }

    /// Sets the end time filter.
    #[must_use]
    pub fn with_end_time(mut self, end: DateTime<Utc>) -> Self {
        self.end_time = Some(end);
        self
    }

    /// Returns true if `timestamp` falls inside the range.
    #[must_use]
    pub fn matches(&self, timestamp: DateTime<Utc>) -> bool {
        self.start_time.map_or(true, |start| timestamp >= start)
            && self.end_time.map_or(true, |end| timestamp <= end)
    }
}

/// Trait for observation storage implementations.
///
/// Implementations must be thread-safe (Send + Sync). Writes come from the
/// ingestion producer; the query pipeline only reads.
pub trait ObservationStore: Send + Sync {
    /// Appends a single observation.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn insert(&self, observation: Observation) -> Result<(), ObservationStoreError>;

    /// Appends multiple observations.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn insert_batch(&self, observations: Vec<Observation>) -> Result<(), ObservationStoreError>;

    /// Returns all observations in range, ascending by timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails.
    fn scan(&self, query: &ObservationQuery) -> Result<Vec<Observation>, ObservationStoreError>;

    /// Feeds the value of `field` for every observation in range to `visit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails.
    fn for_each_value(
        &self,
        query: &ObservationQuery,
        field: Field,
        visit: &mut dyn FnMut(f64),
    ) -> Result<(), ObservationStoreError>;

    /// Summarizes `field` over the range, `None` when nothing matches.
    ///
    /// The default streams values through [`RunningStats`]. Backends with a
    /// native aggregation should override it.
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregation fails.
    fn summarize(
        &self,
        query: &ObservationQuery,
        field: Field,
    ) -> Result<Option<FieldSummary>, ObservationStoreError> {
        let mut stats = RunningStats::new();
        self.for_each_value(query, field, &mut |value| stats.push(value))?;
        Ok(stats.summary())
    }

    /// Returns the total number of stored observations.
    ///
    /// # Errors
    ///
    /// Returns an error if the count operation fails.
    fn count(&self) -> Result<usize, ObservationStoreError>;

    /// Removes all observations.
    ///
    /// # Errors
    ///
    /// Returns an error if the clear operation fails.
    fn clear(&self) -> Result<(), ObservationStoreError>;
}

/// In-memory observation store implementation.
#[derive(Debug, Default)]
pub struct InMemoryObservationStore {
    observations: Arc<RwLock<Vec<Observation>>>,
}

impl InMemoryObservationStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observations: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a new in-memory store wrapped in an Arc.
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl ObservationStore for InMemoryObservationStore {
    fn insert(&self, observation: Observation) -> Result<(), ObservationStoreError> {
        let mut observations = self
            .observations
            .write()
            .map_err(|_| ObservationStoreError::LockError)?;
        observations.push(observation);
        Ok(())
    }

    fn insert_batch(&self, batch: Vec<Observation>) -> Result<(), ObservationStoreError> {
        let mut observations = self
            .observations
            .write()
            .map_err(|_| ObservationStoreError::LockError)?;
        observations.extend(batch);
        Ok(())
    }

    fn scan(&self, query: &ObservationQuery) -> Result<Vec<Observation>, ObservationStoreError> {
        let observations = self
            .observations
            .read()
            .map_err(|_| ObservationStoreError::LockError)?;

        let mut matching: Vec<Observation> = observations
            .iter()
            .filter(|o| query.matches(o.timestamp))
            .cloned()
            .collect();

        // Stable, so equal timestamps keep insertion order.
        matching.sort_by_key(|o| o.timestamp);
        Ok(matching)
    }

    fn for_each_value(
        &self,
        query: &ObservationQuery,
        field: Field,
        visit: &mut dyn FnMut(f64),
    ) -> Result<(), ObservationStoreError> {
        let observations = self
            .observations
            .read()
            .map_err(|_| ObservationStoreError::LockError)?;

        observations
            .iter()
            .filter(|o| query.matches(o.timestamp))
            .for_each(|o| visit(o.value(field)));
        Ok(())
    }

    fn count(&self) -> Result<usize, ObservationStoreError> {
        let observations = self
            .observations
            .read()
            .map_err(|_| ObservationStoreError::LockError)?;
        Ok(observations.len())
    }

    fn clear(&self) -> Result<(), ObservationStoreError> {
        let mut observations = self
            .observations
            .write()
            .map_err(|_| ObservationStoreError::LockError)?;
        observations.clear();
        Ok(())
    }
}

/// `ClickHouse`-backed observation store implementation.
///
/// Observations live in the `observations` table with nanosecond `Int64`
/// timestamps. Summaries are delegated to `ClickHouse` aggregate functions.
#[derive(Clone)]
pub struct ClickHouseObservationStore {
    client: Arc<clickhouse::Client>,
}

#[derive(clickhouse::Row, serde::Serialize, serde::Deserialize)]
struct ObservationRow {
    timestamp: i64,
    temperature: f64,
    humidity: f64,
    pressure: f64,
}

impl TryFrom<Observation> for ObservationRow {
    type Error = ObservationStoreError;

    fn try_from(observation: Observation) -> Result<Self, Self::Error> {
        let timestamp = observation
            .timestamp
            .timestamp_nanos_opt()
            .ok_or(ObservationStoreError::TimestampOutOfRange(observation.timestamp))?;
        Ok(Self {
            timestamp,
            temperature: observation.temperature,
            humidity: observation.humidity,
            pressure: observation.pressure,
        })
    }
}

impl From<ObservationRow> for Observation {
    fn from(row: ObservationRow) -> Self {
        Self {
            timestamp: DateTime::from_timestamp_nanos(row.timestamp),
            temperature: row.temperature,
            humidity: row.humidity,
            pressure: row.pressure,
        }
    }
}

/// Converts a query bound to nanoseconds, saturating outside the representable range.
fn to_nanos(timestamp: DateTime<Utc>) -> i64 {
    timestamp.timestamp_nanos_opt().unwrap_or(if timestamp.timestamp() > 0 {
        i64::MAX
    } else {
        i64::MIN
    })
}

/// Column holding `field`.
fn column(field: Field) -> &'static str {
    match field {
        Field::Temperature => "temperature",
        Field::Humidity => "humidity",
        Field::Pressure => "pressure",
    }
}

fn where_clause(query: &ObservationQuery) -> String {
    let mut clause = String::from(" WHERE 1=1");
    if let Some(start) = query.start_time {
        clause.push_str(&format!(" AND timestamp >= {}", to_nanos(start)));
    }
    if let Some(end) = query.end_time {
        clause.push_str(&format!(" AND timestamp <= {}", to_nanos(end)));
    }
    clause
}

impl ClickHouseObservationStore {
    /// Creates a new `ClickHouse` observation store with the given client.
    #[must_use]
    pub fn new(client: Arc<clickhouse::Client>) -> Self {
        Self { client }
    }

    /// Creates a new `ClickHouse` observation store wrapped in an Arc.
    #[must_use]
    pub fn new_shared(client: Arc<clickhouse::Client>) -> Arc<Self> {
        Arc::new(Self::new(client))
    }

    /// Creates the `observations` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the DDL statement fails.
    pub fn ensure_schema(&self) -> Result<(), ObservationStoreError> {
        let client = Arc::clone(&self.client);
        Self::block_on(async move {
            client
                .query(
                    "CREATE TABLE IF NOT EXISTS observations (\
                     timestamp Int64, \
                     temperature Float64, \
                     humidity Float64, \
                     pressure Float64\
                     ) ENGINE = MergeTree ORDER BY timestamp",
                )
                .execute()
                .await
        })
    }

    /// Helper to execute async operations synchronously.
    fn block_on<F, T>(future: F) -> Result<T, ObservationStoreError>
    where
        F: std::future::Future<Output = Result<T, clickhouse::error::Error>>,
    {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current()
                .block_on(future)
                .map_err(|e| ObservationStoreError::StorageError(e.to_string()))
        })
    }
}

impl ObservationStore for ClickHouseObservationStore {
    fn insert(&self, observation: Observation) -> Result<(), ObservationStoreError> {
        self.insert_batch(vec![observation])
    }

    fn insert_batch(&self, observations: Vec<Observation>) -> Result<(), ObservationStoreError> {
        if observations.is_empty() {
            return Ok(());
        }

        let rows = observations
            .into_iter()
            .map(ObservationRow::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let client = Arc::clone(&self.client);
        Self::block_on(async move {
            let mut inserter = client.insert::<ObservationRow>("observations").await?;
            for row in &rows {
                inserter.write(row).await?;
            }
            inserter.end().await?;
            Ok(())
        })
    }

    fn scan(&self, query: &ObservationQuery) -> Result<Vec<Observation>, ObservationStoreError> {
        let sql = format!(
            "SELECT timestamp, temperature, humidity, pressure \
             FROM observations{} ORDER BY timestamp ASC",
            where_clause(query)
        );

        let client = Arc::clone(&self.client);
        let rows = Self::block_on(async move {
            client.query(&sql).fetch_all::<ObservationRow>().await
        })?;

        Ok(rows.into_iter().map(Observation::from).collect())
    }

    fn for_each_value(
        &self,
        query: &ObservationQuery,
        field: Field,
        visit: &mut dyn FnMut(f64),
    ) -> Result<(), ObservationStoreError> {
        #[derive(clickhouse::Row, serde::Deserialize)]
        struct ValueRow {
            value: f64,
        }

        let sql = format!(
            "SELECT {} AS value FROM observations{}",
            column(field),
            where_clause(query)
        );

        let client = Arc::clone(&self.client);
        Self::block_on(async move {
            let mut cursor = client.query(&sql).fetch::<ValueRow>()?;
            while let Some(row) = cursor.next().await? {
                visit(row.value);
            }
            Ok(())
        })
    }

    fn summarize(
        &self,
        query: &ObservationQuery,
        field: Field,
    ) -> Result<Option<FieldSummary>, ObservationStoreError> {
        #[derive(clickhouse::Row, serde::Deserialize)]
        struct SummaryRow {
            sample_count: u64,
            mean: f64,
            min_value: f64,
            max_value: f64,
            std_dev: f64,
        }

        let col = column(field);
        let sql = format!(
            "SELECT count() AS sample_count, avg({col}) AS mean, min({col}) AS min_value, \
             max({col}) AS max_value, stddevPop({col}) AS std_dev FROM observations{}",
            where_clause(query)
        );

        let client = Arc::clone(&self.client);
        let row = Self::block_on(async move {
            client.query(&sql).fetch_one::<SummaryRow>().await
        })?;

        if row.sample_count == 0 {
            return Ok(None);
        }

        Ok(Some(FieldSummary {
            count: row.sample_count,
            mean: row.mean,
            min: row.min_value,
            max: row.max_value,
            std_dev: if row.sample_count == 1 { 0.0 } else { row.std_dev },
        }))
    }

    fn count(&self) -> Result<usize, ObservationStoreError> {
        let client = Arc::clone(&self.client);
        let count: u64 = Self::block_on(async move {
            client
                .query("SELECT count() FROM observations")
                .fetch_one::<u64>()
                .await
        })?;

        Ok(usize::try_from(count).unwrap_or(usize::MAX))
    }

    fn clear(&self) -> Result<(), ObservationStoreError> {
        let client = Arc::clone(&self.client);
        Self::block_on(async move { client.query("TRUNCATE TABLE observations").execute().await })
    }
}
