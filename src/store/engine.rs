//! Reading store
//!
//! The storage collaborator behind the query layer. The query engine only
//! sees the `ReadingStore` trait; `JsonStore` is the bundled implementation,
//! a time-sorted in-memory set of readings persisted to a JSON file.
//!
//! Thread-safe via Tokio's async RwLock for concurrent access.

use crate::store::error::{StoreError, StoreResult};
use crate::store::types::{DateRange, Field, Reading, TimedValue};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Configuration for the reading store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root directory for all data
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("sensordeck_data"),
        }
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Get path to the readings data file
    pub fn readings_path(&self) -> PathBuf {
        self.data_dir.join("readings.json")
    }
}

/// Numeric aggregate over one field of a filtered set of readings
///
/// `pop_std_dev` is the population standard deviation (divide by n, not n-1).
/// It may be absent for a single-element set; callers decide what a missing
/// value means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub count: u64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub pop_std_dev: Option<f64>,
}

/// Queryable time-ordered store of readings
///
/// The read methods take the same optional date range; issuing `count` and
/// `find_page` against an unchanged range is how the query layer builds a
/// consistent page. The trait does not promise isolation between the two
/// calls; the data is append-mostly and read skew is tolerated.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Count all readings within the range (all readings when None)
    async fn count(&self, range: Option<DateRange>) -> StoreResult<u64>;

    /// Fetch a time-ascending window of (timestamp, value) pairs
    ///
    /// Readings without a numeric value for `field` are skipped, not
    /// returned as zero. `skip`/`limit` apply after that projection.
    async fn find_page(
        &self,
        range: Option<DateRange>,
        field: Field,
        skip: usize,
        limit: usize,
    ) -> StoreResult<Vec<TimedValue>>;

    /// Aggregate all qualifying values of `field` within the range
    ///
    /// Returns None when no reading in range carries a numeric value for
    /// the field.
    async fn aggregate_numeric(
        &self,
        range: Option<DateRange>,
        field: Field,
    ) -> StoreResult<Option<NumericSummary>>;

    /// Insert a batch of readings, returning how many were stored
    async fn insert_many(&self, readings: Vec<Reading>) -> StoreResult<usize>;

    /// Remove all stored readings
    async fn reset(&self) -> StoreResult<()>;

    /// Total number of stored readings
    async fn len(&self) -> usize;
}

/// JSON-file-backed reading store
///
/// Readings are held in memory sorted by timestamp and flushed to
/// `readings.json` on every mutation. Mutations only happen during seeding
/// and resets, so the write path stays simple.
pub struct JsonStore {
    config: StoreConfig,
    readings: RwLock<Vec<Reading>>,
}

impl JsonStore {
    /// Open the store, loading any existing data file
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        let readings = Self::load(&config.readings_path())?;

        tracing::info!(
            count = readings.len(),
            path = %config.readings_path().display(),
            "reading store opened"
        );

        Ok(Self {
            config,
            readings: RwLock::new(readings),
        })
    }

    /// Load readings from a JSON file, sorted by timestamp
    fn load(path: &Path) -> StoreResult<Vec<Reading>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(path)?;
        let mut readings: Vec<Reading> = serde_json::from_str(&content)?;

        for reading in &readings {
            for value in [reading.field1, reading.field2, reading.field3]
                .into_iter()
                .flatten()
            {
                if !value.is_finite() {
                    return Err(StoreError::Corruption(format!(
                        "non-finite value at timestamp {}",
                        reading.timestamp
                    )));
                }
            }
        }

        readings.sort_by_key(|r| r.timestamp);
        Ok(readings)
    }

    /// Persist the current readings to the data file
    fn save(&self, readings: &[Reading]) -> StoreResult<()> {
        let path = self.config.readings_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(readings)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Index range covering all readings inside `range`
    ///
    /// Readings are sorted by timestamp, so both bounds come from binary
    /// searches (partition_point keeps duplicates on the correct side).
    fn window(readings: &[Reading], range: Option<DateRange>) -> (usize, usize) {
        match range {
            None => (0, readings.len()),
            Some(r) => {
                let lo = readings.partition_point(|x| x.timestamp < r.start);
                let hi = readings.partition_point(|x| x.timestamp <= r.end);
                (lo, hi)
            }
        }
    }
}

#[async_trait]
impl ReadingStore for JsonStore {
    async fn count(&self, range: Option<DateRange>) -> StoreResult<u64> {
        let readings = self.readings.read().await;
        let (lo, hi) = Self::window(&readings, range);
        Ok((hi - lo) as u64)
    }

    async fn find_page(
        &self,
        range: Option<DateRange>,
        field: Field,
        skip: usize,
        limit: usize,
    ) -> StoreResult<Vec<TimedValue>> {
        let readings = self.readings.read().await;
        let (lo, hi) = Self::window(&readings, range);

        Ok(readings[lo..hi]
            .iter()
            .filter_map(|r| {
                r.value_of(field).map(|value| TimedValue {
                    timestamp: r.timestamp,
                    value,
                })
            })
            .skip(skip)
            .take(limit)
            .collect())
    }

    async fn aggregate_numeric(
        &self,
        range: Option<DateRange>,
        field: Field,
    ) -> StoreResult<Option<NumericSummary>> {
        let readings = self.readings.read().await;
        let (lo, hi) = Self::window(&readings, range);

        let values: Vec<f64> = readings[lo..hi]
            .iter()
            .filter_map(|r| r.value_of(field))
            .collect();

        if values.is_empty() {
            return Ok(None);
        }

        let n = values.len() as f64;
        let avg = values.iter().sum::<f64>() / n;
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        // Population variance. A single-element set reports no deviation,
        // mirroring backing stores that return null for it.
        let pop_std_dev = if values.len() > 1 {
            let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / n;
            Some(variance.sqrt())
        } else {
            None
        };

        Ok(Some(NumericSummary {
            count: values.len() as u64,
            avg,
            min,
            max,
            pop_std_dev,
        }))
    }

    async fn insert_many(&self, mut new_readings: Vec<Reading>) -> StoreResult<usize> {
        let inserted = new_readings.len();
        let mut readings = self.readings.write().await;

        readings.append(&mut new_readings);
        readings.sort_by_key(|r| r.timestamp);
        self.save(&readings)?;

        tracing::debug!(inserted, total = readings.len(), "readings inserted");
        Ok(inserted)
    }

    async fn reset(&self) -> StoreResult<()> {
        let mut readings = self.readings.write().await;
        readings.clear();
        self.save(&readings)?;

        tracing::info!("reading store reset");
        Ok(())
    }

    async fn len(&self) -> usize {
        self.readings.read().await.len()
    }
}
