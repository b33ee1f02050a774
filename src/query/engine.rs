//! Query engine
//!
//! Executes the two read paths against the reading store:
//!
//! 1. **List mode**: count + a time-ascending, skip/limit-bounded fetch of
//!    (timestamp, value) pairs, both issued against the same filter.
//! 2. **Metrics mode**: a single aggregate over every qualifying value,
//!    with no pagination.
//!
//! The engine holds no state beyond the store handle; every call is a
//! single-shot request/response.

use crate::query::error::{QueryError, QueryResult};
use crate::query::filter::Filter;
use crate::query::page::Page;
use crate::store::{Field, ReadingStore, TimedValue};
use std::sync::Arc;

/// One page of time-ordered readings for a single field
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult {
    /// Selected field
    pub field: Field,
    /// Page number served, 1-based
    pub page: u32,
    /// Page size used
    pub limit: u32,
    /// Total matching records, ignoring pagination
    pub total: u64,
    /// Time-ascending (timestamp, value) pairs for this page
    pub data: Vec<TimedValue>,
}

/// Aggregate statistics over all qualifying values of a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Selected field
    pub field: Field,
    /// Number of qualifying values
    pub count: u64,
    /// Arithmetic mean
    pub average: f64,
    /// Smallest qualifying value
    pub min: f64,
    /// Largest qualifying value
    pub max: f64,
    /// Population standard deviation (divide by n); 0 for a single value
    pub std_dev: f64,
}

/// Stateless executor for list and metrics queries
pub struct QueryEngine {
    /// Storage collaborator
    store: Arc<dyn ReadingStore>,
}

impl QueryEngine {
    /// Create a new query engine over a reading store
    pub fn new(store: Arc<dyn ReadingStore>) -> Self {
        Self { store }
    }

    /// List mode: one validated page of time-ordered readings
    ///
    /// The count and the bounded fetch are two separate reads against the
    /// same filter; read skew between them is tolerated. A page past the
    /// end of the matching set is reported as `NoData`, even when `total`
    /// is nonzero.
    pub async fn list_page(&self, filter: &Filter, page: Page) -> QueryResult<ListResult> {
        let total = self.store.count(filter.range).await?;
        let data = self
            .store
            .find_page(filter.range, filter.field, page.skip(), page.limit as usize)
            .await?;

        if data.is_empty() {
            return Err(QueryError::NoData);
        }

        tracing::debug!(
            field = %filter.field,
            page = page.number,
            limit = page.limit,
            total,
            rows = data.len(),
            "list query served"
        );

        Ok(ListResult {
            field: filter.field,
            page: page.number,
            limit: page.limit,
            total,
            data,
        })
    }

    /// Metrics mode: aggregate statistics over the full qualifying set
    ///
    /// Non-numeric/absent values for the field are excluded, not treated
    /// as zero. A store that reports no deviation for a single-element set
    /// is normalized to 0.
    pub async fn aggregate(&self, filter: &Filter) -> QueryResult<Summary> {
        let summary = self
            .store
            .aggregate_numeric(filter.range, filter.field)
            .await?
            .ok_or(QueryError::NoValues)?;

        tracing::debug!(
            field = %filter.field,
            count = summary.count,
            "metrics query served"
        );

        Ok(Summary {
            field: filter.field,
            count: summary.count,
            average: summary.avg,
            min: summary.min,
            max: summary.max,
            std_dev: summary.pop_std_dev.unwrap_or(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonStore, Reading, ReadingStore, StoreConfig};
    use tempfile::tempdir;

    async fn engine_with(readings: Vec<Reading>) -> (QueryEngine, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(StoreConfig::new(dir.path())).await.unwrap();
        store.insert_many(readings).await.unwrap();
        (QueryEngine::new(Arc::new(store)), dir)
    }

    fn day_millis(day: u32) -> i64 {
        // days in January 2024, UTC
        chrono::NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    fn seeded() -> Vec<Reading> {
        (1..=5)
            .map(|i| Reading::new(day_millis(i), (i as f64) * 10.0, i as f64, 0.0))
            .collect()
    }

    #[tokio::test]
    async fn test_list_first_page_in_order() {
        let (engine, _dir) = engine_with(seeded()).await;
        let filter = Filter::unrestricted(Field::Field1);

        let result = engine
            .list_page(&filter, Page::new(Some(1), Some(2)))
            .await
            .unwrap();

        assert_eq!(result.total, 5);
        assert_eq!(result.page, 1);
        assert_eq!(result.limit, 2);
        let values: Vec<f64> = result.data.iter().map(|v| v.value).collect();
        assert_eq!(values, vec![10.0, 20.0]);
        assert!(result.data[0].timestamp < result.data[1].timestamp);
    }

    #[tokio::test]
    async fn test_list_last_partial_page() {
        let (engine, _dir) = engine_with(seeded()).await;
        let filter = Filter::unrestricted(Field::Field1);

        let result = engine
            .list_page(&filter, Page::new(Some(3), Some(2)))
            .await
            .unwrap();

        assert_eq!(result.total, 5);
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].value, 50.0);
    }

    #[tokio::test]
    async fn test_list_page_past_end_is_no_data() {
        let (engine, _dir) = engine_with(seeded()).await;
        let filter = Filter::unrestricted(Field::Field1);

        // total is 5 but page 4 at limit 2 starts at skip 6
        let err = engine
            .list_page(&filter, Page::new(Some(4), Some(2)))
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::NoData));
    }

    #[tokio::test]
    async fn test_list_empty_range_is_no_data() {
        let (engine, _dir) = engine_with(seeded()).await;
        let filter =
            Filter::normalize(Some("field1"), Some("2030-01-01"), Some("2030-01-02")).unwrap();

        let err = engine.list_page(&filter, Page::default()).await.unwrap_err();
        assert!(matches!(err, QueryError::NoData));
    }

    #[tokio::test]
    async fn test_list_respects_date_range() {
        let (engine, _dir) = engine_with(seeded()).await;
        let filter =
            Filter::normalize(Some("field1"), Some("2024-01-02"), Some("2024-01-04")).unwrap();

        let result = engine.list_page(&filter, Page::default()).await.unwrap();

        assert_eq!(result.total, 3);
        let values: Vec<f64> = result.data.iter().map(|v| v.value).collect();
        assert_eq!(values, vec![20.0, 30.0, 40.0]);
    }

    #[tokio::test]
    async fn test_aggregate_known_statistics() {
        let (engine, _dir) = engine_with(seeded()).await;
        let filter = Filter::unrestricted(Field::Field1);

        let summary = engine.aggregate(&filter).await.unwrap();

        assert_eq!(summary.count, 5);
        assert_eq!(summary.average, 30.0);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 50.0);
        assert!((summary.std_dev - 200.0_f64.sqrt()).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_aggregate_invariants() {
        let (engine, _dir) = engine_with(seeded()).await;

        for field in ["field1", "field2"] {
            let filter = Filter::normalize(Some(field), None, None).unwrap();
            let summary = engine.aggregate(&filter).await.unwrap();

            assert!(summary.count > 0);
            assert!(summary.min <= summary.average);
            assert!(summary.average <= summary.max);
            assert!(summary.std_dev >= 0.0);
        }
    }

    #[tokio::test]
    async fn test_aggregate_single_value_zero_deviation() {
        let (engine, _dir) =
            engine_with(vec![Reading::at(day_millis(1)).with(Field::Field2, 7.5)]).await;
        let filter = Filter::unrestricted(Field::Field2);

        let summary = engine.aggregate(&filter).await.unwrap();

        assert_eq!(summary.count, 1);
        assert_eq!(summary.average, 7.5);
        assert_eq!(summary.std_dev, 0.0);
    }

    #[tokio::test]
    async fn test_aggregate_excludes_absent_values() {
        let readings = vec![
            Reading::at(day_millis(1)).with(Field::Field1, 10.0),
            Reading::at(day_millis(2)).with(Field::Field2, 99.0),
            Reading::at(day_millis(3)).with(Field::Field1, 30.0),
        ];
        let (engine, _dir) = engine_with(readings).await;
        let filter = Filter::unrestricted(Field::Field1);

        let summary = engine.aggregate(&filter).await.unwrap();

        // the field2-only reading contributes nothing, not a zero
        assert_eq!(summary.count, 2);
        assert_eq!(summary.average, 20.0);
    }

    #[tokio::test]
    async fn test_aggregate_no_values() {
        let (engine, _dir) =
            engine_with(vec![Reading::at(day_millis(1)).with(Field::Field2, 1.0)]).await;
        let filter = Filter::unrestricted(Field::Field3);

        let err = engine.aggregate(&filter).await.unwrap_err();
        assert!(matches!(err, QueryError::NoValues));
    }
}
