//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::query::{ListResult, Summary};
use crate::store::TimedValue;

// ============================================
// MEASUREMENT DTOs
// ============================================

/// Query parameters shared by the list and metrics endpoints
///
/// Everything arrives as optional strings; validation happens in the query
/// layer, not here.
#[derive(Debug, Default, Deserialize)]
pub struct MeasurementParams {
    /// Field selector: field1, field2 or field3
    #[serde(default)]
    pub field: Option<String>,
    /// Inclusive range start, YYYY-MM-DD
    #[serde(default)]
    pub start_date: Option<String>,
    /// Inclusive range end, YYYY-MM-DD
    #[serde(default)]
    pub end_date: Option<String>,
    /// Page number, 1-based (list endpoint only)
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size, clamped to [1, 1000] (list endpoint only)
    #[serde(default)]
    pub limit: Option<u32>,
}

/// One (timestamp, value) pair in a list response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DataPointDto {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Value of the selected field
    pub value: f64,
}

impl From<TimedValue> for DataPointDto {
    fn from(v: TimedValue) -> Self {
        Self {
            timestamp: v.timestamp,
            value: v.value,
        }
    }
}

/// Response for GET /api/measurements
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    /// Selected field
    pub field: String,
    /// Page number served
    pub page: u32,
    /// Page size used
    pub limit: u32,
    /// Total matching records, ignoring pagination
    pub total: u64,
    /// Time-ascending data points for this page
    pub data: Vec<DataPointDto>,
}

impl From<ListResult> for ListResponse {
    fn from(result: ListResult) -> Self {
        Self {
            field: result.field.to_string(),
            page: result.page,
            limit: result.limit,
            total: result.total,
            data: result.data.into_iter().map(DataPointDto::from).collect(),
        }
    }
}

/// Response for GET /api/measurements/metrics
#[derive(Debug, Serialize, Deserialize)]
pub struct MetricsResponse {
    /// Selected field
    pub field: String,
    /// Number of qualifying values
    pub count: u64,
    /// Arithmetic mean
    pub average: f64,
    /// Smallest qualifying value
    pub min: f64,
    /// Largest qualifying value
    pub max: f64,
    /// Population standard deviation
    #[serde(rename = "stdDev")]
    pub std_dev: f64,
}

impl From<Summary> for MetricsResponse {
    fn from(summary: Summary) -> Self {
        Self {
            field: summary.field.to_string(),
            count: summary.count,
            average: summary.average,
            min: summary.min,
            max: summary.max,
            std_dev: summary.std_dev,
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy or unhealthy
    pub status: String,
    /// Number of stored readings
    pub readings: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
