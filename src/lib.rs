//! # Sensordeck
//!
//! A small web service for storing time-series sensor-like readings and
//! serving range-filtered retrieval plus summary statistics to a browser
//! dashboard.
//!
//! ## Features
//!
//! - **Validated queries**: strict field and `YYYY-MM-DD` range validation
//!   with inclusive full-UTC-day expansion
//! - **Pagination**: clamped page/limit windows over time-ordered readings
//! - **Summary statistics**: count, average, min, max and population
//!   standard deviation over the filtered set
//! - **Simple storage**: JSON-file-backed, time-sorted reading store behind
//!   a trait seam
//!
//! ## Modules
//!
//! - [`store`]: Reading store (storage collaborator)
//! - [`query`]: Filter normalization, pagination and query execution
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sensordeck::query::{Filter, Page, QueryEngine};
//! use sensordeck::store::{JsonStore, Reading, ReadingStore, StoreConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(JsonStore::open(StoreConfig::new("./data")).await?);
//!     store
//!         .insert_many(vec![Reading::new(1704067200000, 42.0, 17.0, 130.0)])
//!         .await?;
//!
//!     let engine = QueryEngine::new(store);
//!
//!     let filter = Filter::normalize(Some("field1"), None, None)?;
//!     let page = engine.list_page(&filter, Page::default()).await?;
//!     println!("{} of {} readings", page.data.len(), page.total);
//!
//!     let summary = engine.aggregate(&filter).await?;
//!     println!("avg {} over {} values", summary.average, summary.count);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod query;
pub mod store;

// Re-export top-level types for convenience
pub use store::{
    DateRange, Field, JsonStore, NumericSummary, Reading, ReadingStore, StoreConfig, StoreError,
    StoreResult, TimedValue,
};

pub use query::{
    Filter, ListResult, Page, QueryEngine, QueryError, QueryResult, Summary, ValidationError,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
