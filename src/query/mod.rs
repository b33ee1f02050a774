//! Sensordeck query layer
//!
//! The core of the service: turns a field selection, an optional inclusive
//! UTC date range and pagination parameters into either a page of
//! time-ordered readings or an aggregate statistics summary.
//!
//! - **filter**: Request validation and range normalization
//! - **page**: Clamped page/limit pair
//! - **engine**: List and metrics execution against the store
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,ignore
//! use sensordeck::query::{Filter, Page, QueryEngine};
//!
//! let filter = Filter::normalize(Some("field1"), Some("2024-01-01"), Some("2024-01-31"))?;
//! let page = engine.list_page(&filter, Page::default()).await?;
//! let summary = engine.aggregate(&filter).await?;
//! ```

pub mod engine;
pub mod error;
pub mod filter;
pub mod page;

pub use engine::{ListResult, QueryEngine, Summary};
pub use error::{QueryError, QueryResult, ValidationError};
pub use filter::Filter;
pub use page::{Page, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
