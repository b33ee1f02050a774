//! Sensordeck reading store
//!
//! This module provides the storage collaborator behind the query layer:
//!
//! - **types**: Core data structures (Reading, Field, DateRange)
//! - **engine**: The `ReadingStore` trait and the JSON-file-backed store
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use sensordeck::store::{Field, JsonStore, Reading, ReadingStore, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = JsonStore::open(StoreConfig::new("./data")).await?;
//!
//!     store
//!         .insert_many(vec![Reading::new(1704067200000, 42.0, 17.0, 130.0)])
//!         .await?;
//!
//!     let page = store.find_page(None, Field::Field1, 0, 200).await?;
//!     println!("{} readings", page.len());
//!
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use engine::{JsonStore, NumericSummary, ReadingStore, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use types::{DateRange, Field, Reading, TimedValue};
