//! Destination storage adapters
//!
//! PostgreSQL is the only destination. The pipeline depends on the
//! [`RowStore`] trait rather than the concrete store.

pub mod client;
pub mod postgres;
pub mod traits;

pub use client::PostgresClient;
pub use postgres::PostgresStore;
pub use traits::{RowStore, RELATIONSHIP_CONFLICT_KEY, ROW_CONFLICT_KEY};
