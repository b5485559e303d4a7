//! Immutable fact store over persisted mutual-fund scheme records.
//!
//! The store is built once at startup from the JSON file written by the
//! external data pipeline and is read-only afterwards. It is shared across
//! all concurrent query handlers without synchronization.

pub mod records;
pub mod store;

// Re-export commonly used types
pub use records::{FactValue, SchemeRecord};
pub use store::{normalize, FactStore, NameMatch, StoreStats};
