//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod date;
pub mod format;
pub mod log;
pub mod provider;
pub mod snapshot;

// Re-export main types for cleaner imports
pub use cache::SnapshotCache;
pub use provider::{FetchError, RateProvider};
pub use snapshot::{RateEntry, RateSnapshot};
