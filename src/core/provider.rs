//! Rate source abstraction

use super::snapshot::RateSnapshot;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// Ways a rate fetch can fail. Callers match on the kind instead of inspecting messages.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Date {date} is outside of the supported range")]
    InvalidDateRange { date: NaiveDate },
    #[error("Rate provider failed: {0:#}")]
    Provider(#[source] anyhow::Error),
    #[error("Rate provider returned an invalid snapshot: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, date: NaiveDate) -> Result<RateSnapshot, FetchError>;
}
