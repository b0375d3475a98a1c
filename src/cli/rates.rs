use crate::bot::controller::WRONG_DATE_FORMAT;
use crate::core::date::{parse_user_date, today};
use crate::core::format::{render_all, render_selected};
use crate::core::provider::RateProvider;
use anyhow::{Result, anyhow};
use tracing::info;

/// Fetches the rates for one date straight from the provider and renders them.
///
/// Unlike the chat flow, a rejected date or a provider failure is returned as an error.
pub async fn rates(
    provider: &impl RateProvider,
    date: Option<&str>,
    currency: Option<&str>,
) -> Result<String> {
    let date = match date {
        Some(text) => parse_user_date(text).ok_or_else(|| anyhow!(WRONG_DATE_FORMAT))?,
        None => today(),
    };
    info!(%date, ?currency, "Fetching rates");

    let snapshot = provider.fetch_rates(date).await?;

    Ok(match currency {
        Some(code) => render_selected(&snapshot, &code.to_uppercase()),
        None => render_all(&snapshot),
    })
}
