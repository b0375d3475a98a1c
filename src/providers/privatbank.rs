use crate::core::date::{format_date, is_in_supported_range, parse_provider_date, today};
use crate::core::provider::{FetchError, RateProvider};
use crate::core::snapshot::{RateEntry, RateSnapshot};
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::ACCEPT;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, error, instrument};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeRatesResponse {
    #[serde(default)]
    base_currency_lit: String,
    date: String,
    #[serde(default)]
    exchange_rate: Vec<ExchangeRateItem>,
}

// Currencies the bank does not trade come without purchase/sale rates.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeRateItem {
    #[serde(default)]
    base_currency: String,
    currency: String,
    #[serde(default)]
    purchase_rate: Decimal,
    #[serde(default)]
    sale_rate: Decimal,
}

/// Archive rates from the PrivatBank public API.
pub struct PrivatBankProvider {
    base_url: String,
    client: reqwest::Client,
}

impl PrivatBankProvider {
    /// `base_url` is the full request URL up to the date, e.g. `...exchange_rates?json&date=`.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("ratebot/1.0")
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.to_string(),
            client,
        })
    }

    fn url_for(&self, date: NaiveDate) -> String {
        format!("{}{}", self.base_url, format_date(date))
    }

    async fn request(&self, url: &str) -> anyhow::Result<ExchangeRatesResponse> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} URL: {}", response.status(), url));
        }

        let text = response
            .text()
            .await
            .context("Failed to get response text")?;

        match serde_json::from_str(&text) {
            Ok(data) => Ok(data),
            Err(e) => {
                error!(error = ?e, response = %text, "Failed to parse rates response");
                Err(e).context("Failed to parse rates response")
            }
        }
    }
}

impl ExchangeRatesResponse {
    fn into_snapshot(self) -> Result<RateSnapshot, FetchError> {
        let date = parse_provider_date(&self.date).ok_or_else(|| {
            FetchError::InvalidResponse(format!("Unexpected date format: {}", self.date))
        })?;

        let rates = self
            .exchange_rate
            .into_iter()
            .map(|item| RateEntry {
                base_currency: item.base_currency,
                currency: item.currency,
                purchase_rate: item.purchase_rate,
                sale_rate: item.sale_rate,
            })
            .collect();

        Ok(RateSnapshot {
            base_currency: self.base_currency_lit,
            date,
            rates,
        })
    }
}

#[async_trait]
impl RateProvider for PrivatBankProvider {
    #[instrument(name = "PrivatBankRatesFetch", skip(self), fields(date = %date))]
    async fn fetch_rates(&self, date: NaiveDate) -> Result<RateSnapshot, FetchError> {
        let today = today();
        if !is_in_supported_range(date, today) {
            return Err(FetchError::InvalidDateRange { date });
        }

        let url = self.url_for(date);
        debug!("Requesting exchange rates from {}", url);

        let data = self.request(&url).await.map_err(FetchError::Provider)?;
        let snapshot = data.into_snapshot()?;

        if !snapshot.is_valid_on(today) {
            return Err(FetchError::InvalidResponse(format!(
                "base currency '{}' on {}",
                snapshot.base_currency,
                format_date(snapshot.date)
            )));
        }

        debug!(rates = snapshot.rates.len(), "Received exchange rates");
        Ok(snapshot)
    }
}
