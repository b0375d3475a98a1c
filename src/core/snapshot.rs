//! Exchange rate snapshot model

use super::date::{is_in_supported_range, today};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One quoted currency inside a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateEntry {
    pub base_currency: String,
    pub currency: String,
    pub purchase_rate: Decimal,
    pub sale_rate: Decimal,
}

impl RateEntry {
    pub fn new(
        base_currency: &str,
        currency: &str,
        purchase_rate: Decimal,
        sale_rate: Decimal,
    ) -> Self {
        Self {
            base_currency: base_currency.to_string(),
            currency: currency.to_string(),
            purchase_rate,
            sale_rate,
        }
    }

    /// An entry is tradeable only when both sides carry a quote.
    pub fn is_available(&self) -> bool {
        self.purchase_rate > Decimal::ZERO && self.sale_rate > Decimal::ZERO
    }
}

/// Rates of one base currency for one date, in provider order.
///
/// The default snapshot has an empty base currency and is therefore never valid; it
/// stands for "nothing fetched yet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateSnapshot {
    pub base_currency: String,
    pub date: NaiveDate,
    pub rates: Vec<RateEntry>,
}

impl RateSnapshot {
    pub fn new(base_currency: &str, date: NaiveDate, rates: Vec<RateEntry>) -> Self {
        Self {
            base_currency: base_currency.to_string(),
            date,
            rates,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_on(today())
    }

    /// Valid when the base currency is set and the date lies in `[today - 4y, today]`.
    pub fn is_valid_on(&self, today: NaiveDate) -> bool {
        !self.base_currency.is_empty() && is_in_supported_range(self.date, today)
    }

    /// First entry quoting `currency`. Duplicates from the provider are never merged.
    pub fn find(&self, currency: &str) -> Option<&RateEntry> {
        self.rates.iter().find(|entry| entry.currency == currency)
    }
}
