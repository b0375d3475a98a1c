//! Text rendering of rate snapshots.
//!
//! Every function here is pure: the same snapshot and filter always render the same text
//! for a given day. Conditions that prevent rendering map to one fixed user message each.

use super::date::{format_date, today};
use super::snapshot::{RateEntry, RateSnapshot};
use chrono::NaiveDate;
use std::fmt::Write;
use thiserror::Error;

pub const GENERIC_ERROR: &str =
    "Something went wrong. I will fix it as soon as possible. Come back later.";
pub const NO_RATES: &str =
    "There are no available rates at the moment. Try another date or try again later";
pub const RATE_NOT_FOUND: &str =
    "I can not find needed rate. Try another date or try again later";
pub const NO_QUOTE: &str = "No rate for this day. Try another date or try again later";

/// Why a snapshot could not be rendered. `Display` is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("{}", GENERIC_ERROR)]
    InvalidSnapshot,
    #[error("{}", NO_RATES)]
    NoData,
    #[error("{}", RATE_NOT_FOUND)]
    NotFound,
    #[error("{}", NO_QUOTE)]
    NoQuote,
}

pub fn render_all(snapshot: &RateSnapshot) -> String {
    render_all_on(snapshot, today())
}

pub fn render_selected(snapshot: &RateSnapshot, currency: &str) -> String {
    render_selected_on(snapshot, currency, today())
}

pub fn render_all_on(snapshot: &RateSnapshot, today: NaiveDate) -> String {
    try_render_all(snapshot, today).unwrap_or_else(|e| e.to_string())
}

pub fn render_selected_on(snapshot: &RateSnapshot, currency: &str, today: NaiveDate) -> String {
    try_render_selected(snapshot, currency, today).unwrap_or_else(|e| e.to_string())
}

/// Codes of all tradeable entries, in provider order.
pub fn available_codes(snapshot: &RateSnapshot) -> Vec<String> {
    snapshot
        .rates
        .iter()
        .filter(|entry| entry.is_available())
        .map(|entry| entry.currency.clone())
        .collect()
}

fn check_renderable(snapshot: &RateSnapshot, today: NaiveDate) -> Result<(), RenderError> {
    if !snapshot.is_valid_on(today) {
        return Err(RenderError::InvalidSnapshot);
    }
    if snapshot.rates.is_empty() {
        return Err(RenderError::NoData);
    }
    Ok(())
}

pub fn try_render_all(snapshot: &RateSnapshot, today: NaiveDate) -> Result<String, RenderError> {
    check_renderable(snapshot, today)?;

    let mut response = if snapshot.date == today {
        format!("Today`s {} exchange rates are:", snapshot.base_currency)
    } else {
        format!(
            "The {} exchange rates on the this date({}) were:",
            snapshot.base_currency,
            format_date(snapshot.date)
        )
    };

    for entry in snapshot.rates.iter().filter(|entry| entry.is_available()) {
        // Writing into a String cannot fail.
        let _ = write!(response, "\n{} - {}", entry.currency, quote(entry));
    }

    Ok(response)
}

pub fn try_render_selected(
    snapshot: &RateSnapshot,
    currency: &str,
    today: NaiveDate,
) -> Result<String, RenderError> {
    check_renderable(snapshot, today)?;

    let entry = snapshot.find(currency).ok_or(RenderError::NotFound)?;
    if !entry.is_available() {
        return Err(RenderError::NoQuote);
    }

    let header = if snapshot.date == today {
        format!(
            "Today`s {} to {} exchange rate is: ",
            snapshot.base_currency, currency
        )
    } else {
        format!(
            "The {} to {} exchange rate on the this date({}) was: ",
            snapshot.base_currency,
            currency,
            format_date(snapshot.date)
        )
    };

    Ok(header + &quote(entry))
}

fn quote(entry: &RateEntry) -> String {
    format!(
        "{}/{}",
        entry.purchase_rate.normalize(),
        entry.sale_rate.normalize()
    )
}
