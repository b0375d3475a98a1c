//! Calendar rules shared by the bot and the provider.

use chrono::{Local, Months, NaiveDate};

/// How far back the rate archive reaches.
pub const HISTORY_MONTHS: u32 = 48;

/// Years `00..=49` are read as `20xx`, the rest as `19xx`.
const TWO_DIGIT_YEAR_PIVOT: i32 = 49;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Oldest date for which rates are served.
pub fn earliest_supported(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(HISTORY_MONTHS))
        .unwrap_or(NaiveDate::MIN)
}

pub fn is_in_supported_range(date: NaiveDate, today: NaiveDate) -> bool {
    date >= earliest_supported(today) && date <= today
}

/// Renders a date the way the provider and the chat texts expect it (`dd.MM.yyyy`).
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Parses free-form user input.
///
/// Accepted shapes are `d.M.yyyy`, `d.M.yy`, `d/M/yyyy` and `d/M/yy` where day and month
/// take one or two digits. The separator must be the same in both positions and no
/// surrounding whitespace is allowed.
pub fn parse_user_date(text: &str) -> Option<NaiveDate> {
    ['.', '/']
        .into_iter()
        .find_map(|separator| parse_with_separator(text, separator))
}

fn parse_with_separator(text: &str, separator: char) -> Option<NaiveDate> {
    let mut parts = text.split(separator);
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let day = parse_digits(day, 1, 2)?;
    let month = parse_digits(month, 1, 2)?;
    let year = match year.len() {
        4 => parse_digits(year, 4, 4)? as i32,
        2 => expand_two_digit_year(parse_digits(year, 2, 2)? as i32),
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_digits(part: &str, min: usize, max: usize) -> Option<u32> {
    if part.len() < min || part.len() > max || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn expand_two_digit_year(year: i32) -> i32 {
    if year <= TWO_DIGIT_YEAR_PIVOT {
        2000 + year
    } else {
        1900 + year
    }
}

/// Parses the provider's `dd.MM.yyyy` dates.
pub fn parse_provider_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%d.%m.%Y").ok()
}
