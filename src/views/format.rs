use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::currency::CurrencyDetail;

/// Day-first layout used for every displayed or entered timestamp.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Renders an amount as `CODE 1,234.56` using the currency's minor units.
pub fn format_amount(amount: Decimal, currency: &CurrencyDetail) -> String {
    let digits = currency.minor_units as usize;
    let rounded = amount.round_dp_with_strategy(currency.minor_units, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.digits$}", rounded.abs());

    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None)
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

    match fraction {
        Some(fraction) => format!("{} {sign}{grouped}.{fraction}", currency.code),
        None => format!("{} {sign}{grouped}", currency.code)
    }
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Accepts either [`TIMESTAMP_FORMAT`] (read as UTC) or RFC 3339.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .map(|timestamp| timestamp.and_utc())
}
