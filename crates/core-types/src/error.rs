// In crates/core-types/src/error.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Malformed price input. These are the only hard failures the analysis core raises.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Dates must be strictly increasing: {current} at index {index} does not follow {previous}")]
    NonIncreasingDate {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("Price must be positive: {price} on {date} (index {index})")]
    NonPositivePrice {
        index: usize,
        date: NaiveDate,
        price: Decimal,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
