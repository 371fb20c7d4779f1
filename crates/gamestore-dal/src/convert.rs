//! Conversions between domain values and their stored column representation.
//!
//! SQLite has neither a fixed point decimal nor a date-only type. Prices are kept
//! as integer hundredths, release dates as a date-time at midnight.

use rust_decimal::{Decimal, RoundingStrategy};
use time::{Date, PrimitiveDateTime};

use crate::error::{Error, Result};

/// Digits after the decimal point kept for prices.
pub const PRICE_SCALE: u32 = 2;

/// Total number of digits a stored price may have.
pub const PRICE_PRECISION: u32 = 18;

/// Smallest price that no longer fits into `PRICE_PRECISION` digits.
pub fn price_limit() -> Decimal {
    Decimal::from(10_i64.pow(PRICE_PRECISION - PRICE_SCALE))
}

pub fn price_to_storage(price: Decimal) -> Result<i64> {
    if price < Decimal::ZERO || price >= price_limit() {
        return Err(Error::PriceOutOfRange(price));
    }
    let mut scaled = price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    scaled.rescale(PRICE_SCALE);
    i64::try_from(scaled.mantissa()).map_err(|_| Error::PriceOutOfRange(price))
}

pub fn price_from_storage(hundredths: i64) -> Decimal {
    Decimal::new(hundredths, PRICE_SCALE)
}

pub fn date_to_storage(date: Date) -> PrimitiveDateTime {
    date.midnight()
}

pub fn date_from_storage(value: PrimitiveDateTime) -> Date {
    value.date()
}
