//! Money helpers with fixed two-place decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` values carried at [`MONEY_SCALE`] places.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Number of decimal places stored for every monetary amount.
pub const MONEY_SCALE: u32 = 2;

/// Largest amount a `NUMERIC(14,2)` column holds: `999999999999.99`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, MONEY_SCALE);

/// Errors produced when accepting a monetary amount from the outside world.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The amount is zero or negative.
    #[error("amount must be greater than zero, got {0}")]
    NotPositive(Decimal),

    /// The amount carries more precision than can be stored.
    #[error("amount {0} has more than two decimal places")]
    TooPrecise(Decimal),

    /// The amount exceeds [`MAX_AMOUNT`].
    #[error("amount {0} exceeds the maximum of {max}", max = MAX_AMOUNT)]
    TooLarge(Decimal),

    /// The text is not a decimal number.
    #[error("invalid amount format: {0}")]
    Invalid(String),
}

/// Validates a positive amount and rescales it to [`MONEY_SCALE`] places.
///
/// Trailing zeros beyond two places are accepted (`90.000` becomes `90.00`);
/// significant digits beyond two places are rejected rather than rounded.
pub fn validate_amount(amount: Decimal) -> Result<Decimal, MoneyError> {
    if amount <= Decimal::ZERO {
        return Err(MoneyError::NotPositive(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(MoneyError::TooLarge(amount));
    }
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(MoneyError::TooPrecise(amount));
    }

    let mut rescaled = amount;
    rescaled.rescale(MONEY_SCALE);
    Ok(rescaled)
}

/// Parses a decimal string and validates it with [`validate_amount`].
pub fn parse_amount(raw: &str) -> Result<Decimal, MoneyError> {
    let amount =
        Decimal::from_str(raw.trim()).map_err(|_| MoneyError::Invalid(raw.to_string()))?;
    validate_amount(amount)
}
