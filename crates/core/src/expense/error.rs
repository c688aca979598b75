//! Expense validation errors.

use rust_decimal::Decimal;
use thiserror::Error;
use tally_shared::types::{MoneyError, UserId};

/// Errors raised when a new expense fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseError {
    /// Expense name is blank.
    #[error("Expense name cannot be empty")]
    EmptyName,

    /// Amount is zero or negative.
    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    /// Amount has more than two significant decimal places.
    #[error("Amount {0} has more than two decimal places")]
    TooPrecise(Decimal),

    /// Amount exceeds the largest storable value.
    #[error("Amount {0} exceeds the maximum allowed")]
    TooLarge(Decimal),

    /// Amount text could not be parsed.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Payer does not belong to the team.
    #[error("Payer {0} is not a member of the team")]
    PayerNotMember(UserId),

    /// An involved user does not belong to the team.
    #[error("User {0} is not a member of the team")]
    ParticipantNotMember(UserId),
}

impl ExpenseError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "EMPTY_NAME",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::TooPrecise(_) => "AMOUNT_TOO_PRECISE",
            Self::TooLarge(_) => "AMOUNT_TOO_LARGE",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::PayerNotMember(_) => "PAYER_NOT_MEMBER",
            Self::ParticipantNotMember(_) => "PARTICIPANT_NOT_MEMBER",
        }
    }
}

impl From<MoneyError> for ExpenseError {
    fn from(err: MoneyError) -> Self {
        match err {
            MoneyError::NotPositive(amount) => Self::NonPositiveAmount(amount),
            MoneyError::TooPrecise(amount) => Self::TooPrecise(amount),
            MoneyError::TooLarge(amount) => Self::TooLarge(amount),
            MoneyError::Invalid(raw) => Self::InvalidAmount(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_money_error() {
        assert_eq!(
            ExpenseError::from(MoneyError::NotPositive(dec!(0))),
            ExpenseError::NonPositiveAmount(dec!(0))
        );
        assert_eq!(
            ExpenseError::from(MoneyError::TooPrecise(dec!(1.005))),
            ExpenseError::TooPrecise(dec!(1.005))
        );
        assert_eq!(
            ExpenseError::from(MoneyError::TooLarge(dec!(1000000000000))).error_code(),
            "AMOUNT_TOO_LARGE"
        );
        assert_eq!(
            ExpenseError::from(MoneyError::Invalid("abc".into())).error_code(),
            "INVALID_AMOUNT"
        );
    }
}
