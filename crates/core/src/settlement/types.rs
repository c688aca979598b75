//! Settlement domain types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of one debtor's split.
///
/// The valid transitions are:
/// - Pending → Requested (debtor requests credit)
/// - Pending → Settled (payer verifies directly)
/// - Requested → Settled (payer verifies)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitStatus {
    /// Nothing has happened yet.
    Pending,
    /// The debtor says they have paid; awaiting the payer.
    Requested,
    /// The payer confirmed receipt (terminal).
    Settled,
}

impl SplitStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Requested => "requested",
            Self::Settled => "settled",
        }
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Settled)
    }
}

impl fmt::Display for SplitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of an expense, derived from its splits and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    /// At least one split is not settled.
    Open,
    /// Every split is settled.
    Settled,
}

impl ExpenseStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Settled => "settled",
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A settlement action a caller can attempt on a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementAction {
    /// Debtor declares the payment made.
    RequestPayment,
    /// Payer confirms the payment received.
    VerifyPayment,
}

impl SettlementAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequestPayment => "request_payment",
            Self::VerifyPayment => "verify_payment",
        }
    }
}

impl fmt::Display for SettlementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(SplitStatus::Pending.as_str(), "pending");
        assert_eq!(SplitStatus::Requested.as_str(), "requested");
        assert_eq!(SplitStatus::Settled.as_str(), "settled");
    }

    #[test]
    fn test_status_terminal() {
        assert!(!SplitStatus::Pending.is_terminal());
        assert!(!SplitStatus::Requested.is_terminal());
        assert!(SplitStatus::Settled.is_terminal());
    }

    #[test]
    fn test_serde_representation() {
        assert_eq!(
            serde_json::to_string(&SplitStatus::Requested).unwrap(),
            "\"requested\""
        );
        assert_eq!(
            serde_json::to_string(&ExpenseStatus::Open).unwrap(),
            "\"open\""
        );
        assert_eq!(
            serde_json::to_string(&SettlementAction::VerifyPayment).unwrap(),
            "\"verify_payment\""
        );
    }
}
