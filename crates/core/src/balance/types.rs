//! Balance view types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::UserId;

/// One net obligation between two members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    /// Member who owes.
    pub from: UserId,
    /// Member who is owed.
    pub to: UserId,
    /// Net unsettled amount, always positive.
    pub amount: Decimal,
}

/// Everything the balances view of a team needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Sum of every expense amount, settled or not.
    pub total: Decimal,
    /// Net position per user. Positive means others owe the user.
    pub balances: BTreeMap<UserId, Decimal>,
    /// Pairwise net debts, sorted by debtor then creditor.
    pub debts: Vec<Debt>,
}
