//! `SeaORM` active enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Split status as stored in `expense_splits.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum SplitStatus {
    /// Nothing has happened yet.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Debtor requested credit.
    #[sea_orm(string_value = "requested")]
    Requested,
    /// Payer confirmed.
    #[sea_orm(string_value = "settled")]
    Settled,
}

impl From<tally_core::settlement::SplitStatus> for SplitStatus {
    fn from(status: tally_core::settlement::SplitStatus) -> Self {
        use tally_core::settlement::SplitStatus as Core;
        match status {
            Core::Pending => Self::Pending,
            Core::Requested => Self::Requested,
            Core::Settled => Self::Settled,
        }
    }
}

impl From<SplitStatus> for tally_core::settlement::SplitStatus {
    fn from(status: SplitStatus) -> Self {
        match status {
            SplitStatus::Pending => Self::Pending,
            SplitStatus::Requested => Self::Requested,
            SplitStatus::Settled => Self::Settled,
        }
    }
}
