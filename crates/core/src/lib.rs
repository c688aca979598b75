//! Core settlement logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here, together
//! with the storage seams the persistence layer implements.
//!
//! # Modules
//!
//! - `team` - Teams, member rosters, and the membership directory seam
//! - `expense` - Expense validation and even splitting
//! - `settlement` - Split status state machine
//! - `balance` - Read-side balance and debt aggregation
//! - `store` - Ledger storage seam and the in-memory store
//! - `ledger` - Orchestration of every inbound operation

pub mod balance;
pub mod expense;
pub mod ledger;
pub mod settlement;
pub mod store;
pub mod team;

pub use ledger::{ErrorKind, Ledger, LedgerError, SplitTransition};
