//! Repository abstractions for data access.
//!
//! Repositories implement the storage seams defined in `tally-core`,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod expense;
pub mod team;

pub use expense::ExpenseRepository;
pub use team::TeamRepository;
