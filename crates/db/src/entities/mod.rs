//! `SeaORM` entity definitions.

pub mod prelude;

pub mod expense_splits;
pub mod expenses;
pub mod sea_orm_active_enums;
pub mod team_members;
pub mod teams;
pub mod users;
