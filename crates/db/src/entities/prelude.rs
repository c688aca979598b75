//! `SeaORM` entity prelude.

pub use super::expense_splits::Entity as ExpenseSplits;
pub use super::expenses::Entity as Expenses;
pub use super::team_members::Entity as TeamMembers;
pub use super::teams::Entity as Teams;
pub use super::users::Entity as Users;
