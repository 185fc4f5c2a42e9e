//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the four owner-scoped collections of a mess.
//! Each entity has a Model struct for data and an Entity struct for operations.

/// Money paid in by a member
pub mod deposit;
/// Shared food purchases
pub mod expense;
/// Per-day meal counts
pub mod meal_entry;
/// People sharing the mess
pub mod member;

// Re-export specific types to avoid conflicts
pub use deposit::{Column as DepositColumn, Entity as Deposit, Model as DepositModel};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use meal_entry::{Column as MealEntryColumn, Entity as MealEntry, Model as MealEntryModel};
pub use member::{Column as MemberColumn, Entity as Member, Model as MemberModel};
