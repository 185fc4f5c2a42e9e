/// Deposit records - money members pay in
pub mod deposit;
/// Expense records - shared food costs
pub mod expense;
/// Ledger engine - pure monthly settlement figures
pub mod ledger;
/// Meal entry records and the one-per-day upsert
pub mod meal;
/// Member records and cascading removal
pub mod member;
/// Reporting month value type
pub mod month;
/// Month clear operation
pub mod monthly;
/// Member report rows and text rendering
pub mod report;
/// In-memory mirror of an owner's collections
pub mod snapshot;
