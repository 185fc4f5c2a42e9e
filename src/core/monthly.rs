//! Month clear business logic
//!
//! Removes every meal entry, expense, and deposit dated inside one reporting
//! month while leaving members untouched. The scope is the half-open range
//! `[first day of month, first day of next month)`, so December is bounded by
//! January 1 of the following year.
//!
//! Two strategies are offered. The sequential one issues three independent
//! deletes; a failure part way leaves earlier steps applied, and because each
//! step deletes nothing once applied the caller recovers by running the whole
//! clear again. The transactional one runs the same three deletes inside a
//! single database transaction, standing in for a server-side procedure.

use crate::{
    core::{deposit, expense, meal, month::ReportingMonth},
    errors::Result,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::Deserialize;
use std::fmt;
use tracing::{info, instrument};

/// How a month clear is executed against the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearStrategy {
    /// Three idempotent deletes issued one after another
    #[default]
    Sequential,
    /// The same deletes inside one database transaction
    Transactional,
}

/// Represents the result of clearing one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthClearResult {
    /// The month that was cleared
    pub month: ReportingMonth,
    /// Meal entries removed
    pub meal_entries_removed: u64,
    /// Expenses removed
    pub expenses_removed: u64,
    /// Deposits removed
    pub deposits_removed: u64,
}

impl MonthClearResult {
    /// Total rows removed across the three collections.
    #[must_use]
    pub const fn total_removed(&self) -> u64 {
        self.meal_entries_removed + self.expenses_removed + self.deposits_removed
    }
}

impl fmt::Display for MonthClearResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cleared {}: {} meal entries, {} expenses, {} deposits",
            self.month, self.meal_entries_removed, self.expenses_removed, self.deposits_removed
        )
    }
}

/// Runs the three scoped deletes on any connection or transaction.
async fn clear_month_on<C>(
    db: &C,
    owner_id: &str,
    month: ReportingMonth,
) -> Result<MonthClearResult>
where
    C: ConnectionTrait,
{
    let (start, end) = month.date_range();

    let meal_entries_removed = meal::delete_meal_entries_between(db, owner_id, start, end).await?;
    let expenses_removed = expense::delete_expenses_between(db, owner_id, start, end).await?;
    let deposits_removed = deposit::delete_deposits_between(db, owner_id, start, end).await?;

    Ok(MonthClearResult {
        month,
        meal_entries_removed,
        expenses_removed,
        deposits_removed,
    })
}

/// Clears a month with three sequential deletes.
///
/// Safe to retry after a partial failure.
#[instrument(skip(db))]
pub async fn clear_month(
    db: &DatabaseConnection,
    owner_id: &str,
    month: ReportingMonth,
) -> Result<MonthClearResult> {
    let result = clear_month_on(db, owner_id, month).await?;
    info!("{result}");
    Ok(result)
}

/// Clears a month inside one database transaction.
///
/// Either all three collections are cleared or none is.
#[instrument(skip(db))]
pub async fn clear_month_atomic(
    db: &DatabaseConnection,
    owner_id: &str,
    month: ReportingMonth,
) -> Result<MonthClearResult> {
    let txn = db.begin().await?;
    let result = clear_month_on(&txn, owner_id, month).await?;
    txn.commit().await?;

    info!("{result}");
    Ok(result)
}

/// Clears a month using the given strategy.
pub async fn clear_month_with(
    db: &DatabaseConnection,
    owner_id: &str,
    month: ReportingMonth,
    strategy: ClearStrategy,
) -> Result<MonthClearResult> {
    match strategy {
        ClearStrategy::Sequential => clear_month(db, owner_id, month).await,
        ClearStrategy::Transactional => clear_month_atomic(db, owner_id, month).await,
    }
}
