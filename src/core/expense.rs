//! Expense business logic - Records the shared food costs of the mess.
//!
//! Expenses are never edited once recorded; they leave the store only through
//! a month clear.

use crate::{
    entities::{Expense, expense},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Checks an expense before it reaches the store.
///
/// The amount must be finite and strictly positive and the description must
/// not be blank. Returns the trimmed description.
pub fn validate_expense(amount: f64, description: &str) -> Result<&str> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: "Expense description cannot be empty".to_string(),
        });
    }
    Ok(trimmed)
}

/// Retrieves every expense owned by `owner_id`, newest date first.
pub async fn list_expenses(
    db: &DatabaseConnection,
    owner_id: &str,
) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(expense::Column::OwnerId.eq(owner_id))
        .order_by_desc(expense::Column::Date)
        .order_by_desc(expense::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records a shared expense.
#[instrument(skip(db))]
pub async fn create_expense(
    db: &DatabaseConnection,
    owner_id: &str,
    date: NaiveDate,
    amount: f64,
    description: &str,
) -> Result<expense::Model> {
    let description = validate_expense(amount, description)?;

    let model = expense::ActiveModel {
        id: Set(Uuid::new_v4()),
        date: Set(date),
        amount: Set(amount),
        description: Set(description.to_string()),
        owner_id: Set(owner_id.to_string()),
        created_at: Set(Utc::now()),
    };

    let result = model.insert(db).await?;
    debug!(expense_id = %result.id, "Expense recorded");
    Ok(result)
}

/// Deletes expenses dated in `[start, end)`. Returns the number of rows removed.
pub async fn delete_expenses_between<C>(
    db: &C,
    owner_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Expense::delete_many()
        .filter(expense::Column::OwnerId.eq(owner_id))
        .filter(expense::Column::Date.gte(start))
        .filter(expense::Column::Date.lt(end))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
