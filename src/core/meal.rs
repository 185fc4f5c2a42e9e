//! Meal entry business logic - Logs per-day meal counts for members.
//!
//! A member has at most one meal entry per day. The store does not enforce the
//! pair, so every write goes through [`upsert_meal_entry`], which updates the
//! existing row in place (keeping its id) or inserts the first one.

use crate::{
    entities::{MealEntry, meal_entry},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Whether an upsert created a row or overwrote one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No entry existed for the pair; a new row was inserted
    Created,
    /// The existing row for the pair had its count overwritten
    Updated,
}

/// Rejects negative meal counts. The 0-10 range shown in the UI is a hint only.
pub fn validate_meal_count(count: i32) -> Result<()> {
    if count < 0 {
        return Err(Error::InvalidMealCount { count });
    }
    Ok(())
}

/// Retrieves every meal entry owned by `owner_id`, ordered by date.
pub async fn list_meal_entries(
    db: &DatabaseConnection,
    owner_id: &str,
) -> Result<Vec<meal_entry::Model>> {
    MealEntry::find()
        .filter(meal_entry::Column::OwnerId.eq(owner_id))
        .order_by_asc(meal_entry::Column::Date)
        .order_by_asc(meal_entry::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds the entry for a (member, date) pair.
pub async fn find_meal_entry(
    db: &DatabaseConnection,
    owner_id: &str,
    member_id: Uuid,
    date: NaiveDate,
) -> Result<Option<meal_entry::Model>> {
    MealEntry::find()
        .filter(meal_entry::Column::OwnerId.eq(owner_id))
        .filter(meal_entry::Column::MemberId.eq(member_id))
        .filter(meal_entry::Column::Date.eq(date))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Overwrites the count of an existing entry.
///
/// Fails with [`Error::RecordNotFound`] when no entry has this id.
pub async fn update_meal_count(
    db: &DatabaseConnection,
    owner_id: &str,
    entry_id: Uuid,
    count: i32,
) -> Result<meal_entry::Model> {
    validate_meal_count(count)?;

    let entry = MealEntry::find_by_id(entry_id)
        .filter(meal_entry::Column::OwnerId.eq(owner_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::RecordNotFound {
            collection: "meal_entries",
            id: entry_id.to_string(),
        })?;

    let mut active_model: meal_entry::ActiveModel = entry.into();
    active_model.count = Set(count);
    active_model.update(db).await.map_err(Into::into)
}

/// Writes `count` for a (member, date) pair, creating or overwriting as needed.
///
/// Callers never need to know which happened; the outcome is returned for
/// logging and tests.
#[instrument(skip(db))]
pub async fn upsert_meal_entry(
    db: &DatabaseConnection,
    owner_id: &str,
    member_id: Uuid,
    date: NaiveDate,
    count: i32,
) -> Result<(meal_entry::Model, UpsertOutcome)> {
    validate_meal_count(count)?;

    if let Some(existing) = find_meal_entry(db, owner_id, member_id, date).await? {
        let mut active_model: meal_entry::ActiveModel = existing.into();
        active_model.count = Set(count);
        let updated = active_model.update(db).await?;
        debug!(entry_id = %updated.id, "Meal entry overwritten");
        return Ok((updated, UpsertOutcome::Updated));
    }

    let model = meal_entry::ActiveModel {
        id: Set(Uuid::new_v4()),
        member_id: Set(member_id),
        date: Set(date),
        count: Set(count),
        owner_id: Set(owner_id.to_string()),
        created_at: Set(Utc::now()),
    };
    let created = model.insert(db).await?;
    debug!(entry_id = %created.id, "Meal entry created");
    Ok((created, UpsertOutcome::Created))
}

/// Deletes every meal entry of one member. Returns the number of rows removed.
pub async fn delete_meal_entries_for_member<C>(
    db: &C,
    owner_id: &str,
    member_id: Uuid,
) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = MealEntry::delete_many()
        .filter(meal_entry::Column::OwnerId.eq(owner_id))
        .filter(meal_entry::Column::MemberId.eq(member_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes meal entries dated in `[start, end)`. Returns the number of rows removed.
pub async fn delete_meal_entries_between<C>(
    db: &C,
    owner_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = MealEntry::delete_many()
        .filter(meal_entry::Column::OwnerId.eq(owner_id))
        .filter(meal_entry::Column::Date.gte(start))
        .filter(meal_entry::Column::Date.lt(end))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
