//! Deposit business logic - Records money members pay into the mess.
//!
//! A deposit may be negative, in which case it adjusts the member's balance
//! down. Deposits are never edited; they are removed with their member or by a
//! month clear.

use crate::{
    entities::{Deposit, deposit},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Rejects zero and non-finite deposit amounts. Negative amounts are allowed.
pub fn validate_deposit_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount == 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

/// Retrieves every deposit owned by `owner_id`, newest date first.
pub async fn list_deposits(
    db: &DatabaseConnection,
    owner_id: &str,
) -> Result<Vec<deposit::Model>> {
    Deposit::find()
        .filter(deposit::Column::OwnerId.eq(owner_id))
        .order_by_desc(deposit::Column::Date)
        .order_by_desc(deposit::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records a deposit for a member on `date`.
#[instrument(skip(db))]
pub async fn create_deposit(
    db: &DatabaseConnection,
    owner_id: &str,
    member_id: Uuid,
    date: NaiveDate,
    amount: f64,
) -> Result<deposit::Model> {
    validate_deposit_amount(amount)?;

    let model = deposit::ActiveModel {
        id: Set(Uuid::new_v4()),
        member_id: Set(member_id),
        date: Set(date),
        amount: Set(amount),
        owner_id: Set(owner_id.to_string()),
        created_at: Set(Utc::now()),
    };

    let result = model.insert(db).await?;
    debug!(deposit_id = %result.id, "Deposit recorded");
    Ok(result)
}

/// Deletes every deposit of one member. Returns the number of rows removed.
pub async fn delete_deposits_for_member<C>(
    db: &C,
    owner_id: &str,
    member_id: Uuid,
) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Deposit::delete_many()
        .filter(deposit::Column::OwnerId.eq(owner_id))
        .filter(deposit::Column::MemberId.eq(member_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes deposits dated in `[start, end)`. Returns the number of rows removed.
pub async fn delete_deposits_between<C>(
    db: &C,
    owner_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Deposit::delete_many()
        .filter(deposit::Column::OwnerId.eq(owner_id))
        .filter(deposit::Column::Date.gte(start))
        .filter(deposit::Column::Date.lt(end))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_deposit_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        for amount in [0.0, f64::NAN, f64::NEG_INFINITY] {
            let result =
                create_deposit(&db, TEST_OWNER, Uuid::new_v4(), date(2024, 3, 1), amount).await;
            assert!(matches!(result, Err(Error::InvalidAmount { .. })));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_negative_deposit_is_an_adjustment() -> Result<()> {
        let (db, member) = setup_with_member().await?;

        let deposit = create_test_deposit(&db, member.id, date(2024, 3, 8), -75.0).await?;
        assert_eq!(deposit.amount, -75.0);
        assert_eq!(deposit.member_id, member.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_deposits_between_keeps_next_month() -> Result<()> {
        let (db, member) = setup_with_member().await?;
        create_test_deposit(&db, member.id, date(2024, 3, 31), 100.0).await?;
        create_test_deposit(&db, member.id, date(2024, 4, 1), 200.0).await?;

        let removed =
            delete_deposits_between(&db, TEST_OWNER, date(2024, 3, 1), date(2024, 4, 1)).await?;
        assert_eq!(removed, 1);

        let remaining = list_deposits(&db, TEST_OWNER).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].date, date(2024, 4, 1));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_deposits_for_member_only_touches_that_member() -> Result<()> {
        let (db, alice) = setup_with_member().await?;
        let bob = create_test_member(&db, "Bob").await?;
        create_test_deposit(&db, alice.id, date(2024, 3, 1), 100.0).await?;
        create_test_deposit(&db, bob.id, date(2024, 3, 1), 100.0).await?;

        let removed = delete_deposits_for_member(&db, TEST_OWNER, alice.id).await?;
        assert_eq!(removed, 1);
        assert_eq!(list_deposits(&db, TEST_OWNER).await?.len(), 1);

        Ok(())
    }
}
