//! Member business logic - Handles adding, listing, and removing mess members.
//!
//! Removing a member cascades to that member's meal entries and deposits. The
//! cascade runs as three sequential deletes rather than one transaction; each
//! step is a no-op once applied, so a failed removal is retried by simply
//! calling [`delete_member`] again.

use crate::{
    core::{deposit, meal},
    entities::{Member, member},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// What a member removal deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberDeletion {
    /// Meal entries removed with the member
    pub meal_entries_removed: u64,
    /// Deposits removed with the member
    pub deposits_removed: u64,
    /// Whether the member row itself still existed
    pub member_removed: bool,
}

/// Trims a member name, rejecting names that are empty after trimming.
pub fn validate_member_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: "Member name cannot be empty".to_string(),
        });
    }
    Ok(trimmed)
}

/// Retrieves every member owned by `owner_id`, oldest first.
pub async fn list_members(db: &DatabaseConnection, owner_id: &str) -> Result<Vec<member::Model>> {
    Member::find()
        .filter(member::Column::OwnerId.eq(owner_id))
        .order_by_asc(member::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds one member by id within an owner's records.
pub async fn get_member(
    db: &DatabaseConnection,
    owner_id: &str,
    member_id: Uuid,
) -> Result<Option<member::Model>> {
    Member::find_by_id(member_id)
        .filter(member::Column::OwnerId.eq(owner_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Adds a member with a trimmed, non-empty name.
#[instrument(skip(db))]
pub async fn create_member(
    db: &DatabaseConnection,
    owner_id: &str,
    name: &str,
) -> Result<member::Model> {
    let name = validate_member_name(name)?;

    let model = member::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        owner_id: Set(owner_id.to_string()),
        created_at: Set(Utc::now()),
    };

    let result = model.insert(db).await?;
    debug!(member_id = %result.id, "Member created");
    Ok(result)
}

/// Removes a member along with their meal entries and deposits.
///
/// Removing a member that no longer exists succeeds and deletes nothing.
#[instrument(skip(db))]
pub async fn delete_member(
    db: &DatabaseConnection,
    owner_id: &str,
    member_id: Uuid,
) -> Result<MemberDeletion> {
    let meal_entries_removed = meal::delete_meal_entries_for_member(db, owner_id, member_id).await?;
    let deposits_removed = deposit::delete_deposits_for_member(db, owner_id, member_id).await?;

    let result = Member::delete_many()
        .filter(member::Column::Id.eq(member_id))
        .filter(member::Column::OwnerId.eq(owner_id))
        .exec(db)
        .await?;

    let deletion = MemberDeletion {
        meal_entries_removed,
        deposits_removed,
        member_removed: result.rows_affected > 0,
    };
    info!(?deletion, "Member removal applied");
    Ok(deletion)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_member_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_member(&db, TEST_OWNER, "").await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_member(&db, TEST_OWNER, "   ").await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_member_trims_name() -> Result<()> {
        let db = setup_test_db().await?;

        let member = create_member(&db, TEST_OWNER, "  Rahim  ").await?;
        assert_eq!(member.name, "Rahim");
        assert_eq!(member.owner_id, TEST_OWNER);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_members_is_owner_scoped() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_member(&db, "Alice").await?;
        create_test_member(&db, "Bob").await?;
        create_member(&db, "someone_else", "Mallory").await?;

        let members = list_members(&db, TEST_OWNER).await?;
        let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Alice"));
        assert!(names.contains(&"Bob"));

        let others = list_members(&db, "someone_else").await?;
        assert_eq!(others.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_member_requires_owner() -> Result<()> {
        let (db, member) = setup_with_member().await?;

        assert!(get_member(&db, TEST_OWNER, member.id).await?.is_some());
        assert!(get_member(&db, "intruder", member.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_member_cascades() -> Result<()> {
        let (db, alice) = setup_with_member().await?;
        let bob = create_test_member(&db, "Bob").await?;
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();

        meal::upsert_meal_entry(&db, TEST_OWNER, alice.id, day, 2).await?;
        meal::upsert_meal_entry(&db, TEST_OWNER, bob.id, day, 1).await?;
        create_test_deposit(&db, alice.id, day, 500.0).await?;
        create_test_deposit(&db, alice.id, day, -50.0).await?;
        create_test_deposit(&db, bob.id, day, 300.0).await?;

        let deletion = delete_member(&db, TEST_OWNER, alice.id).await?;
        assert_eq!(
            deletion,
            MemberDeletion {
                meal_entries_removed: 1,
                deposits_removed: 2,
                member_removed: true,
            }
        );

        assert!(get_member(&db, TEST_OWNER, alice.id).await?.is_none());
        let meals = meal::list_meal_entries(&db, TEST_OWNER).await?;
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].member_id, bob.id);
        let deposits = deposit::list_deposits(&db, TEST_OWNER).await?;
        assert_eq!(deposits.len(), 1);
        assert_eq!(deposits[0].member_id, bob.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_member_is_idempotent() -> Result<()> {
        let (db, member) = setup_with_member().await?;

        delete_member(&db, TEST_OWNER, member.id).await?;
        let again = delete_member(&db, TEST_OWNER, member.id).await?;
        assert_eq!(again, MemberDeletion::default());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_member_ignores_other_owner() -> Result<()> {
        let (db, member) = setup_with_member().await?;

        let deletion = delete_member(&db, "intruder", member.id).await?;
        assert!(!deletion.member_removed);
        assert!(get_member(&db, TEST_OWNER, member.id).await?.is_some());

        Ok(())
    }
}
