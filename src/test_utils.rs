//! Shared test utilities for the mess ledger.
//!
//! This module provides helpers for setting up test databases, creating stored
//! records with sensible defaults, and building detached rows for snapshot and
//! ledger tests that never touch a database.

use crate::{
    core::{deposit, expense, member},
    entities,
    errors::Result,
};
use chrono::{NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Identity that owns every record created by these helpers.
pub const TEST_OWNER: &str = "test_owner";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a stored member owned by [`TEST_OWNER`].
pub async fn create_test_member(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::member::Model> {
    member::create_member(db, TEST_OWNER, name).await
}

/// Creates a stored expense owned by [`TEST_OWNER`].
///
/// # Defaults
/// * `description`: `"Groceries"`
pub async fn create_test_expense(
    db: &DatabaseConnection,
    date: NaiveDate,
    amount: f64,
) -> Result<entities::expense::Model> {
    expense::create_expense(db, TEST_OWNER, date, amount, "Groceries").await
}

/// Creates a stored deposit owned by [`TEST_OWNER`].
pub async fn create_test_deposit(
    db: &DatabaseConnection,
    member_id: Uuid,
    date: NaiveDate,
    amount: f64,
) -> Result<entities::deposit::Model> {
    deposit::create_deposit(db, TEST_OWNER, member_id, date, amount).await
}

/// Sets up a test database holding one member.
/// Returns (db, member) for common test scenarios.
pub async fn setup_with_member() -> Result<(DatabaseConnection, entities::member::Model)> {
    let db = setup_test_db().await?;
    let member = create_test_member(&db, "Test Member").await?;
    Ok((db, member))
}

/// Builds a detached member row.
#[must_use]
pub fn member_row(name: &str) -> entities::member::Model {
    entities::member::Model {
        id: Uuid::new_v4(),
        name: name.to_string(),
        owner_id: TEST_OWNER.to_string(),
        created_at: Utc::now(),
    }
}

/// Builds a detached meal entry row.
#[must_use]
pub fn meal_row(member_id: Uuid, date: NaiveDate, count: i32) -> entities::meal_entry::Model {
    entities::meal_entry::Model {
        id: Uuid::new_v4(),
        member_id,
        date,
        count,
        owner_id: TEST_OWNER.to_string(),
        created_at: Utc::now(),
    }
}

/// Builds a detached expense row.
#[must_use]
pub fn expense_row(date: NaiveDate, amount: f64) -> entities::expense::Model {
    entities::expense::Model {
        id: Uuid::new_v4(),
        date,
        amount,
        description: "Groceries".to_string(),
        owner_id: TEST_OWNER.to_string(),
        created_at: Utc::now(),
    }
}

/// Builds a detached deposit row.
#[must_use]
pub fn deposit_row(member_id: Uuid, date: NaiveDate, amount: f64) -> entities::deposit::Model {
    entities::deposit::Model {
        id: Uuid::new_v4(),
        member_id,
        date,
        amount,
        owner_id: TEST_OWNER.to_string(),
        created_at: Utc::now(),
    }
}
