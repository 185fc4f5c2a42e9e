//! Database configuration module for the mess ledger.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust models.

use crate::entities::{Deposit, Expense, MealEntry, Member};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/mess_ledger.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling
/// back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the four collection tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut member_table = schema.create_table_from_entity(Member);
    let mut meal_entry_table = schema.create_table_from_entity(MealEntry);
    let mut expense_table = schema.create_table_from_entity(Expense);
    let mut deposit_table = schema.create_table_from_entity(Deposit);

    for table in [
        &mut member_table,
        &mut meal_entry_table,
        &mut expense_table,
        &mut deposit_table,
    ] {
        table.if_not_exists();
    }

    db.execute(builder.build(&member_table)).await?;
    db.execute(builder.build(&meal_entry_table)).await?;
    db.execute(builder.build(&expense_table)).await?;
    db.execute(builder.build(&deposit_table)).await?;

    info!("Database tables ensured");
    Ok(())
}
