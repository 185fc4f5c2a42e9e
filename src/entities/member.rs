//! Member entity - A person sharing the mess.
//!
//! Members carry no balance of their own; money paid in is recorded as
//! [`super::deposit`] rows and meals as [`super::meal_entry`] rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Member database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    /// Opaque unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Display name, trimmed and non-empty
    pub name: String,
    /// Identity of the account that owns this row
    pub owner_id: String,
    /// When the member was added
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Member and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One member has many meal entries
    #[sea_orm(has_many = "super::meal_entry::Entity")]
    MealEntries,
    /// One member has many deposits
    #[sea_orm(has_many = "super::deposit::Entity")]
    Deposits,
}

impl Related<super::meal_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MealEntries.def()
    }
}

impl Related<super::deposit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deposits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
