//! Meal entry entity - How many meals one member ate on one day.
//!
//! At most one row exists per (`member_id`, `date`). The store does not enforce
//! this; writers go through `core::meal::upsert_meal_entry`.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Meal entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meal_entries")]
pub struct Model {
    /// Opaque unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Member who ate the meals
    pub member_id: Uuid,
    /// Calendar day of the meals
    pub date: NaiveDate,
    /// Number of meals, never negative
    pub count: i32,
    /// Identity of the account that owns this row
    pub owner_id: String,
    /// When the entry was first written
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `MealEntry` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each meal entry belongs to one member
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id"
    )]
    Member,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
