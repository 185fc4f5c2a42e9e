//! Expense entity - A shared food cost, not attributable to any one member.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Opaque unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Day the money was spent
    pub date: NaiveDate,
    /// Amount spent, always positive
    pub amount: f64,
    /// What the money was spent on
    pub description: String,
    /// Identity of the account that owns this row
    pub owner_id: String,
    /// When the expense was recorded
    pub created_at: DateTimeUtc,
}

/// `Expense` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
