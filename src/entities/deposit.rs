//! Deposit entity - Money a member paid into the mess.
//!
//! Amounts are signed: a negative deposit is a balance adjustment.
use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Deposit database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deposits")]
pub struct Model {
    /// Opaque unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Member who paid
    pub member_id: Uuid,
    /// Day of the deposit, always inside the reporting month it was added for
    pub date: NaiveDate,
    /// Amount paid in (negative for adjustments)
    pub amount: f64,
    /// Identity of the account that owns this row
    pub owner_id: String,
    /// When the deposit was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Deposit and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each deposit belongs to one member
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
