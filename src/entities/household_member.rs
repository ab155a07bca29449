//! Household membership junction - links residents to households.
//!
//! A resident may belong to several households and a household has many
//! members, so membership is a composite-keyed junction table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Household membership database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "household_members")]
pub struct Model {
    /// Household side of the membership
    #[sea_orm(primary_key, auto_increment = false)]
    pub household_id: i64,
    /// Resident side of the membership
    #[sea_orm(primary_key, auto_increment = false)]
    pub resident_id: i64,
}

/// Defines relationships between the junction and its endpoints
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each membership row belongs to one household
    #[sea_orm(
        belongs_to = "super::household::Entity",
        from = "Column::HouseholdId",
        to = "super::household::Column::Id"
    )]
    Household,
    /// Each membership row belongs to one resident
    #[sea_orm(
        belongs_to = "super::resident::Entity",
        from = "Column::ResidentId",
        to = "super::resident::Column::Id"
    )]
    Resident,
}

impl Related<super::household::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Household.def()
    }
}

impl Related<super::resident::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resident.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
