//! Resident entity - A person registered in the community.
//!
//! Residents belong to households through the `household_member` junction
//! table; one resident may be a member of several households.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Resident database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "residents")]
pub struct Model {
    /// Unique identifier for the resident
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full legal name
    pub full_name: String,
    /// National identity number, unique across the system
    #[sea_orm(unique)]
    pub national_id: String,
    /// Contact phone number
    pub phone: String,
    /// Optional contact email
    pub email: Option<String>,
}

/// Defines relationships between Resident and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Junction rows linking this resident to households
    #[sea_orm(has_many = "super::household_member::Entity")]
    HouseholdMembers,
}

impl Related<super::household_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HouseholdMembers.def()
    }
}

impl Related<super::household::Entity> for Entity {
    fn to() -> RelationDef {
        super::household_member::Relation::Household.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::household_member::Relation::Resident.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
