//! Household entity - A dwelling unit in the community.
//!
//! The floor area drives per-area fee computation, so it is validated to be
//! non-negative at the core layer. Vehicles and members are reached through
//! relations rather than embedded id lists.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Household database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "households")]
pub struct Model {
    /// Unique identifier for the household
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Street/unit address of the dwelling
    pub address: String,
    /// Floor area in square meters, non-negative
    pub area: f64,
    /// Resident acting as head of household, if designated
    pub head_resident_id: Option<i64>,
}

/// Defines relationships between Household and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Resident designated as head of this household
    #[sea_orm(
        belongs_to = "super::resident::Entity",
        from = "Column::HeadResidentId",
        to = "super::resident::Column::Id"
    )]
    HeadResident,
    /// Vehicles owned by this household
    #[sea_orm(has_many = "super::vehicle::Entity")]
    Vehicles,
    /// Payment records charged to this household
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
    /// Junction rows linking residents to this household
    #[sea_orm(has_many = "super::household_member::Entity")]
    HouseholdMembers,
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicles.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::household_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HouseholdMembers.def()
    }
}

impl Related<super::resident::Entity> for Entity {
    fn to() -> RelationDef {
        super::household_member::Relation::Resident.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::household_member::Relation::Household.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
