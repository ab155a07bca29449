//! Vehicle entity - A vehicle registered to a household.
//!
//! The kind determines the vehicle-fee charge: cars and motorcycles are
//! billed at configured rates, bicycles are free.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of vehicle, a closed set
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    /// Automobile
    #[sea_orm(string_value = "car")]
    Car,
    /// Motorcycle or scooter
    #[sea_orm(string_value = "motorcycle")]
    Motorcycle,
    /// Bicycle, exempt from vehicle fees
    #[sea_orm(string_value = "bicycle")]
    Bicycle,
}

/// Vehicle database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    /// Unique identifier for the vehicle
    #[sea_orm(primary_key)]
    pub id: i64,
    /// License plate, unique across the system
    #[sea_orm(unique)]
    pub plate: String,
    /// Household that owns this vehicle
    pub household_id: i64,
    /// Kind of vehicle
    pub kind: VehicleKind,
}

/// Defines relationships between Vehicle and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each vehicle belongs to one household
    #[sea_orm(
        belongs_to = "super::household::Entity",
        from = "Column::HouseholdId",
        to = "super::household::Column::Id"
    )]
    Household,
}

impl Related<super::household::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Household.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
