//! Fee collection entity - A named billing period bundling fees.
//!
//! Fees reference their collection; deleting a collection detaches them
//! rather than deleting them (handled at the core layer).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fee collection database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fee_collections")]
pub struct Model {
    /// Unique identifier for the collection
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the billing period (e.g., "2026-Q1 dues")
    pub name: String,
    /// When the collection was created
    pub created_date: DateTimeUtc,
    /// Date by which payments are due
    pub due_date: Date,
}

/// Defines relationships between FeeCollection and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Fees bundled into this collection
    #[sea_orm(has_many = "super::fee::Entity")]
    Fees,
}

impl Related<super::fee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
