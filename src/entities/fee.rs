//! Fee entity - A charge definition with a category.
//!
//! The category is a closed set; disbursement dispatches on it with an
//! exhaustive match, so a category without a calculator is rejected at
//! compile time rather than silently ignored.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category of a fee. Only `Vehicle`, `Management`, and `Service` have
/// disbursement calculators; the rest are billed by direct payment entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum FeeCategory {
    /// Charged per owned vehicle, by kind
    #[sea_orm(string_value = "vehicle")]
    Vehicle,
    /// Charged per square meter of floor area
    #[sea_orm(string_value = "management")]
    Management,
    /// Charged per square meter of floor area
    #[sea_orm(string_value = "service")]
    Service,
    /// Metered utility, entered manually
    #[sea_orm(string_value = "water")]
    Water,
    /// Metered utility, entered manually
    #[sea_orm(string_value = "electricity")]
    Electricity,
    /// Ad-hoc maintenance charge
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
    /// Anything else
    #[sea_orm(string_value = "other")]
    Other,
}

/// Fee database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fees")]
pub struct Model {
    /// Unique identifier for the fee
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the fee
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Category the fee falls into
    pub category: FeeCategory,
    /// Billing period this fee belongs to, if attached
    pub collection_id: Option<i64>,
}

/// Defines relationships between Fee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each fee may belong to one collection
    #[sea_orm(
        belongs_to = "super::fee_collection::Entity",
        from = "Column::CollectionId",
        to = "super::fee_collection::Column::Id"
    )]
    Collection,
    /// Payment records created for this fee
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::fee_collection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Collection.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
