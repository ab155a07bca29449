//! Payment entity - A per-household amount owed for a specific fee.
//!
//! At most one payment exists per (fee, household) pair. That invariant is
//! enforced by a composite unique index created in
//! [`crate::config::database::create_tables`], making the storage layer the
//! race-safety mechanism for concurrent disbursements.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Settlement status of a payment record
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Disbursed but not yet settled
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Settled in full; terminal
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Settlement attempt failed; may return to pending
    #[sea_orm(string_value = "failed")]
    Failed,
}

impl PaymentStatus {
    /// Whether a status update from `self` to `to` is legal.
    ///
    /// Pending may settle or fail, a failed payment may be retried, and
    /// `Paid` is terminal. Same-status updates are always allowed so that
    /// amount/date edits do not need a separate path.
    #[must_use]
    pub fn can_transition_to(self, to: Self) -> bool {
        match (self, to) {
            (from, to) if from == to => true,
            (Self::Pending, Self::Paid | Self::Failed) | (Self::Failed, Self::Pending) => true,
            _ => false,
        }
    }
}

/// Payment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier for the payment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Fee this payment is for
    pub fee_id: i64,
    /// Household this payment is charged to
    pub household_id: i64,
    /// Amount owed, in whole currency units
    pub amount: i64,
    /// Date the payment falls due or was made
    pub pay_date: DateTimeUtc,
    /// Settlement status
    pub status: PaymentStatus,
}

/// Defines relationships between Payment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one fee
    #[sea_orm(
        belongs_to = "super::fee::Entity",
        from = "Column::FeeId",
        to = "super::fee::Column::Id"
    )]
    Fee,
    /// Each payment belongs to one household
    #[sea_orm(
        belongs_to = "super::household::Entity",
        from = "Column::HouseholdId",
        to = "super::household::Column::Id"
    )]
    Household,
}

impl Related<super::fee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fee.def()
    }
}

impl Related<super::household::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Household.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
