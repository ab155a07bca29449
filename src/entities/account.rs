//! Account entity - Administrative users of the management system.
//!
//! Each account carries a role claim that gates what the REST API lets it do.
//! Password hashes are stored, never plaintext, and are skipped on serialization.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role attached to an account and embedded in its access tokens
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, including account administration
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Fee, collection, payment, and disbursement management
    #[sea_orm(string_value = "accountant")]
    Accountant,
    /// Resident, household, and vehicle management
    #[sea_orm(string_value = "manager")]
    Manager,
}

impl Role {
    /// Stable name used in token claims and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Accountant => "accountant",
            Self::Manager => "manager",
        }
    }
}

/// Account database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Unique identifier for the account
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique across the system
    #[sea_orm(unique)]
    pub username: String,
    /// Hex-encoded password hash
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role claim granted to this account
    pub role: Role,
}

/// Accounts have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
