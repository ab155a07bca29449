//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. The variants map
//! onto the error taxonomy the API boundary exposes: not-found, conflict,
//! unsupported, validation, auth, and internal failures. Transport status
//! codes are assigned at the API layer, not here, so the core stays
//! framework-agnostic.

use thiserror::Error;

use crate::entities::fee::FeeCategory;
use crate::entities::payment::PaymentStatus;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid request: {message}")]
    Validation { message: String },

    #[error("Account '{username}' not found")]
    AccountNotFound { username: String },

    #[error("Resident {id} not found")]
    ResidentNotFound { id: i64 },

    #[error("Household {id} not found")]
    HouseholdNotFound { id: i64 },

    #[error("Vehicle {id} not found")]
    VehicleNotFound { id: i64 },

    #[error("Fee {id} not found")]
    FeeNotFound { id: i64 },

    #[error("Fee collection {id} not found")]
    CollectionNotFound { id: i64 },

    #[error("Payment {id} not found")]
    PaymentNotFound { id: i64 },

    #[error("Payment for fee {fee_id} and household {household_id} already exists")]
    DuplicatePayment { fee_id: i64, household_id: i64 },

    #[error("A vehicle with plate '{plate}' is already registered")]
    DuplicatePlate { plate: String },

    #[error("Username '{username}' is already taken")]
    DuplicateUsername { username: String },

    #[error("A resident with national id '{national_id}' is already registered")]
    DuplicateNationalId { national_id: String },

    #[error("Resident {resident_id} is already a member of household {household_id}")]
    DuplicateMembership { household_id: i64, resident_id: i64 },

    #[error("Fee {id} is still attached to fee collection {collection_id}")]
    FeeStillReferenced { id: i64, collection_id: i64 },

    #[error("Fee {id} has recorded payments and cannot be deleted")]
    FeeHasPayments { id: i64 },

    #[error("No disbursement calculator for fee category {category:?}")]
    UnsupportedCategory { category: FeeCategory },

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: i64 },

    #[error("Invalid floor area: {area}")]
    InvalidArea { area: f64 },

    #[error("Payment status cannot change from {from:?} to {to:?}")]
    InvalidStatusTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("This action requires the {required} role")]
    Forbidden { required: &'static str },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
