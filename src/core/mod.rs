//! Core business logic - framework-agnostic entity services and the
//! fee disbursement engine.
//!
//! Nothing in this module knows about HTTP or tokens; every function takes a
//! database connection and plain values, and returns `Result` types that the
//! API boundary maps to transport responses.

/// Account registration, credential verification, and administration
pub mod account;
/// Fee disbursement engine - per-household charge computation and fan-out
pub mod disburse;
/// Fee definition management
pub mod fee;
/// Billing period (fee collection) management
pub mod fee_collection;
/// Household management, membership, and cascade deletion
pub mod household;
/// Payment record management - the direct creation path and CRUD
pub mod payment;
/// Resident management
pub mod resident;
/// Vehicle registration and management
pub mod vehicle;
