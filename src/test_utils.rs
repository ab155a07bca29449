//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults.

use crate::{
    config::rates::FeeRates,
    core::{fee, fee_collection, household, payment, resident, vehicle},
    entities::{self, FeeCategory, VehicleKind},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables and indexes
/// initialized. This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The default rate table; matches the values shipped in config.toml.
#[must_use]
pub fn test_rates() -> FeeRates {
    FeeRates::default()
}

/// Creates a test household with a 50 m² floor area and no head.
pub async fn create_test_household(
    db: &DatabaseConnection,
    address: &str,
) -> Result<entities::household::Model> {
    household::create_household(db, address.to_string(), 50.0, None).await
}

/// Creates a test household with a custom floor area.
pub async fn create_custom_household(
    db: &DatabaseConnection,
    address: &str,
    area: f64,
) -> Result<entities::household::Model> {
    household::create_household(db, address.to_string(), area, None).await
}

/// Creates a test resident with default contact details.
pub async fn create_test_resident(
    db: &DatabaseConnection,
    full_name: &str,
    national_id: &str,
) -> Result<entities::resident::Model> {
    resident::create_resident(
        db,
        full_name.to_string(),
        national_id.to_string(),
        "0123456789".to_string(),
        None,
    )
    .await
}

/// Registers a test vehicle to a household.
pub async fn create_test_vehicle(
    db: &DatabaseConnection,
    household_id: i64,
    plate: &str,
    kind: VehicleKind,
) -> Result<entities::vehicle::Model> {
    vehicle::register_vehicle(db, plate.to_string(), household_id, kind).await
}

/// Creates a test fee in the `Management` category, unattached.
pub async fn create_test_fee(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::fee::Model> {
    create_custom_fee(db, name, FeeCategory::Management).await
}

/// Creates a test fee with a specific category.
pub async fn create_custom_fee(
    db: &DatabaseConnection,
    name: &str,
    category: FeeCategory,
) -> Result<entities::fee::Model> {
    fee::create_fee(db, name.to_string(), String::new(), category, None).await
}

/// Creates a test fee collection due at the end of 2026-Q1.
pub async fn create_test_collection(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::fee_collection::Model> {
    let due = NaiveDate::from_ymd_opt(2026, 3, 31).expect("valid date");
    fee_collection::create_collection(db, name.to_string(), due).await
}

/// Creates a test payment with default pay date and pending status.
pub async fn create_test_payment(
    db: &DatabaseConnection,
    fee_id: i64,
    household_id: i64,
    amount: i64,
) -> Result<entities::payment::Model> {
    payment::create_payment(db, fee_id, household_id, amount, None, None).await
}
