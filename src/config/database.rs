//! Database configuration module.
//!
//! Handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the database schema matches the
//! Rust struct definitions without manual SQL. The composite unique index
//! that enforces the one-payment-per-(fee, household) invariant is created
//! here alongside the tables, since single-entity schema generation cannot
//! express it.

use crate::entities::{
    Account, Fee, FeeCollection, Household, HouseholdMember, Payment, Resident, Vehicle, payment,
};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all database tables and indexes from the entity definitions.
///
/// Safe to run against an existing database: every statement carries
/// `IF NOT EXISTS`.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(Account),
        schema.create_table_from_entity(Resident),
        schema.create_table_from_entity(Household),
        schema.create_table_from_entity(HouseholdMember),
        schema.create_table_from_entity(Vehicle),
        schema.create_table_from_entity(FeeCollection),
        schema.create_table_from_entity(Fee),
        schema.create_table_from_entity(Payment),
    ];

    for table in &mut statements {
        db.execute(builder.build(table.if_not_exists())).await?;
    }

    // One payment per (fee, household): the uniqueness invariant lives in
    // storage, not in application-level check-then-act.
    let payment_uniqueness = Index::create()
        .name("idx_payments_fee_household")
        .table(Payment)
        .col(payment::Column::FeeId)
        .col(payment::Column::HouseholdId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&payment_uniqueness)).await?;

    Ok(())
}
