//! Fee disbursement engine.
//!
//! Given a fee definition, creates one pending payment per household, with
//! the amount computed by the fee category's calculator: vehicle fees count
//! the household's cars and motorcycles, management and service fees charge
//! per square meter of floor area. The (fee, household) uniqueness invariant
//! is enforced by the storage layer's composite unique index: the engine
//! inserts and classifies a constraint violation as "already disbursed"
//! instead of pre-checking, so concurrent disbursements of the same fee
//! cannot race past each other.
//!
//! One household's failure never blocks the rest of the batch; the caller
//! receives a per-household report of created, skipped, and failed rows.

use crate::{
    config::rates::FeeRates,
    entities::{
        Fee, FeeCategory, Household, PaymentStatus, Vehicle, VehicleKind, household, payment,
        vehicle,
    },
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use serde::Serialize;
use tracing::info;

/// How a fee category turns household state into an amount.
#[derive(Debug, Clone, Copy)]
enum ChargeBasis {
    /// Count the household's billable vehicles
    VehicleInventory,
    /// Charge per square meter of floor area at the given rate
    PerArea(i64),
}

/// Resolves the calculator for a fee category.
///
/// The match is exhaustive: adding a `FeeCategory` variant will not compile
/// until a decision is made here, so no category can fall through to a
/// silent no-op disbursement.
fn charge_basis(category: FeeCategory, rates: &FeeRates) -> Result<ChargeBasis> {
    match category {
        FeeCategory::Vehicle => Ok(ChargeBasis::VehicleInventory),
        FeeCategory::Management => Ok(ChargeBasis::PerArea(rates.management_rate_per_sqm)),
        FeeCategory::Service => Ok(ChargeBasis::PerArea(rates.service_rate_per_sqm)),
        FeeCategory::Water
        | FeeCategory::Electricity
        | FeeCategory::Maintenance
        | FeeCategory::Other => Err(Error::UnsupportedCategory { category }),
    }
}

/// Vehicle-fee amount for a household owning `cars` cars and `motorcycles`
/// motorcycles. Bicycles are exempt.
#[must_use]
pub fn vehicle_fee_amount(cars: i64, motorcycles: i64, rates: &FeeRates) -> i64 {
    motorcycles * rates.motorcycle_fee + cars * rates.car_fee
}

/// Per-area amount for `area` square meters at `rate_per_sqm`, rounded to
/// the nearest whole currency unit.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn area_fee_amount(area: f64, rate_per_sqm: i64) -> i64 {
    (area * rate_per_sqm as f64).round() as i64
}

/// One household that could not be disbursed.
#[derive(Debug, Clone, Serialize)]
pub struct HouseholdFailure {
    /// Household the failure applies to
    pub household_id: i64,
    /// Human-readable reason
    pub reason: String,
}

/// Outcome of disbursing one fee across the full household set.
#[derive(Debug, Clone, Serialize)]
pub struct DisbursementResult {
    /// Fee that was disbursed
    pub fee_id: i64,
    /// Pay date stamped onto every created payment
    pub pay_date: DateTimeUtc,
    /// Number of payment records created
    pub created: usize,
    /// Households skipped because a payment for this fee already existed
    pub skipped_duplicates: usize,
    /// Households that failed, with reasons
    pub failed: Vec<HouseholdFailure>,
}

impl DisbursementResult {
    /// Total households examined by the run.
    #[must_use]
    pub fn total_processed(&self) -> usize {
        self.created + self.skipped_duplicates + self.failed.len()
    }
}

/// Disburses a fee: one pending payment per household.
///
/// The fee must exist and carry a category with a calculator; an unsupported
/// category is fatal for the whole request and writes nothing. Individual
/// household failures and already-disbursed households are collected into
/// the result without aborting the batch.
pub async fn disburse_fee(
    db: &DatabaseConnection,
    rates: &FeeRates,
    fee_id: i64,
    pay_date_override: Option<DateTimeUtc>,
) -> Result<DisbursementResult> {
    let fee = Fee::find_by_id(fee_id)
        .one(db)
        .await?
        .ok_or(Error::FeeNotFound { id: fee_id })?;

    let basis = charge_basis(fee.category, rates)?;
    let pay_date = pay_date_override.unwrap_or_else(Utc::now);

    let households = Household::find().all(db).await?;

    let mut created = 0;
    let mut skipped_duplicates = 0;
    let mut failed = Vec::new();

    for h in households {
        let amount = match compute_amount(db, &h, basis, rates).await {
            Ok(amount) => amount,
            Err(err) => {
                failed.push(HouseholdFailure {
                    household_id: h.id,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let record = payment::ActiveModel {
            fee_id: Set(fee.id),
            household_id: Set(h.id),
            amount: Set(amount),
            pay_date: Set(pay_date),
            status: Set(PaymentStatus::Pending),
            ..Default::default()
        };

        match record.insert(db).await {
            Ok(_) => created += 1,
            Err(err)
                if matches!(
                    err.sql_err(),
                    Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
                ) =>
            {
                skipped_duplicates += 1;
            }
            Err(err) => failed.push(HouseholdFailure {
                household_id: h.id,
                reason: err.to_string(),
            }),
        }
    }

    let result = DisbursementResult {
        fee_id: fee.id,
        pay_date,
        created,
        skipped_duplicates,
        failed,
    };

    info!(
        fee_id = result.fee_id,
        created = result.created,
        skipped = result.skipped_duplicates,
        failed = result.failed.len(),
        "disbursement finished"
    );

    Ok(result)
}

/// Computes the amount owed by one household under the given basis.
///
/// Guards against out-of-range stored areas so one bad row fails alone
/// instead of producing a nonsense charge.
async fn compute_amount(
    db: &DatabaseConnection,
    h: &household::Model,
    basis: ChargeBasis,
    rates: &FeeRates,
) -> Result<i64> {
    match basis {
        ChargeBasis::VehicleInventory => {
            let vehicles = Vehicle::find()
                .filter(vehicle::Column::HouseholdId.eq(h.id))
                .all(db)
                .await?;
            let (cars, motorcycles) = count_billable(&vehicles);
            Ok(vehicle_fee_amount(cars, motorcycles, rates))
        }
        ChargeBasis::PerArea(rate) => {
            if !h.area.is_finite() || h.area < 0.0 {
                return Err(Error::InvalidArea { area: h.area });
            }
            Ok(area_fee_amount(h.area, rate))
        }
    }
}

/// Counts (cars, motorcycles) in a household's vehicle list.
fn count_billable(vehicles: &[vehicle::Model]) -> (i64, i64) {
    let mut cars = 0;
    let mut motorcycles = 0;
    for v in vehicles {
        match v.kind {
            VehicleKind::Car => cars += 1,
            VehicleKind::Motorcycle => motorcycles += 1,
            VehicleKind::Bicycle => {}
        }
    }
    (cars, motorcycles)
}

/// Formats a disbursement result into a human-readable summary string.
#[must_use]
pub fn format_disbursement_summary(result: &DisbursementResult) -> String {
    use std::fmt::Write;

    let mut summary = format!(
        "Disbursement of fee {} - {} households processed\n",
        result.fee_id,
        result.total_processed()
    );

    // write! is infallible when writing to String, so unwrap is safe
    write!(
        summary,
        "  Created: {} | Already disbursed: {} | Failed: {}\n",
        result.created,
        result.skipped_duplicates,
        result.failed.len()
    )
    .unwrap();

    for failure in &result.failed {
        writeln!(
            summary,
            "  household {} failed: {}",
            failure.household_id, failure.reason
        )
        .unwrap();
    }

    summary
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::Payment;
    use crate::test_utils::*;
    use chrono::TimeZone;

    #[test]
    fn test_vehicle_fee_amount() {
        let rates = test_rates();
        // 2 motorcycles + 1 car
        assert_eq!(vehicle_fee_amount(1, 2, &rates), 1_340_000);
        assert_eq!(vehicle_fee_amount(0, 0, &rates), 0);
        assert_eq!(vehicle_fee_amount(0, 3, &rates), 210_000);
    }

    #[test]
    fn test_area_fee_amounts() {
        assert_eq!(area_fee_amount(50.0, 7_000), 350_000);
        assert_eq!(area_fee_amount(50.0, 10_000), 500_000);
        // Fractional areas round to the nearest unit
        assert_eq!(area_fee_amount(50.25, 7_000), 351_750);
        assert_eq!(area_fee_amount(0.0, 7_000), 0);
    }

    #[test]
    fn test_unsupported_categories_have_no_basis() {
        let rates = test_rates();
        for category in [
            FeeCategory::Water,
            FeeCategory::Electricity,
            FeeCategory::Maintenance,
            FeeCategory::Other,
        ] {
            let result = charge_basis(category, &rates);
            assert!(matches!(
                result.unwrap_err(),
                Error::UnsupportedCategory { .. }
            ));
        }
    }

    #[tokio::test]
    async fn test_disburse_management_fee_batch() -> Result<()> {
        let db = setup_test_db().await?;
        let rates = test_rates();

        let h1 = create_custom_household(&db, "Unit 101", 50.0).await?;
        let h2 = create_custom_household(&db, "Unit 102", 75.0).await?;
        let h3 = create_custom_household(&db, "Unit 103", 100.0).await?;
        let fee = create_custom_fee(&db, "Management dues", FeeCategory::Management).await?;

        let result = disburse_fee(&db, &rates, fee.id, None).await?;

        assert_eq!(result.created, 3);
        assert_eq!(result.skipped_duplicates, 0);
        assert!(result.failed.is_empty());

        for (household_id, expected) in [(h1.id, 350_000), (h2.id, 525_000), (h3.id, 700_000)] {
            let payment = Payment::find()
                .filter(payment::Column::FeeId.eq(fee.id))
                .filter(payment::Column::HouseholdId.eq(household_id))
                .one(&db)
                .await?
                .unwrap();
            assert_eq!(payment.amount, expected);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_disburse_service_fee_amount() -> Result<()> {
        let db = setup_test_db().await?;
        let rates = test_rates();

        let household = create_custom_household(&db, "Unit 101", 50.0).await?;
        let fee = create_custom_fee(&db, "Service charge", FeeCategory::Service).await?;

        let result = disburse_fee(&db, &rates, fee.id, None).await?;
        assert_eq!(result.created, 1);

        let payment = Payment::find()
            .filter(payment::Column::HouseholdId.eq(household.id))
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(payment.amount, 500_000);
        assert_eq!(payment.status, PaymentStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn test_disburse_vehicle_fee_counts_by_kind() -> Result<()> {
        let db = setup_test_db().await?;
        let rates = test_rates();

        let garage = create_custom_household(&db, "Unit 101", 50.0).await?;
        create_test_vehicle(&db, garage.id, "29A-00001", VehicleKind::Motorcycle).await?;
        create_test_vehicle(&db, garage.id, "29A-00002", VehicleKind::Motorcycle).await?;
        create_test_vehicle(&db, garage.id, "29A-00003", VehicleKind::Car).await?;
        create_test_vehicle(&db, garage.id, "29A-00004", VehicleKind::Bicycle).await?;

        let empty = create_custom_household(&db, "Unit 102", 60.0).await?;

        let fee = create_custom_fee(&db, "Parking", FeeCategory::Vehicle).await?;
        let result = disburse_fee(&db, &rates, fee.id, None).await?;
        assert_eq!(result.created, 2);

        let garage_payment = Payment::find()
            .filter(payment::Column::HouseholdId.eq(garage.id))
            .one(&db)
            .await?
            .unwrap();
        // 2 motorcycles * 70_000 + 1 car * 1_200_000; the bicycle is free
        assert_eq!(garage_payment.amount, 1_340_000);

        let empty_payment = Payment::find()
            .filter(payment::Column::HouseholdId.eq(empty.id))
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(empty_payment.amount, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_disburse_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let rates = test_rates();

        create_custom_household(&db, "Unit 101", 50.0).await?;
        create_custom_household(&db, "Unit 102", 75.0).await?;
        let fee = create_custom_fee(&db, "Management dues", FeeCategory::Management).await?;

        let first = disburse_fee(&db, &rates, fee.id, None).await?;
        assert_eq!(first.created, 2);
        assert_eq!(first.skipped_duplicates, 0);

        let second = disburse_fee(&db, &rates, fee.id, None).await?;
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped_duplicates, 2);
        assert!(second.failed.is_empty());

        // Still exactly one payment per (fee, household) pair
        let count = Payment::find()
            .filter(payment::Column::FeeId.eq(fee.id))
            .count(&db)
            .await?;
        assert_eq!(count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_disburse_skips_directly_created_payment() -> Result<()> {
        let db = setup_test_db().await?;
        let rates = test_rates();

        let settled = create_custom_household(&db, "Unit 101", 50.0).await?;
        create_custom_household(&db, "Unit 102", 75.0).await?;
        let fee = create_custom_fee(&db, "Management dues", FeeCategory::Management).await?;

        // An accountant already entered this household's payment by hand
        create_test_payment(&db, fee.id, settled.id, 123_456).await?;

        let result = disburse_fee(&db, &rates, fee.id, None).await?;
        assert_eq!(result.created, 1);
        assert_eq!(result.skipped_duplicates, 1);

        // The manual record was not overwritten
        let manual = Payment::find()
            .filter(payment::Column::HouseholdId.eq(settled.id))
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(manual.amount, 123_456);

        Ok(())
    }

    #[tokio::test]
    async fn test_disburse_unknown_fee() -> Result<()> {
        let db = setup_test_db().await?;
        let rates = test_rates();

        let result = disburse_fee(&db, &rates, 999, None).await;
        assert!(matches!(result.unwrap_err(), Error::FeeNotFound { id: 999 }));

        Ok(())
    }

    #[tokio::test]
    async fn test_disburse_unsupported_category_writes_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let rates = test_rates();

        create_custom_household(&db, "Unit 101", 50.0).await?;
        let fee = create_custom_fee(&db, "Water meter", FeeCategory::Water).await?;

        let result = disburse_fee(&db, &rates, fee.id, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::UnsupportedCategory {
                category: FeeCategory::Water
            }
        ));

        assert_eq!(Payment::find().count(&db).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_disburse_partial_failure_isolation() -> Result<()> {
        let db = setup_test_db().await?;
        let rates = test_rates();

        let h1 = create_custom_household(&db, "Unit 101", 50.0).await?;
        let bad = create_custom_household(&db, "Unit 102", 60.0).await?;
        let h3 = create_custom_household(&db, "Unit 103", 70.0).await?;

        // Corrupt the stored area behind the core layer's validation
        let mut active: household::ActiveModel = bad.clone().into();
        active.area = Set(-10.0);
        active.update(&db).await?;

        let fee = create_custom_fee(&db, "Management dues", FeeCategory::Management).await?;
        let result = disburse_fee(&db, &rates, fee.id, None).await?;

        assert_eq!(result.created, 2);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].household_id, bad.id);
        assert!(result.failed[0].reason.contains("area"));

        // The healthy households' payments were committed
        for id in [h1.id, h3.id] {
            let payment = Payment::find()
                .filter(payment::Column::HouseholdId.eq(id))
                .one(&db)
                .await?;
            assert!(payment.is_some());
        }
        let bad_payment = Payment::find()
            .filter(payment::Column::HouseholdId.eq(bad.id))
            .one(&db)
            .await?;
        assert!(bad_payment.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_disburse_pay_date_override() -> Result<()> {
        let db = setup_test_db().await?;
        let rates = test_rates();

        create_custom_household(&db, "Unit 101", 50.0).await?;
        let fee = create_custom_fee(&db, "Management dues", FeeCategory::Management).await?;

        let due = Utc.with_ymd_and_hms(2026, 3, 31, 0, 0, 0).unwrap();
        let result = disburse_fee(&db, &rates, fee.id, Some(due)).await?;
        assert_eq!(result.pay_date, due);

        let payment = Payment::find().one(&db).await?.unwrap();
        assert_eq!(payment.pay_date, due);

        Ok(())
    }

    #[tokio::test]
    async fn test_disburse_empty_household_set() -> Result<()> {
        let db = setup_test_db().await?;
        let rates = test_rates();

        let fee = create_custom_fee(&db, "Management dues", FeeCategory::Management).await?;
        let result = disburse_fee(&db, &rates, fee.id, None).await?;

        assert_eq!(result.created, 0);
        assert_eq!(result.total_processed(), 0);

        Ok(())
    }

    #[test]
    fn test_format_disbursement_summary() {
        let result = DisbursementResult {
            fee_id: 7,
            pay_date: Utc.with_ymd_and_hms(2026, 3, 31, 0, 0, 0).unwrap(),
            created: 12,
            skipped_duplicates: 3,
            failed: vec![HouseholdFailure {
                household_id: 42,
                reason: "Invalid floor area: -10".to_string(),
            }],
        };

        let summary = format_disbursement_summary(&result);
        assert!(summary.contains("fee 7"));
        assert!(summary.contains("16 households processed"));
        assert!(summary.contains("Created: 12"));
        assert!(summary.contains("Already disbursed: 3"));
        assert!(summary.contains("household 42 failed"));
    }
}
