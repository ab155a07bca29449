//! Payment record business logic - the direct creation path and CRUD.
//!
//! Direct creation lets an accountant enter a single payment by hand, with a
//! caller-supplied amount. It shares the (fee, household) unique index with
//! the disbursement engine, so whichever path writes the pair second gets a
//! conflict. Status updates follow an explicit transition machine instead of
//! being freely settable.

use crate::{
    entities::{Fee, Household, Payment, PaymentStatus, payment},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a single payment record with a caller-supplied amount.
pub async fn create_payment(
    db: &DatabaseConnection,
    fee_id: i64,
    household_id: i64,
    amount: i64,
    pay_date: Option<DateTimeUtc>,
    status: Option<PaymentStatus>,
) -> Result<payment::Model> {
    if amount < 0 {
        return Err(Error::InvalidAmount { amount });
    }

    Fee::find_by_id(fee_id)
        .one(db)
        .await?
        .ok_or(Error::FeeNotFound { id: fee_id })?;

    Household::find_by_id(household_id)
        .one(db)
        .await?
        .ok_or(Error::HouseholdNotFound { id: household_id })?;

    let model = payment::ActiveModel {
        fee_id: Set(fee_id),
        household_id: Set(household_id),
        amount: Set(amount),
        pay_date: Set(pay_date.unwrap_or_else(Utc::now)),
        status: Set(status.unwrap_or(PaymentStatus::Pending)),
        ..Default::default()
    };

    match model.insert(db).await {
        Ok(payment) => Ok(payment),
        Err(err)
            if matches!(
                err.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) =>
        {
            Err(Error::DuplicatePayment {
                fee_id,
                household_id,
            })
        }
        Err(err) => Err(err.into()),
    }
}

/// Finds a payment by its unique ID.
pub async fn get_payment_by_id(
    db: &DatabaseConnection,
    payment_id: i64,
) -> Result<Option<payment::Model>> {
    Payment::find_by_id(payment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists payments, optionally restricted by fee and/or household, newest
/// first.
pub async fn list_payments(
    db: &DatabaseConnection,
    fee_id: Option<i64>,
    household_id: Option<i64>,
) -> Result<Vec<payment::Model>> {
    let mut query = Payment::find();
    if let Some(fee_id) = fee_id {
        query = query.filter(payment::Column::FeeId.eq(fee_id));
    }
    if let Some(household_id) = household_id {
        query = query.filter(payment::Column::HouseholdId.eq(household_id));
    }

    query
        .order_by_desc(payment::Column::PayDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates a payment's amount, pay date, or status.
///
/// Status changes are validated against the transition machine: pending may
/// settle or fail, failed may return to pending for retry, and paid is
/// terminal.
pub async fn update_payment(
    db: &DatabaseConnection,
    payment_id: i64,
    amount: Option<i64>,
    pay_date: Option<DateTimeUtc>,
    status: Option<PaymentStatus>,
) -> Result<payment::Model> {
    let payment = Payment::find_by_id(payment_id)
        .one(db)
        .await?
        .ok_or(Error::PaymentNotFound { id: payment_id })?;

    let current_status = payment.status;
    let mut active: payment::ActiveModel = payment.into();

    if let Some(amount) = amount {
        if amount < 0 {
            return Err(Error::InvalidAmount { amount });
        }
        active.amount = Set(amount);
    }

    if let Some(pay_date) = pay_date {
        active.pay_date = Set(pay_date);
    }

    if let Some(status) = status {
        if !current_status.can_transition_to(status) {
            return Err(Error::InvalidStatusTransition {
                from: current_status,
                to: status,
            });
        }
        active.status = Set(status);
    }

    let result = active.update(db).await?;
    Ok(result)
}

/// Deletes a payment record.
pub async fn delete_payment(db: &DatabaseConnection, payment_id: i64) -> Result<()> {
    let payment = Payment::find_by_id(payment_id)
        .one(db)
        .await?
        .ok_or(Error::PaymentNotFound { id: payment_id })?;

    payment.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_payment_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let fee = create_test_fee(&db, "Dues").await?;
        let household = create_test_household(&db, "Unit 101").await?;

        let result = create_payment(&db, fee.id, household.id, -1, None, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: -1 }
        ));

        let result = create_payment(&db, 999, household.id, 100, None, None).await;
        assert!(matches!(result.unwrap_err(), Error::FeeNotFound { id: 999 }));

        let result = create_payment(&db, fee.id, 999, 100, None, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::HouseholdNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_payment_defaults() -> Result<()> {
        let db = setup_test_db().await?;

        let fee = create_test_fee(&db, "Dues").await?;
        let household = create_test_household(&db, "Unit 101").await?;

        let before = Utc::now();
        let payment = create_payment(&db, fee.id, household.id, 350_000, None, None).await?;
        let after = Utc::now();

        assert_eq!(payment.amount, 350_000);
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(payment.pay_date >= before && payment.pay_date <= after);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_payment_duplicate_pair() -> Result<()> {
        let db = setup_test_db().await?;

        let fee = create_test_fee(&db, "Dues").await?;
        let household = create_test_household(&db, "Unit 101").await?;

        create_payment(&db, fee.id, household.id, 100, None, None).await?;

        let result = create_payment(&db, fee.id, household.id, 200, None, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DuplicatePayment { .. }
        ));

        // A different household for the same fee is fine
        let other = create_test_household(&db, "Unit 102").await?;
        create_payment(&db, fee.id, other.id, 200, None, None).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_list_payments_filters() -> Result<()> {
        let db = setup_test_db().await?;

        let dues = create_test_fee(&db, "Dues").await?;
        let parking = create_test_fee(&db, "Parking").await?;
        let h1 = create_test_household(&db, "Unit 101").await?;
        let h2 = create_test_household(&db, "Unit 102").await?;

        create_test_payment(&db, dues.id, h1.id, 100).await?;
        create_test_payment(&db, dues.id, h2.id, 200).await?;
        create_test_payment(&db, parking.id, h1.id, 300).await?;

        assert_eq!(list_payments(&db, None, None).await?.len(), 3);
        assert_eq!(list_payments(&db, Some(dues.id), None).await?.len(), 2);
        assert_eq!(list_payments(&db, None, Some(h1.id)).await?.len(), 2);
        assert_eq!(
            list_payments(&db, Some(dues.id), Some(h1.id)).await?.len(),
            1
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_update_payment_status_machine() -> Result<()> {
        let db = setup_test_db().await?;

        let fee = create_test_fee(&db, "Dues").await?;
        let household = create_test_household(&db, "Unit 101").await?;
        let payment = create_test_payment(&db, fee.id, household.id, 100).await?;

        // Pending -> Paid is legal
        let paid =
            update_payment(&db, payment.id, None, None, Some(PaymentStatus::Paid)).await?;
        assert_eq!(paid.status, PaymentStatus::Paid);

        // Paid is terminal
        let result =
            update_payment(&db, payment.id, None, None, Some(PaymentStatus::Pending)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidStatusTransition {
                from: PaymentStatus::Paid,
                to: PaymentStatus::Pending
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_payment_failed_retry() -> Result<()> {
        let db = setup_test_db().await?;

        let fee = create_test_fee(&db, "Dues").await?;
        let household = create_test_household(&db, "Unit 101").await?;
        let payment = create_test_payment(&db, fee.id, household.id, 100).await?;

        update_payment(&db, payment.id, None, None, Some(PaymentStatus::Failed)).await?;
        // Failed -> Pending reopens the payment for retry
        let reopened =
            update_payment(&db, payment.id, None, None, Some(PaymentStatus::Pending)).await?;
        assert_eq!(reopened.status, PaymentStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_payment_amount() -> Result<()> {
        let db = setup_test_db().await?;

        let fee = create_test_fee(&db, "Dues").await?;
        let household = create_test_household(&db, "Unit 101").await?;
        let payment = create_test_payment(&db, fee.id, household.id, 100).await?;

        let updated = update_payment(&db, payment.id, Some(250), None, None).await?;
        assert_eq!(updated.amount, 250);
        // Status untouched
        assert_eq!(updated.status, PaymentStatus::Pending);

        let result = update_payment(&db, payment.id, Some(-5), None, None).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_payment() -> Result<()> {
        let db = setup_test_db().await?;

        let fee = create_test_fee(&db, "Dues").await?;
        let household = create_test_household(&db, "Unit 101").await?;
        let payment = create_test_payment(&db, fee.id, household.id, 100).await?;

        delete_payment(&db, payment.id).await?;
        assert!(get_payment_by_id(&db, payment.id).await?.is_none());

        let result = delete_payment(&db, payment.id).await;
        assert!(matches!(result.unwrap_err(), Error::PaymentNotFound { .. }));

        Ok(())
    }

    #[test]
    fn test_status_transition_table() {
        use PaymentStatus::{Failed, Paid, Pending};

        assert!(Pending.can_transition_to(Paid));
        assert!(Pending.can_transition_to(Failed));
        assert!(Failed.can_transition_to(Pending));
        assert!(Pending.can_transition_to(Pending));

        assert!(!Paid.can_transition_to(Pending));
        assert!(!Paid.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Paid));
    }
}
