//! Household business logic - Handles all household-related operations.
//!
//! Provides functions for creating, retrieving, updating, and deleting
//! households, and for maintaining household membership. Deletion is a
//! multi-step cascade executed inside one transaction: membership rows,
//! owned vehicles, and payment records go first, then the household row.

use crate::{
    entities::{
        Household, HouseholdMember, Payment, Resident, Vehicle, household, household_member,
        payment, resident, vehicle,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Creates a new household after validating its address and floor area.
///
/// The area feeds directly into per-area fee computation, so it must be a
/// finite, non-negative number. A designated head of household must already
/// exist as a resident.
pub async fn create_household(
    db: &DatabaseConnection,
    address: String,
    area: f64,
    head_resident_id: Option<i64>,
) -> Result<household::Model> {
    if address.trim().is_empty() {
        return Err(Error::Validation {
            message: "Household address cannot be empty".to_string(),
        });
    }

    if !area.is_finite() || area < 0.0 {
        return Err(Error::InvalidArea { area });
    }

    if let Some(resident_id) = head_resident_id {
        Resident::find_by_id(resident_id)
            .one(db)
            .await?
            .ok_or(Error::ResidentNotFound { id: resident_id })?;
    }

    let model = household::ActiveModel {
        address: Set(address.trim().to_string()),
        area: Set(area),
        head_resident_id: Set(head_resident_id),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Finds a household by its unique ID.
pub async fn get_household_by_id(
    db: &DatabaseConnection,
    household_id: i64,
) -> Result<Option<household::Model>> {
    Household::find_by_id(household_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all households, ordered by address.
pub async fn list_households(db: &DatabaseConnection) -> Result<Vec<household::Model>> {
    Household::find()
        .order_by_asc(household::Column::Address)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates a household's address, area, or head of household.
///
/// `head_resident_id` uses double-`Option` semantics: `None` leaves the head
/// unchanged, `Some(None)` clears it, `Some(Some(id))` designates a new head.
pub async fn update_household(
    db: &DatabaseConnection,
    household_id: i64,
    address: Option<String>,
    area: Option<f64>,
    head_resident_id: Option<Option<i64>>,
) -> Result<household::Model> {
    let household = Household::find_by_id(household_id)
        .one(db)
        .await?
        .ok_or(Error::HouseholdNotFound { id: household_id })?;

    let mut active: household::ActiveModel = household.into();

    if let Some(address) = address {
        if address.trim().is_empty() {
            return Err(Error::Validation {
                message: "Household address cannot be empty".to_string(),
            });
        }
        active.address = Set(address.trim().to_string());
    }

    if let Some(area) = area {
        if !area.is_finite() || area < 0.0 {
            return Err(Error::InvalidArea { area });
        }
        active.area = Set(area);
    }

    if let Some(new_head) = head_resident_id {
        if let Some(resident_id) = new_head {
            Resident::find_by_id(resident_id)
                .one(db)
                .await?
                .ok_or(Error::ResidentNotFound { id: resident_id })?;
        }
        active.head_resident_id = Set(new_head);
    }

    let result = active.update(db).await?;
    Ok(result)
}

/// Deletes a household and everything that references it.
///
/// Two-phase cascade inside one transaction: membership rows, owned
/// vehicles, and payment records are removed first, then the household row.
pub async fn delete_household(db: &DatabaseConnection, household_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let household = Household::find_by_id(household_id)
        .one(&txn)
        .await?
        .ok_or(Error::HouseholdNotFound { id: household_id })?;

    HouseholdMember::delete_many()
        .filter(household_member::Column::HouseholdId.eq(household_id))
        .exec(&txn)
        .await?;

    Vehicle::delete_many()
        .filter(vehicle::Column::HouseholdId.eq(household_id))
        .exec(&txn)
        .await?;

    Payment::delete_many()
        .filter(payment::Column::HouseholdId.eq(household_id))
        .exec(&txn)
        .await?;

    household.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

/// Adds a resident to a household's member list.
pub async fn add_member(
    db: &DatabaseConnection,
    household_id: i64,
    resident_id: i64,
) -> Result<()> {
    Household::find_by_id(household_id)
        .one(db)
        .await?
        .ok_or(Error::HouseholdNotFound { id: household_id })?;

    Resident::find_by_id(resident_id)
        .one(db)
        .await?
        .ok_or(Error::ResidentNotFound { id: resident_id })?;

    let membership = household_member::ActiveModel {
        household_id: Set(household_id),
        resident_id: Set(resident_id),
    };

    match membership.insert(db).await {
        Ok(_) => Ok(()),
        Err(err) if is_unique_violation(&err) => Err(Error::DuplicateMembership {
            household_id,
            resident_id,
        }),
        Err(err) => Err(err.into()),
    }
}

/// Removes a resident from a household's member list.
pub async fn remove_member(
    db: &DatabaseConnection,
    household_id: i64,
    resident_id: i64,
) -> Result<()> {
    let outcome = HouseholdMember::delete_by_id((household_id, resident_id))
        .exec(db)
        .await?;

    if outcome.rows_affected == 0 {
        return Err(Error::Validation {
            message: format!("Resident {resident_id} is not a member of household {household_id}"),
        });
    }

    Ok(())
}

/// Lists the residents who are members of a household.
pub async fn list_members(
    db: &DatabaseConnection,
    household_id: i64,
) -> Result<Vec<resident::Model>> {
    let household = Household::find_by_id(household_id)
        .one(db)
        .await?
        .ok_or(Error::HouseholdNotFound { id: household_id })?;

    household
        .find_related(crate::entities::Resident)
        .order_by_asc(resident::Column::FullName)
        .all(db)
        .await
        .map_err(Into::into)
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}
