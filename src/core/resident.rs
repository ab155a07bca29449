//! Resident business logic.
//!
//! Deleting a resident detaches every reference first: membership rows are
//! removed and any household that designates the resident as its head has
//! that designation cleared, all inside one transaction.

use crate::{
    entities::{Household, HouseholdMember, Resident, household, household_member, resident},
    errors::{Error, Result},
};
use sea_orm::sea_query::Expr;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Registers a new resident.
pub async fn create_resident(
    db: &DatabaseConnection,
    full_name: String,
    national_id: String,
    phone: String,
    email: Option<String>,
) -> Result<resident::Model> {
    if full_name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Resident name cannot be empty".to_string(),
        });
    }

    let national_id = national_id.trim().to_string();
    if national_id.is_empty() {
        return Err(Error::Validation {
            message: "National id cannot be empty".to_string(),
        });
    }

    let model = resident::ActiveModel {
        full_name: Set(full_name.trim().to_string()),
        national_id: Set(national_id.clone()),
        phone: Set(phone),
        email: Set(email),
        ..Default::default()
    };

    match model.insert(db).await {
        Ok(resident) => Ok(resident),
        Err(err)
            if matches!(
                err.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) =>
        {
            Err(Error::DuplicateNationalId { national_id })
        }
        Err(err) => Err(err.into()),
    }
}

/// Finds a resident by their unique ID.
pub async fn get_resident_by_id(
    db: &DatabaseConnection,
    resident_id: i64,
) -> Result<Option<resident::Model>> {
    Resident::find_by_id(resident_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all residents, ordered by name.
pub async fn list_residents(db: &DatabaseConnection) -> Result<Vec<resident::Model>> {
    Resident::find()
        .order_by_asc(resident::Column::FullName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates a resident's contact details.
pub async fn update_resident(
    db: &DatabaseConnection,
    resident_id: i64,
    full_name: Option<String>,
    phone: Option<String>,
    email: Option<Option<String>>,
) -> Result<resident::Model> {
    let resident = Resident::find_by_id(resident_id)
        .one(db)
        .await?
        .ok_or(Error::ResidentNotFound { id: resident_id })?;

    let mut active: resident::ActiveModel = resident.into();

    if let Some(full_name) = full_name {
        if full_name.trim().is_empty() {
            return Err(Error::Validation {
                message: "Resident name cannot be empty".to_string(),
            });
        }
        active.full_name = Set(full_name.trim().to_string());
    }

    if let Some(phone) = phone {
        active.phone = Set(phone);
    }

    if let Some(email) = email {
        active.email = Set(email);
    }

    let result = active.update(db).await?;
    Ok(result)
}

/// Deletes a resident, detaching all references first.
pub async fn delete_resident(db: &DatabaseConnection, resident_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let resident = Resident::find_by_id(resident_id)
        .one(&txn)
        .await?
        .ok_or(Error::ResidentNotFound { id: resident_id })?;

    HouseholdMember::delete_many()
        .filter(household_member::Column::ResidentId.eq(resident_id))
        .exec(&txn)
        .await?;

    Household::update_many()
        .col_expr(
            household::Column::HeadResidentId,
            Expr::value(Option::<i64>::None),
        )
        .filter(household::Column::HeadResidentId.eq(resident_id))
        .exec(&txn)
        .await?;

    resident.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
