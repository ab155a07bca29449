//! Vehicle business logic - registration and management.
//!
//! Vehicles always belong to a household; the owning household must exist at
//! registration time and whenever ownership is transferred. License plates
//! are unique system-wide, enforced by the storage layer.

use crate::{
    entities::{Household, Vehicle, VehicleKind, vehicle},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Registers a new vehicle to a household.
pub async fn register_vehicle(
    db: &DatabaseConnection,
    plate: String,
    household_id: i64,
    kind: VehicleKind,
) -> Result<vehicle::Model> {
    let plate = plate.trim().to_string();
    if plate.is_empty() {
        return Err(Error::Validation {
            message: "License plate cannot be empty".to_string(),
        });
    }

    Household::find_by_id(household_id)
        .one(db)
        .await?
        .ok_or(Error::HouseholdNotFound { id: household_id })?;

    let model = vehicle::ActiveModel {
        plate: Set(plate.clone()),
        household_id: Set(household_id),
        kind: Set(kind),
        ..Default::default()
    };

    match model.insert(db).await {
        Ok(vehicle) => Ok(vehicle),
        Err(err)
            if matches!(
                err.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) =>
        {
            Err(Error::DuplicatePlate { plate })
        }
        Err(err) => Err(err.into()),
    }
}

/// Finds a vehicle by its unique ID.
pub async fn get_vehicle_by_id(
    db: &DatabaseConnection,
    vehicle_id: i64,
) -> Result<Option<vehicle::Model>> {
    Vehicle::find_by_id(vehicle_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists vehicles, optionally restricted to one household, ordered by plate.
pub async fn list_vehicles(
    db: &DatabaseConnection,
    household_id: Option<i64>,
) -> Result<Vec<vehicle::Model>> {
    let mut query = Vehicle::find();
    if let Some(household_id) = household_id {
        query = query.filter(vehicle::Column::HouseholdId.eq(household_id));
    }

    query
        .order_by_asc(vehicle::Column::Plate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates a vehicle's plate, kind, or owning household.
pub async fn update_vehicle(
    db: &DatabaseConnection,
    vehicle_id: i64,
    plate: Option<String>,
    kind: Option<VehicleKind>,
    household_id: Option<i64>,
) -> Result<vehicle::Model> {
    let vehicle = Vehicle::find_by_id(vehicle_id)
        .one(db)
        .await?
        .ok_or(Error::VehicleNotFound { id: vehicle_id })?;

    let mut active: vehicle::ActiveModel = vehicle.into();

    if let Some(plate) = plate {
        let plate = plate.trim().to_string();
        if plate.is_empty() {
            return Err(Error::Validation {
                message: "License plate cannot be empty".to_string(),
            });
        }
        active.plate = Set(plate);
    }

    if let Some(kind) = kind {
        active.kind = Set(kind);
    }

    if let Some(household_id) = household_id {
        Household::find_by_id(household_id)
            .one(db)
            .await?
            .ok_or(Error::HouseholdNotFound { id: household_id })?;
        active.household_id = Set(household_id);
    }

    match active.update(db).await {
        Ok(vehicle) => Ok(vehicle),
        Err(err)
            if matches!(
                err.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) =>
        {
            Err(Error::Validation {
                message: "Another vehicle already uses that plate".to_string(),
            })
        }
        Err(err) => Err(err.into()),
    }
}

/// Deletes a vehicle record.
pub async fn delete_vehicle(db: &DatabaseConnection, vehicle_id: i64) -> Result<()> {
    let vehicle = Vehicle::find_by_id(vehicle_id)
        .one(db)
        .await?
        .ok_or(Error::VehicleNotFound { id: vehicle_id })?;

    vehicle.delete(db).await?;
    Ok(())
}
