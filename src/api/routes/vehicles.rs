//! Vehicle routes.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::{AppState, auth::Claims};
use crate::core::vehicle;
use crate::entities::{VehicleKind, vehicle::Model as VehicleModel};
use crate::errors::{Error, Result};

#[derive(Deserialize)]
pub struct CreateVehicleRequest {
    pub plate: String,
    pub household_id: i64,
    pub kind: VehicleKind,
}

/// `POST /vehicles`
pub async fn create(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<VehicleModel>)> {
    claims.require_manager()?;
    let created =
        vehicle::register_vehicle(&state.db, req.plate, req.household_id, req.kind).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Deserialize)]
pub struct ListVehiclesQuery {
    pub household_id: Option<i64>,
}

/// `GET /vehicles?household_id=`
pub async fn list(
    State(state): State<AppState>,
    _claims: Claims,
    Query(query): Query<ListVehiclesQuery>,
) -> Result<Json<Vec<VehicleModel>>> {
    Ok(Json(
        vehicle::list_vehicles(&state.db, query.household_id).await?,
    ))
}

/// `GET /vehicles/:id`
pub async fn get_one(
    State(state): State<AppState>,
    _claims: Claims,
    Path(id): Path<i64>,
) -> Result<Json<VehicleModel>> {
    let found = vehicle::get_vehicle_by_id(&state.db, id)
        .await?
        .ok_or(Error::VehicleNotFound { id })?;
    Ok(Json(found))
}

#[derive(Deserialize)]
pub struct UpdateVehicleRequest {
    pub plate: Option<String>,
    pub kind: Option<VehicleKind>,
    pub household_id: Option<i64>,
}

/// `PUT /vehicles/:id`
pub async fn update(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i64>,
    Json(req): Json<UpdateVehicleRequest>,
) -> Result<Json<VehicleModel>> {
    claims.require_manager()?;
    let updated =
        vehicle::update_vehicle(&state.db, id, req.plate, req.kind, req.household_id).await?;
    Ok(Json(updated))
}

/// `DELETE /vehicles/:id`
pub async fn remove(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    claims.require_manager()?;
    vehicle::delete_vehicle(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
