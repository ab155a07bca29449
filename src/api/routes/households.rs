//! Household routes, including membership management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::{AppState, auth::Claims};
use crate::core::household;
use crate::entities::{household::Model as HouseholdModel, resident::Model as ResidentModel};
use crate::errors::{Error, Result};

#[derive(Deserialize)]
pub struct CreateHouseholdRequest {
    pub address: String,
    pub area: f64,
    pub head_resident_id: Option<i64>,
}

/// `POST /households`
pub async fn create(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<CreateHouseholdRequest>,
) -> Result<(StatusCode, Json<HouseholdModel>)> {
    claims.require_manager()?;
    let created =
        household::create_household(&state.db, req.address, req.area, req.head_resident_id)
            .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /households`
pub async fn list(
    State(state): State<AppState>,
    _claims: Claims,
) -> Result<Json<Vec<HouseholdModel>>> {
    Ok(Json(household::list_households(&state.db).await?))
}

/// `GET /households/:id`
pub async fn get_one(
    State(state): State<AppState>,
    _claims: Claims,
    Path(id): Path<i64>,
) -> Result<Json<HouseholdModel>> {
    let found = household::get_household_by_id(&state.db, id)
        .await?
        .ok_or(Error::HouseholdNotFound { id })?;
    Ok(Json(found))
}

#[derive(Deserialize)]
pub struct UpdateHouseholdRequest {
    pub address: Option<String>,
    pub area: Option<f64>,
    /// Missing field leaves the head unchanged; an explicit null clears it
    #[serde(default)]
    pub head_resident_id: Option<Option<i64>>,
}

/// `PUT /households/:id`
pub async fn update(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i64>,
    Json(req): Json<UpdateHouseholdRequest>,
) -> Result<Json<HouseholdModel>> {
    claims.require_manager()?;
    let updated = household::update_household(
        &state.db,
        id,
        req.address,
        req.area,
        req.head_resident_id,
    )
    .await?;
    Ok(Json(updated))
}

/// `DELETE /households/:id`
pub async fn remove(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    claims.require_manager()?;
    household::delete_household(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /households/:id/members`
pub async fn members(
    State(state): State<AppState>,
    _claims: Claims,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ResidentModel>>> {
    Ok(Json(household::list_members(&state.db, id).await?))
}

#[derive(Deserialize)]
pub struct AddMemberRequest {
    pub resident_id: i64,
}

/// `POST /households/:id/members`
pub async fn add_member(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i64>,
    Json(req): Json<AddMemberRequest>,
) -> Result<StatusCode> {
    claims.require_manager()?;
    household::add_member(&state.db, id, req.resident_id).await?;
    Ok(StatusCode::CREATED)
}

/// `DELETE /households/:id/members/:resident_id`
pub async fn remove_member(
    State(state): State<AppState>,
    claims: Claims,
    Path((id, resident_id)): Path<(i64, i64)>,
) -> Result<StatusCode> {
    claims.require_manager()?;
    household::remove_member(&state.db, id, resident_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
