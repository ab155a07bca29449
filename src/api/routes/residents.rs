//! Resident routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::{AppState, auth::Claims};
use crate::core::resident;
use crate::entities::resident::Model as ResidentModel;
use crate::errors::{Error, Result};

#[derive(Deserialize)]
pub struct CreateResidentRequest {
    pub full_name: String,
    pub national_id: String,
    pub phone: String,
    pub email: Option<String>,
}

/// `POST /residents`
pub async fn create(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<CreateResidentRequest>,
) -> Result<(StatusCode, Json<ResidentModel>)> {
    claims.require_manager()?;
    let created = resident::create_resident(
        &state.db,
        req.full_name,
        req.national_id,
        req.phone,
        req.email,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /residents`
pub async fn list(
    State(state): State<AppState>,
    _claims: Claims,
) -> Result<Json<Vec<ResidentModel>>> {
    Ok(Json(resident::list_residents(&state.db).await?))
}

/// `GET /residents/:id`
pub async fn get_one(
    State(state): State<AppState>,
    _claims: Claims,
    Path(id): Path<i64>,
) -> Result<Json<ResidentModel>> {
    let found = resident::get_resident_by_id(&state.db, id)
        .await?
        .ok_or(Error::ResidentNotFound { id })?;
    Ok(Json(found))
}

#[derive(Deserialize)]
pub struct UpdateResidentRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    /// Missing field leaves the email unchanged; an explicit null clears it
    #[serde(default)]
    pub email: Option<Option<String>>,
}

/// `PUT /residents/:id`
pub async fn update(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i64>,
    Json(req): Json<UpdateResidentRequest>,
) -> Result<Json<ResidentModel>> {
    claims.require_manager()?;
    let updated =
        resident::update_resident(&state.db, id, req.full_name, req.phone, req.email).await?;
    Ok(Json(updated))
}

/// `DELETE /residents/:id`
pub async fn remove(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    claims.require_manager()?;
    resident::delete_resident(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
