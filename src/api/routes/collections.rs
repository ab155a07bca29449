//! Fee collection (billing period) routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::{AppState, auth::Claims};
use crate::core::fee_collection;
use crate::entities::fee_collection::Model as FeeCollectionModel;
use crate::errors::{Error, Result};

#[derive(Deserialize)]
pub struct CreateCollectionRequest {
    pub name: String,
    pub due_date: chrono::NaiveDate,
}

/// `POST /fee-collections`
pub async fn create(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<CreateCollectionRequest>,
) -> Result<(StatusCode, Json<FeeCollectionModel>)> {
    claims.require_accountant()?;
    let created = fee_collection::create_collection(&state.db, req.name, req.due_date).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /fee-collections`
pub async fn list(
    State(state): State<AppState>,
    _claims: Claims,
) -> Result<Json<Vec<FeeCollectionModel>>> {
    Ok(Json(fee_collection::list_collections(&state.db).await?))
}

/// `GET /fee-collections/:id`
pub async fn get_one(
    State(state): State<AppState>,
    _claims: Claims,
    Path(id): Path<i64>,
) -> Result<Json<FeeCollectionModel>> {
    let found = fee_collection::get_collection_by_id(&state.db, id)
        .await?
        .ok_or(Error::CollectionNotFound { id })?;
    Ok(Json(found))
}

#[derive(Deserialize)]
pub struct UpdateCollectionRequest {
    pub name: Option<String>,
    pub due_date: Option<chrono::NaiveDate>,
}

/// `PUT /fee-collections/:id`
pub async fn update(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCollectionRequest>,
) -> Result<Json<FeeCollectionModel>> {
    claims.require_accountant()?;
    let updated =
        fee_collection::update_collection(&state.db, id, req.name, req.due_date).await?;
    Ok(Json(updated))
}

/// `DELETE /fee-collections/:id`
pub async fn remove(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    claims.require_accountant()?;
    fee_collection::delete_collection(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
