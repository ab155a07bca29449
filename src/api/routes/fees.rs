//! Fee routes, including the disbursement endpoint.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::info;

use crate::api::{AppState, auth::Claims};
use crate::core::{
    disburse::{DisbursementResult, disburse_fee, format_disbursement_summary},
    fee,
};
use crate::entities::{FeeCategory, fee::Model as FeeModel};
use crate::errors::{Error, Result};

#[derive(Deserialize)]
pub struct CreateFeeRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: FeeCategory,
    pub collection_id: Option<i64>,
}

/// `POST /fees`
pub async fn create(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<CreateFeeRequest>,
) -> Result<(StatusCode, Json<FeeModel>)> {
    claims.require_accountant()?;
    let created = fee::create_fee(
        &state.db,
        req.name,
        req.description,
        req.category,
        req.collection_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Deserialize)]
pub struct ListFeesQuery {
    pub collection_id: Option<i64>,
}

/// `GET /fees?collection_id=`
pub async fn list(
    State(state): State<AppState>,
    _claims: Claims,
    Query(query): Query<ListFeesQuery>,
) -> Result<Json<Vec<FeeModel>>> {
    Ok(Json(fee::list_fees(&state.db, query.collection_id).await?))
}

/// `GET /fees/:id`
pub async fn get_one(
    State(state): State<AppState>,
    _claims: Claims,
    Path(id): Path<i64>,
) -> Result<Json<FeeModel>> {
    let found = fee::get_fee_by_id(&state.db, id)
        .await?
        .ok_or(Error::FeeNotFound { id })?;
    Ok(Json(found))
}

#[derive(Deserialize)]
pub struct UpdateFeeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Missing field leaves the attachment unchanged; an explicit null detaches
    #[serde(default)]
    pub collection_id: Option<Option<i64>>,
}

/// `PUT /fees/:id`
pub async fn update(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i64>,
    Json(req): Json<UpdateFeeRequest>,
) -> Result<Json<FeeModel>> {
    claims.require_accountant()?;
    let updated = fee::update_fee(
        &state.db,
        id,
        req.name,
        req.description,
        req.collection_id,
    )
    .await?;
    Ok(Json(updated))
}

/// `DELETE /fees/:id`
pub async fn remove(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    claims.require_accountant()?;
    fee::delete_fee(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize, Default)]
pub struct DisburseRequest {
    /// Pay date stamped onto the created payments; defaults to now
    pub pay_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// `POST /fees/:id/disburse` - fans out one pending payment per household.
pub async fn disburse(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i64>,
    body: Option<Json<DisburseRequest>>,
) -> Result<Json<DisbursementResult>> {
    claims.require_accountant()?;

    let pay_date = body.and_then(|Json(req)| req.pay_date);
    let result = disburse_fee(&state.db, &state.rates, id, pay_date).await?;

    info!("{}", format_disbursement_summary(&result));
    Ok(Json(result))
}
