//! Payment routes - direct creation and CRUD over payment records.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::{AppState, auth::Claims};
use crate::core::payment;
use crate::entities::{PaymentStatus, payment::Model as PaymentModel};
use crate::errors::{Error, Result};

#[derive(Deserialize)]
pub struct CreatePaymentRequest {
    pub fee_id: i64,
    pub household_id: i64,
    pub amount: i64,
    pub pay_date: Option<chrono::DateTime<chrono::Utc>>,
    pub status: Option<PaymentStatus>,
}

/// `POST /payments` - the direct entry path, sharing the (fee, household)
/// uniqueness invariant with batch disbursement.
pub async fn create(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<PaymentModel>)> {
    claims.require_accountant()?;
    let created = payment::create_payment(
        &state.db,
        req.fee_id,
        req.household_id,
        req.amount,
        req.pay_date,
        req.status,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Deserialize)]
pub struct ListPaymentsQuery {
    pub fee_id: Option<i64>,
    pub household_id: Option<i64>,
}

/// `GET /payments?fee_id=&household_id=`
pub async fn list(
    State(state): State<AppState>,
    _claims: Claims,
    Query(query): Query<ListPaymentsQuery>,
) -> Result<Json<Vec<PaymentModel>>> {
    Ok(Json(
        payment::list_payments(&state.db, query.fee_id, query.household_id).await?,
    ))
}

/// `GET /payments/:id`
pub async fn get_one(
    State(state): State<AppState>,
    _claims: Claims,
    Path(id): Path<i64>,
) -> Result<Json<PaymentModel>> {
    let found = payment::get_payment_by_id(&state.db, id)
        .await?
        .ok_or(Error::PaymentNotFound { id })?;
    Ok(Json(found))
}

#[derive(Deserialize)]
pub struct UpdatePaymentRequest {
    pub amount: Option<i64>,
    pub pay_date: Option<chrono::DateTime<chrono::Utc>>,
    pub status: Option<PaymentStatus>,
}

/// `PUT /payments/:id`
pub async fn update(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePaymentRequest>,
) -> Result<Json<PaymentModel>> {
    claims.require_accountant()?;
    let updated =
        payment::update_payment(&state.db, id, req.amount, req.pay_date, req.status).await?;
    Ok(Json(updated))
}

/// `DELETE /payments/:id`
pub async fn remove(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    claims.require_accountant()?;
    payment::delete_payment(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
