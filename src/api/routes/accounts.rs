//! Account routes - login and account administration.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::api::{
    AppState,
    auth::{Claims, issue_token},
};
use crate::core::account;
use crate::entities::{Role, account::Model as AccountModel};
use crate::errors::Result;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub role: Role,
}

/// `POST /accounts/login` - the only unauthenticated route.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let account = account::verify_credentials(&state.db, &req.username, &req.password).await?;
    let token = issue_token(&state.jwt_secret, &account.username, account.role)?;

    Ok(Json(LoginResponse {
        token,
        username: account.username,
        role: account.role,
    }))
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// `POST /accounts`
pub async fn register(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountModel>)> {
    claims.require_admin()?;
    let created =
        account::register_account(&state.db, req.username, req.password, req.role).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /accounts`
pub async fn list(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Vec<AccountModel>>> {
    claims.require_admin()?;
    Ok(Json(account::list_accounts(&state.db).await?))
}

/// `DELETE /accounts/:username`
pub async fn remove(
    State(state): State<AppState>,
    claims: Claims,
    Path(username): Path<String>,
) -> Result<StatusCode> {
    claims.require_admin()?;
    account::delete_account(&state.db, &username).await?;
    Ok(StatusCode::NO_CONTENT)
}
