//! Token issuing, verification, and the role-claim extractor.
//!
//! Tokens are HS256 JWTs carrying the username and role. Handlers receive a
//! verified [`Claims`] value through the axum extractor and decide what the
//! role may do; the extractor only authenticates, it never authorizes.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::entities::Role;
use crate::errors::{Error, Result};

/// How long an issued token stays valid.
const TOKEN_TTL_HOURS: i64 = 24;

/// Verified role claim attached to a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to
    pub sub: String,
    /// Role granted to the account at login time
    pub role: Role,
    /// Expiry as a unix timestamp
    pub exp: i64,
}

impl Claims {
    /// Accountant-gated actions: fee, collection, payment, and disbursement
    /// writes. Admin passes every gate.
    pub fn require_accountant(&self) -> Result<()> {
        match self.role {
            Role::Admin | Role::Accountant => Ok(()),
            Role::Manager => Err(Error::Forbidden {
                required: "accountant",
            }),
        }
    }

    /// Manager-gated actions: resident, household, and vehicle writes.
    pub fn require_manager(&self) -> Result<()> {
        match self.role {
            Role::Admin | Role::Manager => Ok(()),
            Role::Accountant => Err(Error::Forbidden {
                required: "manager",
            }),
        }
    }

    /// Admin-gated actions: account administration.
    pub fn require_admin(&self) -> Result<()> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Accountant | Role::Manager => Err(Error::Forbidden { required: "admin" }),
        }
    }
}

/// Signs a token for the given account.
pub fn issue_token(secret: &str, username: &str, role: Role) -> Result<String> {
    let claims = Claims {
        sub: username.to_string(),
        role,
        exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Config {
        message: format!("Failed to sign token: {e}"),
    })
}

/// Verifies a token's signature and expiry, returning its claims.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| Error::InvalidToken)
}

#[async_trait]
impl FromRequestParts<AppState> for Claims {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(Error::MissingToken)?;

        let token = header.strip_prefix("Bearer ").ok_or(Error::MissingToken)?;

        verify_token(&state.jwt_secret, token)
    }
}
