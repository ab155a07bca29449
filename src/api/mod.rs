//! REST API boundary - routing, state, and error mapping.
//!
//! Handlers stay thin: they check the caller's role claim, call into
//! [`crate::core`], and serialize the result. All domain errors are mapped
//! to transport status codes here and nowhere else.

/// Token issuing, verification, and the role-claim extractor
pub mod auth;
/// Route handlers, one module per entity group
pub mod routes;

use std::time::Duration;

use axum::{
    Router,
    http::{
        Method, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use sea_orm::DatabaseConnection;
use tokio::{
    net::TcpListener,
    signal::{
        ctrl_c,
        unix::{SignalKind, signal},
    },
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};
use tracing::{error, info};

use crate::config::{AppConfig, rates::FeeRates};
use crate::errors::{Error, Result};
use routes::{accounts, collections, fees, households, payments, residents, vehicles};

/// Shared state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all database operations
    pub db: DatabaseConnection,
    /// Disbursement rate table loaded at startup
    pub rates: FeeRates,
    /// HMAC secret for signing and verifying access tokens
    pub jwt_secret: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::AccountNotFound { .. }
            | Error::ResidentNotFound { .. }
            | Error::HouseholdNotFound { .. }
            | Error::VehicleNotFound { .. }
            | Error::FeeNotFound { .. }
            | Error::CollectionNotFound { .. }
            | Error::PaymentNotFound { .. } => StatusCode::NOT_FOUND,

            Error::DuplicatePayment { .. }
            | Error::DuplicatePlate { .. }
            | Error::DuplicateUsername { .. }
            | Error::DuplicateNationalId { .. }
            | Error::DuplicateMembership { .. }
            | Error::FeeStillReferenced { .. }
            | Error::FeeHasPayments { .. } => StatusCode::CONFLICT,

            Error::UnsupportedCategory { .. } => StatusCode::UNPROCESSABLE_ENTITY,

            Error::Validation { .. }
            | Error::InvalidAmount { .. }
            | Error::InvalidArea { .. }
            | Error::InvalidStatusTransition { .. } => StatusCode::BAD_REQUEST,

            Error::InvalidCredentials | Error::MissingToken | Error::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }

            Error::Forbidden { .. } => StatusCode::FORBIDDEN,

            Error::Config { .. } | Error::Database(_) | Error::Io(_) | Error::EnvVar(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "request failed");
        }

        (status, self.to_string()).into_response()
    }
}

/// Assembles the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/accounts/login", post(accounts::login))
        .route("/accounts", get(accounts::list).post(accounts::register))
        .route("/accounts/:username", delete(accounts::remove))
        .route("/residents", get(residents::list).post(residents::create))
        .route(
            "/residents/:id",
            get(residents::get_one)
                .put(residents::update)
                .delete(residents::remove),
        )
        .route(
            "/households",
            get(households::list).post(households::create),
        )
        .route(
            "/households/:id",
            get(households::get_one)
                .put(households::update)
                .delete(households::remove),
        )
        .route(
            "/households/:id/members",
            get(households::members).post(households::add_member),
        )
        .route(
            "/households/:id/members/:resident_id",
            delete(households::remove_member),
        )
        .route("/vehicles", get(vehicles::list).post(vehicles::create))
        .route(
            "/vehicles/:id",
            get(vehicles::get_one)
                .put(vehicles::update)
                .delete(vehicles::remove),
        )
        .route(
            "/fee-collections",
            get(collections::list).post(collections::create),
        )
        .route(
            "/fee-collections/:id",
            get(collections::get_one)
                .put(collections::update)
                .delete(collections::remove),
        )
        .route("/fees", get(fees::list).post(fees::create))
        .route(
            "/fees/:id",
            get(fees::get_one).put(fees::update).delete(fees::remove),
        )
        .route("/fees/:id/disburse", post(fees::disburse))
        .route("/payments", get(payments::list).post(payments::create))
        .route(
            "/payments/:id",
            get(payments::get_one)
                .put(payments::update)
                .delete(payments::remove),
        )
        .with_state(state)
}

/// Binds the listener and serves the API until a shutdown signal arrives.
pub async fn serve(config: &AppConfig, rates: FeeRates, db: DatabaseConnection) -> Result<()> {
    let state = AppState {
        db,
        rates,
        jwt_secret: config.jwt_secret.clone(),
    };

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    // A disbursement over many households runs within one request; bound it
    // so a stuck storage layer cannot pin the connection forever. Partial
    // completion stands, already-created payments remain valid.
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(cors)
            .layer(TimeoutLayer::new(Duration::from_secs(30))),
    );

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
