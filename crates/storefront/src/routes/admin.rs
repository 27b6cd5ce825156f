//! Admin panel handlers.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::services::admin::Dashboard;
use crate::services::auth::{AdminSession, AuthError};
use crate::state::AppState;

/// Access code query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct AccessCodeQuery {
    pub code: Option<String>,
}

/// Admin login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Sign in as the demo admin.
#[instrument(skip(state, query, req))]
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<AccessCodeQuery>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AdminSession>> {
    let session = state
        .admin_gate()
        .login(query.code.as_deref(), &req.email, &req.password)?;

    set_sentry_user(session.email.as_str());
    *state.admin_session().lock().await = Some(session.clone());
    Ok(Json(session))
}

/// Sign out.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    if state.admin_session().lock().await.take().is_some() {
        info!("Admin signed out");
    }
    clear_sentry_user();
    StatusCode::NO_CONTENT
}

/// Dashboard statistics and the product table.
#[instrument(skip(state))]
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>> {
    if state.admin_session().lock().await.is_none() {
        return Err(AuthError::NotSignedIn.into());
    }
    Ok(Json(Dashboard::for_catalog(state.catalog())))
}
