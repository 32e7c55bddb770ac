//! Session endpoints: login, logout, password reset and the current identity

use super::types::{
    LoginRequest, MessageResponse, NavigationQuery, ResetPasswordRequest, UserInfo,
};
use crate::auth::{ApiError, CurrentUser, OptionalUser};
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::Json,
};
use crm_auth::{Identity, NavItem};
use tracing::info;

/// Authenticate and start the session
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Identity>, ApiError> {
    info!(email = %request.email, remember = request.remember, "Login attempt");

    let identity = state
        .session
        .login(&request.email, &request.password, request.remember)
        .await?;

    Ok(Json(identity))
}

pub async fn logout(State(state): State<AppState>) -> Json<MessageResponse> {
    state.session.logout().await;
    Json(MessageResponse::ok("Sessão encerrada"))
}

/// Confirm that a reset target exists
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if request.email.is_empty() {
        return Err(ApiError::BadRequest(
            "Por favor, informe seu e-mail".to_string(),
        ));
    }

    state.session.reset_password(&request.email).await?;

    Ok(Json(MessageResponse::ok(format!(
        "Enviamos instruções para {}",
        request.email
    ))))
}

pub async fn me(CurrentUser(identity): CurrentUser) -> Json<UserInfo> {
    Json(UserInfo::from(identity))
}

/// Menu for the current session, with the entry at `path` marked active
pub async fn navigation(
    State(state): State<AppState>,
    OptionalUser(identity): OptionalUser,
    Query(query): Query<NavigationQuery>,
) -> Json<Vec<NavItem>> {
    let path = query.path.as_deref().unwrap_or("/dashboard");
    Json(state.guard.navigation(identity.as_ref(), path))
}
