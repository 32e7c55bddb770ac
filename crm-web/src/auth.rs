//! Session extractors and error responses

use crate::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
};
use crm_auth::{AuthError, Identity, Role, View};
use crm_core::CrmError;
use serde_json::json;
use std::convert::Infallible;
use tracing::debug;

/// Identity of the active session; rejects with 401 when there is none
///
/// Behind the guard middleware this is the identity the guard admitted.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(CurrentUser(identity.clone()));
        }

        let app_state = AppState::from_ref(state);
        match app_state.session.current().await {
            Some(identity) => Ok(CurrentUser(identity)),
            None => {
                debug!("Request without an active session");
                Err(ApiError::Unauthenticated)
            }
        }
    }
}

/// Identity of the active session, if any
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<Identity>);

impl<S> FromRequestParts<S> for OptionalUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        Ok(OptionalUser(app_state.session.current().await))
    }
}

/// Redirect to the login view
#[derive(Debug)]
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::temporary("/login").into_response()
    }
}

/// Authenticated, but the role may not open this view
#[derive(Debug)]
pub struct Forbidden {
    pub view: View,
    pub role: Option<Role>,
}

impl IntoResponse for Forbidden {
    fn into_response(self) -> Response {
        let message = match self.role {
            Some(role) => format!("Role '{}' may not open {}", role, self.view.title()),
            None => format!("Access to {} denied", self.view.title()),
        };

        (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "forbidden",
                "message": message,
                "view": self.view,
                "allowed_roles": self.view.allowed_roles(),
            })),
        )
            .into_response()
    }
}

/// Errors returned by API handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Domain(#[from] CrmError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Auth(error) => {
                let status = match error {
                    AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                    AuthError::UnknownEmail { .. } => StatusCode::NOT_FOUND,
                };
                (
                    status,
                    json!({ "error": error.code(), "message": error.user_message() }),
                )
            }
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "unauthenticated", "message": self.to_string() }),
            ),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "bad_request", "message": message }),
            ),
            ApiError::Domain(error) => {
                error.log();
                match error {
                    CrmError::Validation { message, field, .. } => (
                        StatusCode::BAD_REQUEST,
                        json!({ "error": "validation_error", "message": message, "field": field }),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({
                            "error": "internal_error",
                            "message": "Internal server error",
                            "error_id": error.context().map(|c| c.error_id.clone()),
                        }),
                    ),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
