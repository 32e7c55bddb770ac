//! Route guard middleware

use crate::auth::{ApiError, AuthRedirect, Forbidden};
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use crm_auth::{Decision, View};
use tracing::debug;

/// Admit a page request by its path, redirecting or refusing as the guard decides
///
/// An admitted identity is placed in the request extensions, where
/// [`CurrentUser`](crate::auth::CurrentUser) picks it up.
pub async fn route_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let view = View::from_path(request.uri().path());
    let identity = state.session.current().await;

    match state.guard.admit(identity.as_ref(), view) {
        Decision::Allow => {
            if let Some(identity) = identity {
                request.extensions_mut().insert(identity);
            }
            next.run(request).await
        }
        Decision::Redirect(View::Login) => {
            debug!(view = %view, "No session, redirecting to login");
            AuthRedirect.into_response()
        }
        Decision::Redirect(target) => {
            Redirect::temporary(target.path().unwrap_or("/")).into_response()
        }
        Decision::Forbidden => Forbidden {
            view,
            role: identity.map(|i| i.role),
        }
        .into_response(),
    }
}

/// Settings API calls are admitted like the settings view, answering with
/// JSON instead of a redirect
pub async fn settings_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = state.session.current().await;

    match state.guard.admit(identity.as_ref(), View::Settings) {
        Decision::Allow => {
            if let Some(identity) = identity {
                request.extensions_mut().insert(identity);
            }
            next.run(request).await
        }
        Decision::Forbidden => Forbidden {
            view: View::Settings,
            role: identity.map(|i| i.role),
        }
        .into_response(),
        Decision::Redirect(_) => ApiError::Unauthenticated.into_response(),
    }
}
