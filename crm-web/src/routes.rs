//! Route definitions for the CRM web server

use crate::{handlers, middleware, AppState};
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

/// JSON API, nested under `/api`
pub fn api_routes(state: AppState) -> Router<AppState> {
    let settings: Router<AppState> = Router::new()
        .route("/settings/profile", put(handlers::update_profile))
        .route(
            "/settings/notifications",
            put(handlers::update_notifications),
        )
        .route(
            "/settings/password-reset",
            post(handlers::request_password_reset),
        )
        .route_layer(from_fn_with_state(state, middleware::settings_guard));

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", post(handlers::logout))
        .route("/auth/reset-password", post(handlers::reset_password))
        .route("/auth/me", get(handlers::me))
        .route("/navigation", get(handlers::navigation))
        .merge(settings)
}

/// Page routes, admitted by the route guard
pub fn view_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/login", get(handlers::login_page))
        .route("/reset-password", get(handlers::reset_password_page))
        .route("/dashboard", get(handlers::dashboard_page))
        .route("/finance", get(handlers::finance_page))
        .route("/inventory", get(handlers::inventory_page))
        .route("/settings", get(handlers::settings_page))
        .route_layer(from_fn_with_state(state, middleware::route_guard))
}
