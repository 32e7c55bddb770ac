//! Page handlers
//!
//! Every page answers with a [`Page`] descriptor. Admission has already been
//! decided by the route guard middleware.

use super::types::{Page, UserInfo};
use crate::auth::{CurrentUser, OptionalUser};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect},
};
use crm_auth::{Identity, View};
use crm_views::{
    dashboard::{dashboard, DashboardData},
    finance::{finance_view, FinanceView, TransactionFilter},
    inventory::{inventory_view, InventoryView, ProductFilter},
    settings::{NotificationPreferences, ProfileUpdate},
};
use serde::Serialize;

fn page<T: Serialize>(
    state: &AppState,
    view: View,
    identity: Option<Identity>,
    data: T,
) -> Page<T> {
    let path = view.path().unwrap_or_default();
    Page {
        view,
        title: view.title(),
        navigation: state.guard.navigation(identity.as_ref(), path),
        user: identity.map(UserInfo::from),
        data,
    }
}

pub async fn root() -> Redirect {
    Redirect::temporary("/dashboard")
}

pub async fn login_page(
    State(state): State<AppState>,
    OptionalUser(identity): OptionalUser,
) -> Json<Page<()>> {
    Json(page(&state, View::Login, identity, ()))
}

pub async fn reset_password_page(
    State(state): State<AppState>,
    OptionalUser(identity): OptionalUser,
) -> Json<Page<()>> {
    Json(page(&state, View::ResetPassword, identity, ()))
}

pub async fn dashboard_page(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Json<Page<DashboardData>> {
    Json(page(&state, View::Dashboard, Some(identity), dashboard()))
}

pub async fn finance_page(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Query(filter): Query<TransactionFilter>,
) -> Json<Page<FinanceView>> {
    let today = chrono::Local::now().date_naive();
    let data = finance_view(&filter, today);
    Json(page(&state, View::Finance, Some(identity), data))
}

pub async fn inventory_page(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Query(filter): Query<ProductFilter>,
) -> Json<Page<InventoryView>> {
    let data = inventory_view(&filter);
    Json(page(&state, View::Inventory, Some(identity), data))
}

#[derive(Debug, Serialize)]
pub struct SettingsData {
    pub profile: ProfileUpdate,
    pub notifications: NotificationPreferences,
}

pub async fn settings_page(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Json<Page<SettingsData>> {
    let data = SettingsData {
        profile: ProfileUpdate {
            name: identity.name.clone(),
            email: identity.email.clone(),
        },
        notifications: NotificationPreferences::default(),
    };
    Json(page(&state, View::Settings, Some(identity), data))
}

/// Catch-all page
pub async fn not_found(
    State(state): State<AppState>,
    OptionalUser(identity): OptionalUser,
) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(page(&state, View::NotFound, identity, ())),
    )
}
