//! Settings endpoints
//!
//! Saves go through the session store's serialised path so they carry the
//! same simulated latency as other backend calls.

use super::types::MessageResponse;
use crate::auth::{ApiError, CurrentUser};
use crate::AppState;
use axum::{extract::State, response::Json};
use crm_views::settings::{
    NotificationPreferences, ProfileUpdate, NOTIFICATIONS_SAVED, PASSWORD_RESET_SENT,
    PROFILE_SAVED,
};
use tracing::{info, warn};

pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<MessageResponse>, ApiError> {
    update.validate()?;

    state
        .session
        .submit("profile_update", || {
            info!(id = %identity.id, name = %update.name, "Profile update acknowledged");
        })
        .await;

    Ok(Json(MessageResponse::ok(PROFILE_SAVED)))
}

pub async fn update_notifications(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(preferences): Json<NotificationPreferences>,
) -> Json<MessageResponse> {
    state
        .session
        .submit("notification_update", || {
            info!(
                id = %identity.id,
                preferences = ?preferences,
                "Notification preferences acknowledged"
            );
        })
        .await;

    Json(MessageResponse::ok(NOTIFICATIONS_SAVED))
}

/// Password-reset shortcut for the signed-in identity
///
/// A restored session is never re-checked against the registry, so its email
/// may be unknown there. The shortcut still confirms, as it always does.
pub async fn request_password_reset(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Json<MessageResponse> {
    if let Err(error) = state.session.reset_password(&identity.email).await {
        warn!(email = %identity.email, error = %error, "Password reset target not registered");
    }
    Json(MessageResponse::ok(PASSWORD_RESET_SENT))
}
