//! Request and response types used by the handlers

use crm_auth::{Identity, NavItem, View};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NavigationQuery {
    pub path: Option<String>,
}

/// Identity plus its display label
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub identity: Identity,
    pub role_label: &'static str,
}

impl From<Identity> for UserInfo {
    fn from(identity: Identity) -> Self {
        let role_label = identity.role.label();
        Self {
            identity,
            role_label,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// View descriptor: which page, who is looking, the menu they get and the
/// page's data
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub view: View,
    pub title: &'static str,
    pub user: Option<UserInfo>,
    pub navigation: Vec<NavItem>,
    pub data: T,
}
