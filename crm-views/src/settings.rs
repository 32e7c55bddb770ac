//! Settings forms
//!
//! Validation and confirmation messages only; identities are immutable, so a
//! valid profile update is acknowledged without being stored.

use crm_core::{validation_error, CrmResult};
use serde::{Deserialize, Serialize};

pub const PROFILE_SAVED: &str = "Perfil atualizado com sucesso!";
pub const NOTIFICATIONS_SAVED: &str = "Preferências de notificação atualizadas!";
pub const PASSWORD_RESET_SENT: &str = "Link de redefinição de senha enviado para seu email!";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

impl ProfileUpdate {
    pub fn validate(&self) -> CrmResult<()> {
        if self.name.chars().count() < 2 {
            return Err(validation_error!(
                "Nome deve ter pelo menos 2 caracteres.",
                "name",
                "settings"
            ));
        }

        if !is_valid_email(&self.email) {
            return Err(validation_error!("Email inválido.", "email", "settings"));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationPreferences {
    pub email_notifications: bool,
    pub stock_alerts: bool,
    pub financial_alerts: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            stock_alerts: true,
            financial_alerts: true,
        }
    }
}

/// Syntactic check: one `@`, a non-empty local part and a dotted domain
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}
