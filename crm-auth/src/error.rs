/// Errors surfaced by session operations
///
/// Both kinds are recoverable at the call site; neither changes session state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("No account registered for {email}")]
    UnknownEmail { email: String },
}

impl AuthError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::UnknownEmail { .. } => "unknown_email",
        }
    }

    /// Message shown to the person at the keyboard
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Credenciais inválidas. Tente novamente.",
            AuthError::UnknownEmail { .. } => "Email não encontrado",
        }
    }
}
