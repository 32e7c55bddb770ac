//! User Identity
//!
//! An identity is issued once by the registry and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Role classification; the only authorization attribute of an identity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Finance,
    Inventory,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Finance, Role::Inventory];

    /// Label shown under the user's name in the sidebar
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Finance => "Financeiro",
            Role::Inventory => "Estoque",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Finance => write!(f, "finance"),
            Role::Inventory => write!(f, "inventory"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "finance" => Ok(Role::Finance),
            "inventory" => Ok(Role::Inventory),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Authenticated user's profile; never carries the secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// Get user display string
    pub fn display_string(&self) -> String {
        format!("{} ({})", self.name, self.role.label())
    }
}
