//! Credential registry
//!
//! Lookup of identities by credentials. The only shipped provider is a fixed
//! development registry; it is not a security design.

use crate::identity::{Identity, Role};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Source of identities, standing in for a remote authentication backend
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Identity whose email and secret both match exactly
    async fn authenticate(&self, email: &str, secret: &str) -> Option<Identity>;

    /// Identity registered under this email
    async fn find_by_email(&self, email: &str) -> Option<Identity>;
}

struct RegistryEntry {
    identity: Identity,
    secret: &'static str,
}

/// Hardcoded registry of demo accounts
pub struct StaticRegistry {
    entries: Vec<RegistryEntry>,
    latency: Duration,
}

impl StaticRegistry {
    /// Registry with the three demo accounts and the given simulated latency
    pub fn new(latency: Duration) -> Self {
        let entries = vec![
            RegistryEntry {
                identity: Identity::new("1", "Admin User", "admin@example.com", Role::Admin),
                secret: "admin123",
            },
            RegistryEntry {
                identity: Identity::new(
                    "2",
                    "Finance Manager",
                    "finance@example.com",
                    Role::Finance,
                ),
                secret: "finance123",
            },
            RegistryEntry {
                identity: Identity::new(
                    "3",
                    "Inventory Manager",
                    "inventory@example.com",
                    Role::Inventory,
                ),
                secret: "inventory123",
            },
        ];

        Self { entries, latency }
    }

    /// Registry that answers immediately
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// All registered identities, without secrets
    pub fn identities(&self) -> impl Iterator<Item = &Identity> {
        self.entries.iter().map(|entry| &entry.identity)
    }

    async fn simulate_round_trip(&self) {
        if !self.latency.is_zero() {
            debug!(latency_ms = self.latency.as_millis() as u64, "Simulating backend latency");
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for StaticRegistry {
    fn default() -> Self {
        Self::instant()
    }
}

#[async_trait]
impl IdentityProvider for StaticRegistry {
    async fn authenticate(&self, email: &str, secret: &str) -> Option<Identity> {
        self.simulate_round_trip().await;

        self.entries
            .iter()
            .find(|entry| entry.identity.email == email && entry.secret == secret)
            .map(|entry| entry.identity.clone())
    }

    async fn find_by_email(&self, email: &str) -> Option<Identity> {
        self.simulate_round_trip().await;

        self.entries
            .iter()
            .find(|entry| entry.identity.email == email)
            .map(|entry| entry.identity.clone())
    }
}
