//! Session Store
//!
//! Owns the single current identity of a running instance. A session either
//! holds exactly one identity or is empty.
//!
//! Latency-bearing operations are serialised per store: the operation lock is
//! held across the provider round trip and the state transition, so a second
//! call waits for the first instead of racing it.

use crate::error::AuthError;
use crate::identity::Identity;
use crate::registry::IdentityProvider;
use crate::storage::KeyValueStore;
use crm_core::performance::measure_async;
use crm_core::{log_operation_error, log_operation_start, log_operation_success};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Durable storage key holding the remembered identity
pub const SESSION_KEY: &str = "crm_user";

pub struct SessionStore {
    provider: Arc<dyn IdentityProvider>,
    storage: Arc<dyn KeyValueStore>,
    current: RwLock<Option<Identity>>,
    op_lock: Mutex<()>,
    latency: Duration,
}

impl SessionStore {
    /// Create an empty (unauthenticated) session store
    ///
    /// `latency` applies to [`SessionStore::submit`]; provider calls carry
    /// their own latency.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        storage: Arc<dyn KeyValueStore>,
        latency: Duration,
    ) -> Self {
        Self {
            provider,
            storage,
            current: RwLock::new(None),
            op_lock: Mutex::new(()),
            latency,
        }
    }

    /// Current identity, if authenticated
    pub async fn current(&self) -> Option<Identity> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Authenticate against the provider and start a session
    ///
    /// With `remember` the identity is also written to durable storage;
    /// without it any previously remembered identity is dropped so that a
    /// restart comes back unauthenticated.
    pub async fn login(
        &self,
        email: &str,
        secret: &str,
        remember: bool,
    ) -> Result<Identity, AuthError> {
        let _guard = self.op_lock.lock().await;
        log_operation_start!("login", email = email, remember = remember);

        let identity = measure_async("login", self.provider.authenticate(email, secret))
            .await
            .ok_or(AuthError::InvalidCredentials)
            .inspect_err(|e| {
                log_operation_error!("login", e, email = email);
            })?;

        *self.current.write().await = Some(identity.clone());

        if remember {
            self.persist(&identity);
        } else {
            self.forget();
        }

        log_operation_success!("login", email = email, role = %identity.role);
        Ok(identity)
    }

    /// End the session and drop the remembered identity; always succeeds
    pub async fn logout(&self) {
        let _guard = self.op_lock.lock().await;

        let previous = self.current.write().await.take();
        self.forget();

        match previous {
            Some(identity) => info!(email = %identity.email, "Logged out"),
            None => debug!("Logout without an active session"),
        }
    }

    /// Check that a password-reset target exists
    ///
    /// No message is dispatched and nothing changes; success is only signalled.
    pub async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        let _guard = self.op_lock.lock().await;
        log_operation_start!("reset_password", email = email);

        match self.provider.find_by_email(email).await {
            Some(_) => {
                log_operation_success!("reset_password", email = email);
                Ok(())
            }
            None => {
                let error = AuthError::UnknownEmail {
                    email: email.to_string(),
                };
                log_operation_error!("reset_password", error, email = email);
                Err(error)
            }
        }
    }

    /// Rehydrate the session from durable storage without re-validating it
    ///
    /// Missing, unreadable or malformed entries leave the session empty.
    pub async fn restore(&self) -> Option<Identity> {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No remembered session");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read remembered session");
                return None;
            }
        };

        let identity = match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "Ignoring malformed remembered session");
                return None;
            }
        };

        *self.current.write().await = Some(identity.clone());
        info!(email = %identity.email, role = %identity.role, "Restored remembered session");
        Some(identity)
    }

    /// Run a simulated remote write (profile or preference save) on the
    /// serialised path
    pub async fn submit<T>(&self, operation: &str, apply: impl FnOnce() -> T) -> T {
        let _guard = self.op_lock.lock().await;
        debug!(operation = operation, "Submitting");

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        apply()
    }

    fn persist(&self, identity: &Identity) {
        let result = serde_json::to_string(identity)
            .map_err(crm_core::CrmError::from)
            .and_then(|json| self.storage.set(SESSION_KEY, &json));

        if let Err(e) = result {
            warn!(error = %e, "Failed to remember session; it will not survive a restart");
        }
    }

    fn forget(&self) {
        if let Err(e) = self.storage.remove(SESSION_KEY) {
            warn!(error = %e, "Failed to remove remembered session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;
    use crate::registry::StaticRegistry;
    use crate::storage::MemoryKeyValueStore;
    use crm_core::{storage_error, CrmResult};
    use serde_json::json;

    const ACCOUNTS: [(&str, &str, &str, Role); 3] = [
        ("admin@example.com", "admin123", "1", Role::Admin),
        ("finance@example.com", "finance123", "2", Role::Finance),
        ("inventory@example.com", "inventory123", "3", Role::Inventory),
    ];

    fn store_with(storage: &MemoryKeyValueStore) -> SessionStore {
        SessionStore::new(
            Arc::new(StaticRegistry::instant()),
            Arc::new(storage.clone()),
            Duration::ZERO,
        )
    }

    /// Store whose every call fails, as a full disk or revoked permissions would
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> CrmResult<Option<String>> {
            Err(storage_error!("read failed", "storage"))
        }

        fn set(&self, _key: &str, _value: &str) -> CrmResult<()> {
            Err(storage_error!("write failed", "storage"))
        }

        fn remove(&self, _key: &str) -> CrmResult<()> {
            Err(storage_error!("delete failed", "storage"))
        }
    }

    fn stored_json(storage: &MemoryKeyValueStore) -> Option<serde_json::Value> {
        storage
            .get(SESSION_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[tokio::test]
    async fn test_every_registered_account_can_log_in() {
        for (email, secret, id, role) in ACCOUNTS {
            let storage = MemoryKeyValueStore::new();
            let store = store_with(&storage);

            let identity = store.login(email, secret, false).await.unwrap();

            assert_eq!(identity.id, id);
            assert_eq!(identity.email, email);
            assert_eq!(identity.role, role);
            assert_eq!(store.current().await, Some(identity));
        }
    }

    #[tokio::test]
    async fn test_remembered_login_writes_identity_without_secret() {
        let storage = MemoryKeyValueStore::new();
        let store = store_with(&storage);

        store
            .login("admin@example.com", "admin123", true)
            .await
            .unwrap();

        assert_eq!(
            stored_json(&storage),
            Some(json!({
                "id": "1",
                "name": "Admin User",
                "email": "admin@example.com",
                "role": "admin"
            }))
        );
    }

    #[tokio::test]
    async fn test_wrong_secret_leaves_session_empty() {
        let storage = MemoryKeyValueStore::new();
        let store = store_with(&storage);

        let result = store.login("admin@example.com", "wrong", false).await;

        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert!(!store.is_authenticated().await);
        assert_eq!(stored_json(&storage), None);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_prior_session() {
        let storage = MemoryKeyValueStore::new();
        let store = store_with(&storage);
        store
            .login("finance@example.com", "finance123", true)
            .await
            .unwrap();

        let result = store.login("admin@example.com", "finance123", true).await;

        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert_eq!(store.current().await.unwrap().role, Role::Finance);
        assert_eq!(stored_json(&storage).unwrap()["role"], "finance");
    }

    #[tokio::test]
    async fn test_logout_clears_memory_and_storage() {
        let storage = MemoryKeyValueStore::new();
        let store = store_with(&storage);
        store
            .login("admin@example.com", "admin123", true)
            .await
            .unwrap();

        store.logout().await;

        assert_eq!(store.current().await, None);
        assert_eq!(storage.get(SESSION_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_when_unauthenticated() {
        let storage = MemoryKeyValueStore::new();
        storage.set(SESSION_KEY, "leftover").unwrap();
        let store = store_with(&storage);

        store.logout().await;

        assert!(!store.is_authenticated().await);
        assert_eq!(storage.get(SESSION_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_remembered_login_survives_restart() {
        let storage = MemoryKeyValueStore::new();
        let original = store_with(&storage)
            .login("inventory@example.com", "inventory123", true)
            .await
            .unwrap();

        let restarted = store_with(&storage);
        let restored = restarted.restore().await;

        assert_eq!(restored, Some(original.clone()));
        assert_eq!(restarted.current().await, Some(original));
    }

    #[tokio::test]
    async fn test_unremembered_login_does_not_survive_restart() {
        let storage = MemoryKeyValueStore::new();
        store_with(&storage)
            .login("finance@example.com", "finance123", false)
            .await
            .unwrap();

        let restarted = store_with(&storage);
        assert_eq!(restarted.restore().await, None);
        assert!(!restarted.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_unremembered_login_drops_stale_remembered_identity() {
        let storage = MemoryKeyValueStore::new();
        let store = store_with(&storage);
        store
            .login("admin@example.com", "admin123", true)
            .await
            .unwrap();
        store
            .login("finance@example.com", "finance123", false)
            .await
            .unwrap();

        assert_eq!(store_with(&storage).restore().await, None);
    }

    #[tokio::test]
    async fn test_restore_treats_malformed_entry_as_absent() {
        for raw in [
            "not json",
            "{}",
            r#"{"id":"1","name":"A","email":"a","role":"root"}"#,
        ] {
            let storage = MemoryKeyValueStore::new();
            storage.set(SESSION_KEY, raw).unwrap();
            let store = store_with(&storage);

            assert_eq!(store.restore().await, None, "entry {:?}", raw);
            assert!(!store.is_authenticated().await);
        }
    }

    #[tokio::test]
    async fn test_restore_does_not_revalidate() {
        let storage = MemoryKeyValueStore::new();
        storage
            .set(
                SESSION_KEY,
                r#"{"id":"42","name":"Ghost","email":"ghost@example.com","role":"finance"}"#,
            )
            .unwrap();

        let restored = store_with(&storage).restore().await.unwrap();
        assert_eq!(restored.id, "42");
    }

    #[tokio::test]
    async fn test_storage_failures_are_not_fatal() {
        let store = SessionStore::new(
            Arc::new(StaticRegistry::instant()),
            Arc::new(BrokenStore),
            Duration::ZERO,
        );

        assert_eq!(store.restore().await, None);
        assert!(!store.is_authenticated().await);

        let identity = store
            .login("admin@example.com", "admin123", true)
            .await
            .unwrap();
        assert_eq!(identity.role, Role::Admin);
        assert!(store.is_authenticated().await);

        store.logout().await;
        assert_eq!(store.current().await, None);
    }

    #[tokio::test]
    async fn test_reset_password() {
        let storage = MemoryKeyValueStore::new();
        let store = store_with(&storage);

        assert!(store.reset_password("admin@example.com").await.is_ok());
        assert_eq!(
            store.reset_password("nope@x.com").await,
            Err(AuthError::UnknownEmail {
                email: "nope@x.com".to_string()
            })
        );
        assert!(!store.is_authenticated().await);
        assert_eq!(storage.get(SESSION_KEY).unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_logins_are_serialised() {
        let storage = MemoryKeyValueStore::new();
        let store = Arc::new(SessionStore::new(
            Arc::new(StaticRegistry::new(Duration::from_millis(1000))),
            Arc::new(storage.clone()),
            Duration::ZERO,
        ));

        let first = {
            let store = store.clone();
            tokio::spawn(async move {
                store.login("admin@example.com", "admin123", true).await
            })
        };
        tokio::task::yield_now().await;
        let second = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .login("finance@example.com", "finance123", true)
                    .await
            })
        };

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        // the later call wins in both memory and storage
        assert_eq!(store.current().await.unwrap().role, Role::Finance);
        assert_eq!(stored_json(&storage).unwrap()["role"], "finance");
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_applies_latency() {
        let storage = MemoryKeyValueStore::new();
        let store = SessionStore::new(
            Arc::new(StaticRegistry::instant()),
            Arc::new(storage),
            Duration::from_millis(1000),
        );
        let start = tokio::time::Instant::now();

        let value = store.submit("save_profile", || 7).await;

        assert_eq!(value, 7);
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }
}
