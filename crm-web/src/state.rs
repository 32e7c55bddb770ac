//! Application state shared by every handler

use crate::WebResult;
use crm_auth::{
    FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, RouteGuard, SessionStore,
    StaticRegistry,
};
use crm_core::{CrmConfig, StorageBackend};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CrmConfig>,
    /// The instance's single session
    pub session: Arc<SessionStore>,
    pub guard: RouteGuard,
}

impl AppState {
    /// Build state from configuration, opening the configured storage backend
    pub async fn new(config: CrmConfig) -> WebResult<Self> {
        config.validate()?;

        let storage: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::File => {
                Arc::new(FileKeyValueStore::new(config.storage.resolved_data_dir())?)
            }
            StorageBackend::Memory => Arc::new(MemoryKeyValueStore::new()),
        };

        Ok(Self::with_storage(config, storage).await)
    }

    /// Build state over an existing store and restore any remembered session
    pub async fn with_storage(config: CrmConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let latency = config.auth.simulated_latency();
        let provider = Arc::new(StaticRegistry::new(latency));
        let session = Arc::new(SessionStore::new(provider, storage, latency));

        if let Some(identity) = session.restore().await {
            info!(email = %identity.email, "Resuming remembered session");
        }

        let guard = RouteGuard::new(config.auth.guard_policy);
        info!(policy = %guard.policy(), "Route guard ready");

        Self {
            config: Arc::new(config),
            session,
            guard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core::AuthConfig;
    use tempfile::TempDir;

    fn file_config(dir: &TempDir) -> CrmConfig {
        let mut config = CrmConfig {
            auth: AuthConfig::instant(),
            ..Default::default()
        };
        config.storage.data_dir = dir.path().to_string_lossy().into_owned();
        config
    }

    #[tokio::test]
    async fn test_file_backend_restores_across_instances() {
        let dir = TempDir::new().unwrap();

        let first = AppState::new(file_config(&dir)).await.unwrap();
        first
            .session
            .login("admin@example.com", "admin123", true)
            .await
            .unwrap();
        drop(first);

        let second = AppState::new(file_config(&dir)).await.unwrap();
        let identity = second.session.current().await.unwrap();
        assert_eq!(identity.email, "admin@example.com");
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let mut config = CrmConfig::default();
        config.server.port = 0;
        assert!(AppState::new(config).await.is_err());
    }
}
