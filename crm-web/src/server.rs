//! CRM Web Server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebError, WebResult};
use axum::serve;
use crm_core::{CrmConfig, GuardPolicy, StorageBackend};
use tokio::net::TcpListener;
use tracing::{error, info};

pub struct CrmServer {
    config: CrmConfig,
    state: AppState,
}

impl CrmServer {
    /// Create a server, opening storage and restoring any remembered session
    pub async fn new(config: CrmConfig) -> WebResult<Self> {
        let state = AppState::new(config.clone()).await?;

        Ok(Self { config, state })
    }

    /// Start the web server
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.server.address();

        info!("Starting CRM web server");
        info!("Server address: http://{}", address);
        info!("Development mode: {}", self.config.server.dev_mode);

        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;

        info!("Server listening on http://{}", address);

        if let Err(e) = serve(listener, app).await {
            error!("Server error: {}", e);
            return Err(WebError::Server(e));
        }

        Ok(())
    }

    pub fn config(&self) -> &CrmConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Builder for CrmServer
pub struct CrmServerBuilder {
    config: CrmConfig,
}

impl CrmServerBuilder {
    pub fn new() -> Self {
        Self {
            config: CrmConfig::default(),
        }
    }

    /// Start from a loaded configuration
    pub fn with_config(config: CrmConfig) -> Self {
        Self { config }
    }

    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.server.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn dev_mode(mut self, dev_mode: bool) -> Self {
        self.config.server.dev_mode = dev_mode;
        self
    }

    pub fn guard_policy(mut self, policy: GuardPolicy) -> Self {
        self.config.auth.guard_policy = policy;
        self
    }

    pub fn storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage.backend = backend;
        self
    }

    pub fn simulated_latency_ms(mut self, latency_ms: u64) -> Self {
        self.config.auth.simulated_latency_ms = latency_ms;
        self
    }

    pub async fn build(self) -> WebResult<CrmServer> {
        CrmServer::new(self.config).await
    }
}

impl Default for CrmServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
