//! CRM Web Server
//!
//! Serves the CRM dashboard's views and JSON API.

use anyhow::Context;
use clap::Parser;
use crm_core::{init_logging, CrmConfig, GuardPolicy};
use crm_web::CrmServerBuilder;
use std::path::PathBuf;
use tracing::info;

/// CRM dashboard web server
#[derive(Parser)]
#[command(name = "crm-web")]
#[command(about = "Session-guarded CRM dashboard server")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable development mode
    #[arg(long)]
    dev: bool,

    /// Route guard policy (session_only, role_scoped)
    #[arg(long)]
    guard_policy: Option<GuardPolicy>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    /// Resolve configuration: file, then environment, then flags
    fn load_config(&self) -> anyhow::Result<CrmConfig> {
        let mut config = match &self.config {
            Some(path) => CrmConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => CrmConfig::default(),
        };

        config.apply_env();

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.dev {
            config.server.dev_mode = true;
        }
        if let Some(policy) = self.guard_policy {
            config.auth.guard_policy = policy;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = args.load_config()?;

    init_logging(&config.logging).map_err(|e| anyhow::anyhow!("logging setup failed: {}", e))?;

    info!(
        address = %config.server.address(),
        guard_policy = %config.auth.guard_policy,
        "Building server"
    );

    let server = CrmServerBuilder::with_config(config).build().await?;
    server.start().await?;

    info!("Server shut down");
    Ok(())
}
