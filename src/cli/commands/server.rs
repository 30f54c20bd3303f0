use anyhow::Context;
use clap::Args;
use tokio::net::TcpListener;
use tracing::info;

use crate::config;
use crate::router::app;
use crate::state::AppState;

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, default_value = "0.0.0.0", help = "Address to bind")]
    pub bind: String,

    #[arg(long, env = "PORT", default_value_t = 3000, help = "Port to listen on")]
    pub port: u16,
}

impl Default for ServeArgs {
    fn default() -> Self {
        let port = std::env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3000);
        Self {
            bind: "0.0.0.0".to_string(),
            port,
        }
    }
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let config = config::config();
    info!("Starting Ballot Plans API in {:?} mode", config.environment);
    info!("General plan update policy: {}", config.plans.general_field_policy);

    let state = AppState::from_config(config).context("failed to configure database")?;

    if config.database.run_migrations {
        if let Some(db) = &state.db {
            db.migrate().await.context("failed to apply migrations")?;
        }
    }

    let bind_addr = format!("{}:{}", args.bind, args.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Ballot Plans API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
