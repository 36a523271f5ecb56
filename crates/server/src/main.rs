#![forbid(unsafe_code)]

//! Roadmap service daemon entry point.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roadmap_provider::{OpenAiGenerator, ProviderConfig};
use roadmap_server::{config::ServerConfig, http, service::RoadmapService, store::SqliteStore};

#[derive(Parser, Debug)]
#[command(name = "roadmap-server", version, about = "AI adoption roadmap service")]
struct Args {
    /// Listen address, e.g. 127.0.0.1:8080
    #[arg(long, default_value = "127.0.0.1:8080")]
    listen: SocketAddr,

    /// Bound on a single provider call, in seconds.
    #[arg(long, default_value_t = 60)]
    provider_timeout_secs: u64,

    /// Log level (env-filter syntax).
    #[arg(long, default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(args.log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fatal before the listener binds if anything required is missing.
    let config = ServerConfig::from_env()?;

    let store = SqliteStore::open(Path::new(config.database_path()))?;
    let generator = OpenAiGenerator::new(ProviderConfig {
        api_key: config.api_key.clone(),
        base_url: config.provider_base_url.clone(),
        model: config.provider_model.clone(),
        timeout: Duration::from_secs(args.provider_timeout_secs),
    });

    let svc = Arc::new(RoadmapService::new(Arc::new(store), Arc::new(generator)));
    let app = http::router(svc, config.session_secret.clone());

    tracing::info!(listen = %args.listen, model = %config.provider_model, "roadmap server starting");
    axum::serve(tokio::net::TcpListener::bind(args.listen).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown requested");
}
