//! Covidash Server
//!
//! Run with: cargo run --bin covidash -- --config config.toml
//!
//! Without `--config` the usual search path is tried (see
//! [`covidash::config::Config::load_default`]), then `COVIDASH_*`
//! environment variables are applied. `RUST_LOG` overrides the log level.

use anyhow::Context;
use clap::Parser;
use covidash::api::{serve, AppState};
use covidash::config::Config;
use covidash::dataset::Dataset;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "covidash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "COVID-19 dashboard server")]
struct Args {
    /// Config file (default: search standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    config.logging.init_tracing();

    tracing::info!("Starting Covidash server v{}", env!("CARGO_PKG_VERSION"));

    // Any unreadable table is fatal
    let paths = config.data.paths();
    tracing::info!(
        covid = %paths.covid_csv.display(),
        usa = %paths.usa_csv.display(),
        state_codes = %paths.state_codes_csv.display(),
        "Loading dataset"
    );
    let dataset = tokio::task::spawn_blocking(move || Dataset::load(&paths))
        .await
        .context("dataset loader task panicked")?
        .context("failed to load dataset")?;

    let api_config = config.api.clone();
    let state = AppState::new(Arc::new(dataset), config.dashboard, config.api);

    serve(state, &api_config).await?;

    tracing::info!("Covidash server stopped");
    Ok(())
}
