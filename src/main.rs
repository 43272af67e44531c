//! Cheese Chase - Agent Server Entry Point
//!
//! Loads configuration, sets up logging and the async runtime, and serves
//! `POST /decide` until interrupted.

use cheese_chase::agent::{DecisionService, StrategyKind};
use cheese_chase::core::config::ChaseConfig;
use cheese_chase::core::error::Result;
use cheese_chase::server::DecisionServer;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Decision agent for the mice-and-cheese grid chase
#[derive(Parser, Debug)]
#[command(name = "cheese-chase")]
#[command(about = "Serve mouse decisions for the grid chase over HTTP")]
struct Args {
    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Interface to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides config)
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// Decision strategy (overrides config)
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Base random seed for deterministic runs (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "cheese_chase=info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &args.config {
        Some(path) => ChaseConfig::load(path)?,
        None => ChaseConfig::default(),
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(strategy) = args.strategy {
        config.agent.strategy = strategy;
    }
    if args.seed.is_some() {
        config.agent.seed = args.seed;
    }
    config.validate()?;

    let seed = config.agent.seed.unwrap_or_else(rand::random);
    tracing::info!(
        "Cheese Chase starting: strategy={} seed={}",
        config.agent.strategy,
        seed
    );

    let service = Arc::new(DecisionService::from_config(&config, seed));
    let rt = Runtime::new()?;

    rt.block_on(async {
        let server = DecisionServer::bind(
            &config.bind_address(),
            service,
            config.server.max_body_bytes,
        )
        .await?
        .with_idle_timeout(config.idle_timeout());

        server
            .run_until(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("Ctrl-C handler failed: {}", e);
                    std::future::pending::<()>().await;
                }
            })
            .await
    })
}
