//! Murmur chat service binary
//!
//! Connects to the visualizer, assembles the actor system, and runs the
//! demo chat topology until interrupted. A missing visualizer is not
//! fatal: events fall back to the null sink and the chat keeps running.

use anyhow::Context as _;
use clap::Parser;
use murmur_chat::{ChatConfig, Guardian};
use murmur_core::{init_telemetry, TelemetryConfig};
use murmur_runtime::ActorSystem;
use murmur_vis::{EventSink, NullSink, TcpSink, VisHandle};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "murmur-chat", about = "Observable actor-based chat service", version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Visualizer endpoint, host:port (overrides config)
    #[arg(long)]
    visualizer: Option<String>,

    /// Number of demo clients (overrides config)
    #[arg(long)]
    clients: Option<usize>,

    /// Run without a visualizer connection
    #[arg(long)]
    no_visualizer: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _telemetry = init_telemetry(TelemetryConfig::from_env())?;

    let mut config = match &args.config {
        Some(path) => ChatConfig::load(path)?,
        None => ChatConfig::default(),
    };
    if let Some(endpoint) = args.visualizer {
        config.visualizer.endpoint = endpoint;
    }
    if let Some(count) = args.clients {
        config.clients.count = count;
    }
    if args.no_visualizer {
        config.visualizer.enabled = false;
    }
    config.validate()?;

    let sink: Arc<dyn EventSink> = if config.visualizer.enabled {
        match TcpSink::connect(&config.visualizer.endpoint).await {
            Ok(sink) => Arc::new(sink),
            Err(e) => {
                warn!(error = %e, "Visualizer unreachable, continuing without events");
                Arc::new(NullSink::new())
            }
        }
    } else {
        Arc::new(NullSink::new())
    };

    let vis = Arc::new(VisHandle::new(sink));
    let system = ActorSystem::new(vis.clone());
    let guardian = system.spawn("guardian", Guardian::new(vis, config))?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("Shutting down");

    system.stop(guardian.id());
    system.wait_idle().await;
    Ok(())
}
