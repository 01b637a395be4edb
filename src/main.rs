//! Front-end development server.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌────────────────────────────────────────────┐
//!                        │                 DEV SERVER                 │
//!                        │                                            │
//!     Client Request     │  ┌─────────┐    ┌─────────────┐            │
//!     ───────────────────┼─▶│  http   │───▶│   routing   │            │
//!                        │  │ server  │    │ route table │            │
//!                        │  └─────────┘    └──────┬──────┘            │
//!                        │        ┌───────────────┼─────────────┐     │
//!                        │        ▼               ▼             ▼     │
//!                        │  ┌──────────┐   ┌────────────┐  ┌────────┐ │
//!                        │  │  proxy   │   │   static   │  │  html  │ │      Backend
//!                        │  │ (prefix) │   │  (suffix)  │  │ entry  │ │ ◀──  process
//!                        │  └──────────┘   └────────────┘  └───┬────┘ │
//!                        │                                     ▼      │
//!                        │                              ┌──────────┐  │
//!                        │                              │   scan   │  │
//!                        │                              │ classify │  │
//!                        │                              └──────────┘  │
//!                        └────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use spago_dev_server::config::{load_raw_config, resolve_config, CONFIG_FILE_NAME};
use spago_dev_server::lifecycle::{signals, Shutdown};
use spago_dev_server::observability::{logging, metrics};
use spago_dev_server::DevServer;

#[derive(Parser, Debug)]
#[command(name = "spago")]
#[command(about = "Development server with automatic stylesheet/script injection", long_about = None)]
struct Cli {
    /// Project root directory (defaults to the current directory)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Config file (defaults to <root>/spago.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening port, overrides the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Expose Prometheus metrics on this address
    #[arg(long)]
    metrics_address: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init();

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let config_path = cli.config.unwrap_or_else(|| root.join(CONFIG_FILE_NAME));

    let mut raw = load_raw_config(&config_path)?;
    if cli.port.is_some() {
        raw.port = cli.port;
    }
    let config = resolve_config(root, raw)?;

    tracing::info!(
        root = %config.root_dir.display(),
        port = config.port,
        excluded = ?config.excluded_paths,
        static_extensions = ?config.static_file_extensions,
        "Configuration loaded"
    );

    if let Some(addr) = cli.metrics_address {
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    println!("listening on http://localhost:{}", config.port);

    let shutdown = Shutdown::new();
    let signal = shutdown.signal();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        trigger.trigger();
    });

    DevServer::new(config).run(listener, signal).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
