use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use wafer::{Config, Server};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::parse().validate() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("wafer: {e}");
            std::process::exit(1);
        }
    };

    let port = config.port;
    let root = config.root.display().to_string();

    let server = match Server::bind(config).await {
        Ok(server) => server,
        Err(e) => {
            eprintln!("wafer: failed to bind port {port}: {e}");
            std::process::exit(1);
        }
    };

    info!(port, root = %root, "wafer serving on http://0.0.0.0:{port}");

    if let Err(e) = server.serve().await {
        error!(error = %e, "server terminated");
        std::process::exit(1);
    }

    info!("server shutdown complete");
}
