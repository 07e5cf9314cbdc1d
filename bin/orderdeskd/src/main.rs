//! `orderdeskd` — the order tracking server binary.
//!
//! Usage:
//!   orderdeskd -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/orderdesk/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod bootstrap;
mod config;
mod routes;

use clap::Parser;
use tracing::info;

use orderdesk_core::Module;

use config::ServerConfig;

/// Order tracking server.
#[derive(Parser, Debug)]
#[command(name = "orderdeskd", about = "Order tracking server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides the config file).
    #[arg(long = "listen")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let mut server_config = ServerConfig::load(&config_path)?;
    if let Some(listen) = cli.listen {
        server_config.listen = listen;
    }

    // Verify configuration is valid.
    bootstrap::verify_config(&server_config)?;

    // Initialize the sheet backend; a failure degrades instead of exiting.
    let service = bootstrap::init_service(&server_config).await;
    let sheets_initialized = service.is_some();

    let orders_module = orderdesk_orders::OrdersModule::new(service);
    info!("Orders module initialized");

    let module_routes = vec![(orders_module.name(), orders_module.routes())];
    let app = routes::build_router(sheets_initialized, module_routes);

    info!("Listening on {}", server_config.listen);
    let listener = tokio::net::TcpListener::bind(&server_config.listen).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
