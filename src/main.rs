//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, optionally warms the
//! corporation index and starts the server with the configured transport.

use anyhow::Result;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use dart_mcp_server::core::config::LoggingConfig;
use dart_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config.logging);

    info!("Starting {} v{}", config.server.name, config.server.version);
    config.log_dart_status();

    let transport = TransportService::new(config.transport.clone());
    let sync_on_startup = config.dart.sync_corp_codes_on_startup;
    let server = McpServer::new(config)?;

    if sync_on_startup {
        let ctx = server.context();
        if ctx.client.has_api_key() {
            match ctx.corp_index.ensure_loaded(&ctx.client).await {
                Ok(count) => info!("Corporation index ready with {} companies", count),
                Err(e) => warn!("Corporation index sync failed, will retry on first lookup: {}", e),
            }
        } else {
            warn!("DART_SYNC_ON_STARTUP is set but DART_API_KEY is missing; skipping sync");
        }
    }

    info!("Server initialized");

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout belongs to the STDIO transport.
fn init_logging(logging: &LoggingConfig) {
    let level = match logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if logging.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
