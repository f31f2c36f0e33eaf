//! taskbridge binary entry point: stdio MCP server over the Task API.

use std::process;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use taskbridge::backend::TaskApiClient;
use taskbridge::config::BridgeConfig;
use taskbridge::tools::ToolRegistry;

#[tokio::main]
async fn main() {
    // Logs go to stderr: stdout is the MCP stream.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match BridgeConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("fatal: {e}");
            process::exit(1);
        }
    };

    let client = match TaskApiClient::new(&config) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("fatal: {e}");
            process::exit(1);
        }
    };

    info!(api_url = %config.api_url, "starting Task API MCP bridge");

    let registry = ToolRegistry::bridge(client);
    taskbridge::mcp::run_stdio(registry).await;
}
