use mcp_server_trading_clock::{cli::Cli, server, utils::logging};

/// Trading Clock MCP Server
///
/// An MCP server demonstrating:
/// - Tools: Server time, local-time conversion and DST windows
/// - Resources: Server status and help documentation
///
/// Usage: npx @modelcontextprotocol/inspector cargo run --bin mcp-server-trading-clock
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging first so timezone detection can report fallbacks
    logging::init_logging()?;

    // Parse CLI arguments
    let config = Cli::parse_config()?;

    tracing::info!(
        local_timezone = %config.local_timezone(),
        "Starting Trading Clock MCP server"
    );

    // Run the MCP server
    if let Err(e) = server::run(config).await {
        tracing::error!("Error running Trading Clock MCP server: {}", e);
        return Err(e);
    }

    Ok(())
}
