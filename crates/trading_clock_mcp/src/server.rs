use rmcp::{
    RoleServer, ServerHandler,
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
    },
    model::*,
    prompt, prompt_handler, prompt_router,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::config::Config;
use crate::core::provider::TradingClock;
use crate::core::{
    error::{McpError, McpResult, TradingClockError},
    models::{ConvertToUserLocalRequest, GetDstWindowRequest, GetServerTimeRequest},
};

/// Trading Clock MCP Server
#[derive(Clone)]
pub struct TradingClockService {
    trading_clock: TradingClock,
    tool_router: ToolRouter<TradingClockService>,
    prompt_router: PromptRouter<TradingClockService>,
}

impl TradingClockService {
    pub fn new(config: &Config) -> Self {
        Self::with_trading_clock(TradingClock::new(*config.local_timezone()))
    }

    pub fn with_trading_clock(trading_clock: TradingClock) -> Self {
        Self {
            trading_clock,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    fn create_resource_text(&self, uri: &str, name: &str) -> Resource {
        RawResource::new(uri, name.to_string()).no_annotation()
    }

    pub(crate) fn get_local_timezone_name(&self) -> String {
        self.trading_clock.local_timezone_name()
    }

    fn json_content<T: Serialize>(value: &T) -> McpResult<CallToolResult> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    fn generate_status_content(&self) -> String {
        let server_time = self.trading_clock.server_time();
        let local = self
            .trading_clock
            .convert_to_user_local(&server_time.timestamp)
            .map(|local| local.local_time)
            .unwrap_or_else(|_| "unavailable".to_string());

        format!(
            r#"Trading Clock MCP Server Status

Server: Running
Server Time: {}
UTC: {}
Offset: UTC+{}
DST Active: {}
Day of Week: {}
Local Timezone: {}
Local Time: {}
Tools Available: 3
Prompts Available: 1
Resources Available: 2"#,
            server_time.timestamp,
            server_time.utc,
            server_time.offset_hours,
            server_time.is_dst,
            server_time.day_of_week,
            self.get_local_timezone_name(),
            local
        )
    }

    fn generate_help_content(&self) -> String {
        format!(
            r#"Trading Clock MCP Server Help

TOOLS:
- get_server_time: Get the trading server's current time
  - at: ISO 8601 instant with offset to evaluate instead of now (optional)
  - Example: {{"at": "2025-07-01T00:00:00Z"}}

- convert_to_user_local: Convert a server timestamp to local time
  - timestamp: Server timestamp with offset (required)
  - Example: {{"timestamp": "2025-07-01T03:00:00.000+03:00"}}

- get_dst_window: Get the server's DST window for a year
  - year: Calendar year (required)
  - Example: {{"year": 2025}}

PROMPTS:
- server_time_guidance: How to read the server time

RESOURCES:
- clock://status: Current server time and DST state
- clock://help: This help documentation

LOCAL TIMEZONE: {}

SERVER TIME RULES:
- Winter offset: UTC+2
- Summer offset: UTC+3
- Summer starts: second Sunday of March, 02:00 UTC
- Summer ends: first Sunday of November, 02:00 UTC
- Format: YYYY-MM-DDTHH:mm:ss.sss+HH:00"#,
            self.get_local_timezone_name()
        )
    }
}

impl Default for TradingClockService {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

#[tool_router]
impl TradingClockService {
    #[tool(description = "Get the trading server's current time (UTC+2, or UTC+3 during DST)")]
    pub(crate) async fn get_server_time(
        &self,
        Parameters(req): Parameters<GetServerTimeRequest>,
    ) -> McpResult<CallToolResult> {
        let result = self.trading_clock.server_time_for(req.at.as_deref())?;
        Self::json_content(&result)
    }

    #[tool(description = "Convert a server timestamp to the user's local time")]
    pub(crate) async fn convert_to_user_local(
        &self,
        Parameters(req): Parameters<ConvertToUserLocalRequest>,
    ) -> McpResult<CallToolResult> {
        let result = self.trading_clock.convert_to_user_local(&req.timestamp)?;
        Self::json_content(&result)
    }

    #[tool(description = "Get the server's DST window for a calendar year")]
    pub(crate) async fn get_dst_window(
        &self,
        Parameters(req): Parameters<GetDstWindowRequest>,
    ) -> McpResult<CallToolResult> {
        let result = self.trading_clock.dst_window(req.year)?;
        Self::json_content(&result)
    }
}

#[prompt_router]
impl TradingClockService {
    /// Generate guidance for reading the trading server time
    #[prompt(name = "server_time_guidance")]
    async fn server_time_guidance(
        &self,
        _ctx: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<Vec<PromptMessage>> {
        let guidance = format!(
            r#"Trading Server Time Guidance:

1. **Server Offset**
   - The server is not in any IANA timezone
   - It runs at UTC+2, switching to UTC+3 during its DST window
   - Current server time: {}

2. **DST Window**
   - Starts on the second Sunday of March at 02:00 UTC
   - Ends on the first Sunday of November at 02:00 UTC
   - Use get_dst_window to see the exact instants for a year

3. **Timestamps**
   - Server timestamps always carry their offset (+02:00 or +03:00)
   - Compare instants, not wall-clock fields
   - Use convert_to_user_local to display them in {}

4. **Error Handling**
   - Timestamps without an offset are rejected
   - A rejected timestamp means no local time is available"#,
            self.trading_clock.server_time_iso(),
            self.get_local_timezone_name()
        );

        Ok(vec![PromptMessage {
            role: PromptMessageRole::Assistant,
            content: PromptMessageContent::text(guidance),
        }])
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for TradingClockService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Trading Clock MCP Server. Tools: get_server_time, convert_to_user_local, get_dst_window. Server time is UTC+2, or UTC+3 during DST. Local timezone: {}.",
                self.get_local_timezone_name()
            )),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<ListResourcesResult> {
        Ok(ListResourcesResult {
            resources: vec![
                self.create_resource_text("clock://status", "server-status"),
                self.create_resource_text("clock://help", "help-documentation"),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<ReadResourceResult> {
        match uri.as_str() {
            "clock://status" => {
                let status = self.generate_status_content();
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(status, uri)],
                })
            }
            "clock://help" => {
                let help = self.generate_help_content();
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(help, uri)],
                })
            }
            _ => Err(TradingClockError::ResourceNotFound {
                uri: uri.to_string(),
            }
            .into()),
        }
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<ListResourceTemplatesResult> {
        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: Vec::new(),
        })
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> McpResult<InitializeResult> {
        tracing::info!(
            local_timezone = %self.get_local_timezone_name(),
            "Trading Clock MCP Server initialized successfully"
        );
        Ok(self.get_info())
    }
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    use rmcp::{ServiceExt, transport::stdio};

    let service = TradingClockService::new(&config)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}
