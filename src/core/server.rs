//! MCP Server implementation and lifecycle management.
//!
//! The server handler implements the MCP protocol by delegating to the tools
//! and resources domains. Tools are routed by the rmcp `ToolRouter` built in
//! `domains/tools/router.rs`; the HTTP transport dispatches through the
//! `ToolRegistry` instead. Both are built over the same tool definitions.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    resources::{ResourceError, ResourceService},
    tools::{ToolContext, ToolRegistry, build_tool_router},
};

/// Instructions sent to clients on initialization.
const INSTRUCTIONS: &str = "This server answers questions about Korean listed and unlisted companies using OpenDART, the Financial Supervisory Service's electronic disclosure system. \
Start with find_company_by_name to get a company's 8-digit corp_code, and get_today when the question is relative to the current date. \
Use get_company_financial_statement_list to see which periodic reports exist, get_financial_statement for full statements, and the *_summary_details tools for debt, investment, people and stock sections of a regular report. \
Amounts are in Korean won as DART reports them. Explain the figures in plain language.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Shared DART client and corporation index.
    ctx: ToolContext,

    /// Name-based tool dispatch (HTTP transport).
    registry: ToolRegistry,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails when the HTTP client cannot be built or the corporation index
    /// cannot be opened.
    pub fn new(config: Config) -> super::error::Result<Self> {
        let config = Arc::new(config);
        let ctx = ToolContext::new(config.clone())?;

        Ok(Self {
            tool_router: build_tool_router::<Self>(ctx.clone()),
            registry: ToolRegistry::new(ctx.clone()),
            resource_service: Arc::new(ResourceService::new(ctx.clone())),
            config,
            ctx,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Shared tool context (DART client and corporation index).
    pub fn context(&self) -> &ToolContext {
        &self.ctx
    }

    /// Instructions advertised on initialization.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        self.registry.call_tool(name, arguments).await
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(&self, uri: &str) -> Result<serde_json::Value, String> {
        match self.resource_service.read_resource(uri).await {
            Ok(result) => Ok(serde_json::json!({
                "contents": result.contents
            })),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| match e {
                ResourceError::NotFound(_) => McpError::resource_not_found(e.to_string(), None),
                _ => McpError::internal_error(e.to_string(), None),
            })
    }
}
