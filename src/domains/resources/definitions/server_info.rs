//! Server info resource definition.

use serde_json::json;

use super::{ResourceDefinition, pretty};
use crate::domains::resources::error::ResourceError;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};
use crate::domains::tools::ToolContext;

/// Server information resource (dynamic).
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "dart://server/info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str = "Server name and version, DART API base URL, whether an API key is configured and how many corporations the local index holds";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::ServerInfo)
    }
}

impl ServerInfoResource {
    /// Render the document from live server state. The API key itself is
    /// never included.
    pub async fn render(ctx: &ToolContext) -> Result<String, ResourceError> {
        let info = json!({
            "server": ctx.config.server.name,
            "version": ctx.config.server.version,
            "base_url": ctx.client.base_url(),
            "api_key_configured": ctx.client.has_api_key(),
            "corp_index": {
                "path": ctx.corp_index.path().map(|p| p.display().to_string()),
                "corporations": ctx.corp_index.count_blocking().await?,
            },
        });
        Ok(pretty(info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::test_support::test_context;
    use serde_json::Value;
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_render_hides_key() {
        let server = MockServer::start().await;
        let ctx = test_context(&server, Some("secret-key"));
        let text = ServerInfoResource::render(&ctx).await.unwrap();
        assert!(!text.contains("secret-key"));

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["api_key_configured"], true);
        assert_eq!(value["corp_index"]["corporations"], 0);
        assert_eq!(value["corp_index"]["path"], Value::Null);
        assert_eq!(value["server"], "dart-mcp-server");
    }
}
