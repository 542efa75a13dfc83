//! Resource service implementation.
//!
//! The ResourceService keeps the registered resources in URI order and
//! answers list and read requests. Resources are defined in `definitions/`
//! and registered via `registry.rs`.

use std::collections::BTreeMap;

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use tracing::{debug, info};

use super::definitions::ServerInfoResource;
use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::domains::tools::ToolContext;

/// Service for managing and accessing resources.
pub struct ResourceService {
    ctx: ToolContext,

    /// Key: resource URI.
    resources: BTreeMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// Content computed from server state at read time.
    Dynamic(DynamicResourceType),
}

/// Types of dynamic resources.
#[derive(Debug, Clone, Copy)]
pub enum DynamicResourceType {
    ServerInfo,
}

impl ResourceService {
    /// Create a new ResourceService reading live state from `ctx`.
    pub fn new(ctx: ToolContext) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            ctx,
            resources: BTreeMap::new(),
        };
        for entry in get_all_resources() {
            service.register_resource(entry);
        }
        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        debug!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let text = match &entry.content {
            ResourceContent::Text(text) => text.clone(),
            ResourceContent::Dynamic(DynamicResourceType::ServerInfo) => {
                ServerInfoResource::render(&self.ctx).await?
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}
