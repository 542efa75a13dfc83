//! Shared state handed to every tool.

use std::sync::Arc;

use tracing::info;

use super::error::ToolError;
use crate::core::config::Config;
use crate::domains::dart::{CorpIndex, DartClient, DartError};

/// Everything a tool needs to answer a call.
///
/// Cloning is cheap: the client shares its connection pool and the index is
/// reference counted.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub config: Arc<Config>,
    pub client: DartClient,
    pub corp_index: Arc<CorpIndex>,
}

impl ToolContext {
    /// Build the DART client and open the corporation index from `config`.
    pub fn new(config: Arc<Config>) -> Result<Self, ToolError> {
        let client = DartClient::new(config.dart.base_url.clone(), config.dart.api_key.clone())?;
        let corp_index = Arc::new(CorpIndex::open(config.dart.corp_db_path.as_deref())?);

        match corp_index.path() {
            Some(path) => info!("Corporation index at {}", path.display()),
            None => info!("Corporation index kept in memory"),
        }

        Ok(Self {
            config,
            client,
            corp_index,
        })
    }

    /// Fail before any network call when no API key is configured.
    pub fn require_api_key(&self) -> Result<(), ToolError> {
        if self.client.has_api_key() {
            Ok(())
        } else {
            Err(DartError::MissingApiKey.into())
        }
    }
}
