//! Drive search service.
//!
//! Ties the pipeline together: build query, list, annotate, format.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::DriveConfig;
use crate::Result;

use super::auth::TokenProvider;
use super::client::DriveClient;
use super::links::annotate;
use super::message::generate_files_list_message;
use super::query::{build_search_query, resolve_scope_ids};
use super::types::{FileEntry, SearchRequest};

/// Service for searching the configured Drive folders.
pub struct DriveSearch {
    config: DriveConfig,
    auth: Arc<dyn TokenProvider>,
    client: DriveClient,
}

impl DriveSearch {
    /// Create a new DriveSearch.
    pub fn new(config: DriveConfig, auth: Arc<dyn TokenProvider>) -> Result<Self> {
        let client = DriveClient::new(&config)?;
        Ok(Self {
            config,
            auth,
            client,
        })
    }

    /// The configuration this service searches with.
    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    /// Find entries matching a request, newest first.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Auth`](crate::SearchError::Auth) if no token could be obtained
    /// - [`SearchError::Api`](crate::SearchError::Api) if the list call failed
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<FileEntry>> {
        let query = build_search_query(&request.name_fragment, request.scope());
        debug!(query = %query, "built Drive query");

        let token = self.auth.access_token().await.map_err(|e| {
            warn!(error = %e, "could not obtain Drive access token");
            e
        })?;

        let files = self
            .client
            .list_files(&token, &query, self.config.page_size)
            .await
            .map_err(|e| {
                warn!(error = %e, "Drive list call failed");
                e
            })?;

        info!(
            fragment = %request.name_fragment,
            matches = files.len(),
            "Drive search finished"
        );
        Ok(files)
    }

    /// Search by name and render the matches as an HTML message.
    ///
    /// No matches is not an error; the result is a fixed informational message.
    pub async fn list_files(&self, name_fragment: &str) -> Result<String> {
        let scope_ids = resolve_scope_ids(name_fragment, &self.config);
        let request = SearchRequest::new(name_fragment, scope_ids)?;

        let entries = annotate(self.search(&request).await?);
        Ok(generate_files_list_message(
            &entries,
            self.config.index_domain.as_deref(),
        ))
    }
}
