//! Minimal Drive v3 REST client.
//!
//! Only `files.list` is implemented. Transport retries are left to callers.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::config::DriveConfig;
use crate::{Result, SearchError};

use super::types::{FileEntry, FileList, LIST_FIELDS, LIST_ORDER_BY};

/// User agent string for API calls.
const USER_AGENT: &str = concat!("gdsearch/", env!("CARGO_PKG_VERSION"));

/// Drive API client.
pub struct DriveClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl DriveClient {
    /// Create a client from the drive configuration.
    pub fn new(config: &DriveConfig) -> Result<Self> {
        url::Url::parse(&config.api_base_url)
            .map_err(|e| SearchError::Config(format!("invalid API base URL: {}", e)))?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SearchError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Run one `files.list` call across all drives.
    ///
    /// Results are newest first and capped at `page_size`.
    pub async fn list_files(
        &self,
        access_token: &str,
        query: &str,
        page_size: u32,
    ) -> Result<Vec<FileEntry>> {
        let page_size = page_size.to_string();
        let response = self
            .client
            .get(format!("{}/files", self.base_url))
            .bearer_auth(access_token)
            .query(&[
                ("fields", LIST_FIELDS),
                ("q", query),
                ("orderBy", LIST_ORDER_BY),
                ("pageSize", page_size.as_str()),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Api(format!("list request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Api(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("HTTP error: {}", status));
            return Err(SearchError::Api(message));
        }

        let list: FileList = serde_json::from_str(&body)
            .map_err(|e| SearchError::Api(format!("malformed list response: {}", e)))?;

        Ok(list.files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> DriveConfig {
        DriveConfig {
            parent_dir_id: "root".to_string(),
            api_base_url: format!("{}/drive/v3/", server.uri()),
            ..DriveConfig::default()
        }
    }

    #[test]
    fn test_setup_errors_are_config_errors() {
        let config = DriveConfig {
            api_base_url: "::nope".to_string(),
            ..DriveConfig::default()
        };
        assert!(matches!(
            DriveClient::new(&config),
            Err(SearchError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_list_sends_expected_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/drive/v3/files"))
            .and(header("authorization", "Bearer tok"))
            .and(query_param("fields", "files(id, name, mimeType, size)"))
            .and(query_param("q", "('root' in parents) and trashed = false"))
            .and(query_param("orderBy", "modifiedTime desc"))
            .and(query_param("pageSize", "20"))
            .and(query_param("supportsAllDrives", "true"))
            .and(query_param("includeItemsFromAllDrives", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "files": [
                    {"id": "1", "name": "a", "mimeType": "text/plain", "size": "12"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DriveClient::new(&config_for(&server)).unwrap();
        let files = client
            .list_files("tok", "('root' in parents) and trashed = false", 20)
            .await
            .unwrap();

        assert_eq!(files, vec![FileEntry::new("1", "a", "text/plain").with_size(12)]);
    }

    #[tokio::test]
    async fn test_list_api_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 400, "message": "Invalid Value"}
            })))
            .mount(&server)
            .await;

        let client = DriveClient::new(&config_for(&server)).unwrap();
        let err = client.list_files("tok", "bad", 20).await.unwrap_err();

        assert!(matches!(err, SearchError::Api(_)));
        assert_eq!(err.message(), "Invalid Value");
    }

    #[tokio::test]
    async fn test_list_status_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = DriveClient::new(&config_for(&server)).unwrap();
        let err = client.list_files("tok", "q", 20).await.unwrap_err();
        assert!(err.message().contains("502"));
    }

    #[tokio::test]
    async fn test_list_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = DriveClient::new(&config_for(&server)).unwrap();
        let err = client.list_files("tok", "q", 20).await.unwrap_err();
        assert!(err.message().contains("malformed list response"));
    }
}
