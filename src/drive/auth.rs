//! Access tokens for the Drive API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{Result, SearchError};

/// Total timeout for a token refresh, in seconds.
const TOKEN_TIMEOUT_SECS: u64 = 15;

/// Something that can hand out a bearer token for the Drive API.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Obtain a bearer token.
    ///
    /// Failures surface as [`SearchError::Auth`].
    async fn access_token(&self) -> Result<String>;
}

/// A token issued out of band.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// Exchanges a refresh token for a fresh access token on every call.
pub struct RefreshTokenProvider {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

impl RefreshTokenProvider {
    /// Create a new provider for the given token endpoint.
    pub fn new(
        token_url: &str,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<Self> {
        url::Url::parse(token_url)
            .map_err(|e| SearchError::Config(format!("invalid token URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(TOKEN_TIMEOUT_SECS))
            .build()
            .map_err(|e| SearchError::Auth(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token_url: token_url.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            refresh_token: refresh_token.to_string(),
        })
    }
}

#[async_trait]
impl TokenProvider for RefreshTokenProvider {
    async fn access_token(&self) -> Result<String> {
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| SearchError::Auth(format!("token request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Auth(format!("failed to read token response: {}", e)))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => match err.error_description {
                    Some(desc) => format!("{}: {}", err.error, desc),
                    None => err.error,
                },
                Err(_) => format!("HTTP error: {}", status),
            };
            return Err(SearchError::Auth(message));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::Auth(format!("malformed token response: {}", e)))?;

        tracing::debug!("refreshed Drive access token");
        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_static_token() {
        let provider = StaticTokenProvider::new("abc");
        assert_eq!(provider.access_token().await.unwrap(), "abc");
    }

    #[test]
    fn test_invalid_token_url() {
        let result = RefreshTokenProvider::new("not a url", "id", "secret", "refresh");
        assert!(matches!(result, Err(SearchError::Config(_))));
    }

    #[tokio::test]
    async fn test_refresh_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=r-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = RefreshTokenProvider::new(
            &format!("{}/token", server.uri()),
            "client",
            "secret",
            "r-123",
        )
        .unwrap();

        assert_eq!(provider.access_token().await.unwrap(), "fresh");
    }

    #[tokio::test]
    async fn test_refresh_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "Token has been expired or revoked."
            })))
            .mount(&server)
            .await;

        let provider =
            RefreshTokenProvider::new(&format!("{}/token", server.uri()), "c", "s", "r").unwrap();

        let err = provider.access_token().await.unwrap_err();
        assert!(matches!(err, SearchError::Auth(_)));
        assert_eq!(
            err.message(),
            "invalid_grant: Token has been expired or revoked."
        );
    }

    #[tokio::test]
    async fn test_refresh_non_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let provider =
            RefreshTokenProvider::new(&format!("{}/token", server.uri()), "c", "s", "r").unwrap();

        let err = provider.access_token().await.unwrap_err();
        assert!(err.message().contains("503"));
    }
}
