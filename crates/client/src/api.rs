//! HTTP client for the command API.

use regex::Regex;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use tracing::debug;
use utils::{
    command::{CommandSummary, CommandUpdate},
    response::{DataResponse, MessageResponse},
};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

const TOKEN_INPUT_PATTERN: &str = r#"name="_csrf_token"\s+value="([^"]+)""#;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx answer; `message` is the server's own message when it sent one.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("anti-forgery token not found on page")]
    MissingToken,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            csrf_token: None,
        }
    }

    /// Load the index page and keep the token embedded in it.
    pub async fn fetch_csrf_token(&mut self) -> Result<String, TransportError> {
        let response = self.http.get(format!("{}/", self.base_url)).send().await?;
        let status = response.status();
        let page = response.text().await?;
        if !status.is_success() {
            return Err(TransportError::Api {
                status: status.as_u16(),
                message: format!("HTTP {status}"),
            });
        }

        let token = extract_csrf_token(&page)?;
        self.csrf_token = Some(token.clone());
        Ok(token)
    }

    pub async fn list(&self) -> Result<Vec<CommandSummary>, TransportError> {
        self.send(self.request(Method::GET, "/api/commandes")).await
    }

    pub async fn create(
        &self,
        description: &str,
        command: &str,
    ) -> Result<CommandSummary, TransportError> {
        let body = json!({
            "description": description,
            "command": command,
            "_csrf_token": self.token(),
        });
        let response: DataResponse<CommandSummary> = self
            .send(self.request(Method::POST, "/api/new").json(&body))
            .await?;
        Ok(response.data)
    }

    pub async fn update(
        &self,
        id: i64,
        changes: &CommandUpdate,
    ) -> Result<CommandSummary, TransportError> {
        let mut body = json!({ "_csrf_token": self.token() });
        if let Some(description) = &changes.description {
            body["description"] = json!(description);
        }
        if let Some(command) = &changes.command {
            body["command"] = json!(command);
        }

        let response: DataResponse<CommandSummary> = self
            .send(self.request(Method::PATCH, &format!("/api/update/{id}")).json(&body))
            .await?;
        Ok(response.data)
    }

    /// Returns the server's confirmation message.
    pub async fn delete(&self, id: i64) -> Result<String, TransportError> {
        let body = json!({ "_csrf_token": self.token() });
        let response: MessageResponse = self
            .send(self.request(Method::DELETE, &format!("/api/delete/{id}")).json(&body))
            .await?;
        Ok(response.message)
    }

    fn token(&self) -> &str {
        self.csrf_token.as_deref().unwrap_or_default()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, TransportError> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), len = bytes.len(), "API response");

        if !status.is_success() {
            let message = serde_json::from_slice::<MessageResponse>(&bytes)
                .map(|m| m.message)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            return Err(TransportError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Pull the `_csrf_token` hidden input's value out of an HTML page.
pub fn extract_csrf_token(page: &str) -> Result<String, TransportError> {
    let pattern = Regex::new(TOKEN_INPUT_PATTERN).map_err(|e| TransportError::Decode(e.to_string()))?;
    pattern
        .captures(page)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(TransportError::MissingToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_from_hidden_input() {
        let page = r#"<main><input type="hidden" name="_csrf_token" value="abc.123"></main>"#;
        assert_eq!(extract_csrf_token(page).unwrap(), "abc.123");
    }

    #[test]
    fn test_page_without_token() {
        assert!(matches!(
            extract_csrf_token("<html></html>"),
            Err(TransportError::MissingToken)
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        assert_eq!(ApiClient::new("http://localhost:3000/").base_url, "http://localhost:3000");
    }

    #[test]
    fn test_api_error_displays_server_message() {
        let err = TransportError::Api {
            status: 404,
            message: "Commande non trouvée".to_string(),
        };
        assert_eq!(err.to_string(), "Commande non trouvée");
    }
}
