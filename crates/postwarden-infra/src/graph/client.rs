//! GraphHttpClient -- concrete [`GraphApi`] implementation over reqwest.
//!
//! Reads are plain GETs with the access token as a query parameter,
//! publishes are form-encoded POSTs, deletes are DELETEs confirmed by the
//! `{"success": true}` body. Non-success statuses are mapped to
//! [`GraphError`] variants from the API's error envelope; the agent treats
//! every variant uniformly, so the mapping exists for the log line.

use std::time::Duration;

use serde_json::Value;

use postwarden_core::graph::GraphApi;
use postwarden_types::error::GraphError;

use super::wire::{ErrorEnvelope, TokenResponse};

/// Graph API error codes that signal throttling.
const RATE_LIMIT_CODES: [i64; 3] = [4, 17, 32];

/// HTTP client for the social graph API.
pub struct GraphHttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl GraphHttpClient {
    /// Production graph API endpoint, including the pinned version.
    pub const DEFAULT_BASE_URL: &'static str = "https://graph.facebook.com/v19.0";

    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Check the status, then decode the body as JSON.
    async fn read_json(response: reqwest::Response) -> Result<Value, GraphError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %body, "graph API error response");
            return Err(map_error(status.as_u16(), &body));
        }
        response
            .json()
            .await
            .map_err(|e| GraphError::Deserialization(format!("failed to parse response: {e}")))
    }
}

impl Default for GraphHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn transport(e: reqwest::Error) -> GraphError {
    GraphError::Transport(e.to_string())
}

/// Map a non-success status plus error envelope to a [`GraphError`].
fn map_error(status: u16, body: &str) -> GraphError {
    let error = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|e| e.error);

    let code = error.as_ref().and_then(|e| e.code);
    if status == 429 || code.is_some_and(|c| RATE_LIMIT_CODES.contains(&c)) {
        return GraphError::RateLimited;
    }
    if status == 401
        || status == 403
        || error
            .as_ref()
            .is_some_and(|e| e.kind.as_deref() == Some("OAuthException"))
    {
        return GraphError::AuthenticationFailed;
    }
    if status == 404 {
        return GraphError::NotFound;
    }

    let message = error
        .map(|e| e.message)
        .unwrap_or_else(|| body.chars().take(200).collect());
    GraphError::Api { status, message }
}

impl GraphApi for GraphHttpClient {
    async fn get_object(&self, token: &str, id: &str, fields: &str) -> Result<Value, GraphError> {
        let response = self
            .client
            .get(self.url(id))
            .query(&[("fields", fields), ("access_token", token)])
            .send()
            .await
            .map_err(transport)?;
        Self::read_json(response).await
    }

    async fn get_connections(
        &self,
        token: &str,
        id: &str,
        edge: &str,
        params: &[(&str, String)],
    ) -> Result<Value, GraphError> {
        let response = self
            .client
            .get(self.url(&format!("{id}/{edge}")))
            .query(&[("access_token", token)])
            .query(params)
            .send()
            .await
            .map_err(transport)?;
        Self::read_json(response).await
    }

    async fn put_object(
        &self,
        token: &str,
        id: &str,
        edge: &str,
        params: &[(&str, String)],
    ) -> Result<Value, GraphError> {
        let response = self
            .client
            .post(self.url(&format!("{id}/{edge}")))
            .query(&[("access_token", token)])
            .form(params)
            .send()
            .await
            .map_err(transport)?;
        Self::read_json(response).await
    }

    async fn delete_object(&self, token: &str, id: &str) -> Result<(), GraphError> {
        let response = self
            .client
            .delete(self.url(id))
            .query(&[("access_token", token)])
            .send()
            .await
            .map_err(transport)?;
        let value = Self::read_json(response).await?;

        // The API answers 200 with {"success": false} in some edge cases.
        if value.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(GraphError::Api {
                status: 200,
                message: "deletion not confirmed".to_string(),
            });
        }
        Ok(())
    }

    async fn extend_access_token(
        &self,
        token: &str,
        app_id: &str,
        app_secret: &str,
    ) -> Result<String, GraphError> {
        let response = self
            .client
            .get(self.url("oauth/access_token"))
            .query(&[
                ("grant_type", "fb_exchange_token"),
                ("client_id", app_id),
                ("client_secret", app_secret),
                ("fb_exchange_token", token),
            ])
            .send()
            .await
            .map_err(transport)?;
        let value = Self::read_json(response).await?;
        let parsed: TokenResponse = serde_json::from_value(value)
            .map_err(|e| GraphError::Deserialization(format!("bad token response: {e}")))?;
        Ok(parsed.access_token)
    }
}
