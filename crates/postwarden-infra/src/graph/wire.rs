//! Wire payloads specific to the graph API's REST surface.

use serde::Deserialize;

/// Error envelope the graph API returns on non-success statuses:
/// `{"error": {"message": ..., "type": ..., "code": ...}}`.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub code: Option<i64>,
}

/// Response from the token exchange endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_deserialize() {
        let envelope: ErrorEnvelope = serde_json::from_str(
            r#"{"error":{"message":"Invalid OAuth access token.","type":"OAuthException","code":190}}"#,
        )
        .unwrap();
        assert_eq!(envelope.error.kind.as_deref(), Some("OAuthException"));
        assert_eq!(envelope.error.code, Some(190));
    }

    #[test]
    fn test_token_response_deserialize() {
        let response: TokenResponse = serde_json::from_str(
            r#"{"access_token":"EAAlong","token_type":"bearer","expires_in":5183944}"#,
        )
        .unwrap();
        assert_eq!(response.access_token, "EAAlong");
        assert_eq!(response.expires_in, Some(5_183_944));
    }
}
