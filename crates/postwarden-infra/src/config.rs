//! Environment-based configuration resolution.
//!
//! Configuration is resolved once at startup and handed to whichever
//! presentation shell runs; nothing reads the environment afterwards.

use crate::graph::GraphHttpClient;

/// Environment variable overriding the graph API endpoint.
pub const GRAPH_URL_ENV: &str = "POSTWARDEN_GRAPH_URL";

/// Resolve the graph API base URL from the environment, falling back to
/// the production endpoint.
pub fn resolve_graph_base_url() -> String {
    base_url_from(std::env::var(GRAPH_URL_ENV).ok())
}

fn base_url_from(var: Option<String>) -> String {
    var.filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| GraphHttpClient::DEFAULT_BASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_falls_back_to_production() {
        assert_eq!(base_url_from(None), GraphHttpClient::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_blank_falls_back_to_production() {
        assert_eq!(
            base_url_from(Some("  ".to_string())),
            GraphHttpClient::DEFAULT_BASE_URL
        );
    }

    #[test]
    fn test_override_wins() {
        assert_eq!(
            base_url_from(Some("http://localhost:9000".to_string())),
            "http://localhost:9000"
        );
    }
}
