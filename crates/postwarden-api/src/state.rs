//! Application state shared by both presentation shells.
//!
//! Resolved once at startup from the environment and passed by reference
//! (console) or cloned into the router (web form); no ambient globals.

use postwarden_infra::config::resolve_graph_base_url;
use postwarden_infra::GraphHttpClient;

/// Process-wide configuration for the shells.
#[derive(Clone)]
pub struct AppState {
    pub graph_base_url: String,
}

impl AppState {
    /// Resolve configuration from the environment.
    pub fn init() -> Self {
        Self {
            graph_base_url: resolve_graph_base_url(),
        }
    }

    /// Build a graph client pointed at the configured endpoint.
    ///
    /// Each connection attempt gets its own client; agents are created per
    /// connection and discarded, so nothing is shared between them.
    pub fn graph_client(&self) -> GraphHttpClient {
        GraphHttpClient::new().with_base_url(self.graph_base_url.clone())
    }
}
