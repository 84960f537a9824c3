//! GraphApi trait definition.
//!
//! The five primitive call shapes the agent needs from the social graph
//! API. Uses RPITIT so implementations can be plain `async fn`s; the
//! access token is passed per call so the agent alone owns token state
//! (the token-upgrade operation swaps it without rebuilding the client).

use serde_json::Value;

use postwarden_types::error::GraphError;

/// Port for the external social graph API.
///
/// The concrete HTTP implementation lives in postwarden-infra
/// (`GraphHttpClient`); tests script an in-memory one.
pub trait GraphApi: Send + Sync {
    /// Fetch a single object by id with a comma-separated field selection.
    fn get_object(
        &self,
        token: &str,
        id: &str,
        fields: &str,
    ) -> impl std::future::Future<Output = Result<Value, GraphError>> + Send;

    /// Fetch an edge (connection) of an object, e.g. `me/posts`.
    fn get_connections(
        &self,
        token: &str,
        id: &str,
        edge: &str,
        params: &[(&str, String)],
    ) -> impl std::future::Future<Output = Result<Value, GraphError>> + Send;

    /// Publish to an edge of an object, e.g. `me/feed`.
    fn put_object(
        &self,
        token: &str,
        id: &str,
        edge: &str,
        params: &[(&str, String)],
    ) -> impl std::future::Future<Output = Result<Value, GraphError>> + Send;

    /// Delete an object by id.
    fn delete_object(
        &self,
        token: &str,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), GraphError>> + Send;

    /// Trade a short-lived token plus app credentials for a long-lived one.
    ///
    /// Returns the new access token on success.
    fn extend_access_token(
        &self,
        token: &str,
        app_id: &str,
        app_secret: &str,
    ) -> impl std::future::Future<Output = Result<String, GraphError>> + Send;
}
