use thiserror::Error;

/// Errors from the social graph API collaborator.
///
/// The Account Agent handles every variant uniformly at its operation
/// boundary (log + sentinel result); the variants exist so the HTTP client
/// can preserve what the API actually said for the log line.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("authentication rejected by the graph API")]
    AuthenticationFailed,

    #[error("rate limited by the graph API")]
    RateLimited,

    #[error("object not found")]
    NotFound,

    #[error("graph API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode graph API response: {0}")]
    Deserialization(String),
}
