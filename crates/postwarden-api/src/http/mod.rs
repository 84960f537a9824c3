//! Web form shell: axum router and handlers.

pub mod handlers;
pub mod router;
