//! Shared domain types for Postwarden.
//!
//! Pure data: profile and post projections fetched from the social graph
//! API, the engagement summary pair, and the `GraphError` taxonomy. This
//! crate never performs IO.

pub mod error;
pub mod post;
pub mod profile;
