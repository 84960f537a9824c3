//! Account agent and the graph API port for Postwarden.
//!
//! This crate defines the `GraphApi` trait (the "port" the infrastructure
//! layer implements) and the `AccountAgent` built on top of it. It depends
//! only on `postwarden-types` -- never on `postwarden-infra` or any HTTP
//! crate, so the agent stays headless and testable against an in-memory
//! collaborator.

pub mod agent;
pub mod graph;

pub use agent::AccountAgent;
pub use graph::GraphApi;
