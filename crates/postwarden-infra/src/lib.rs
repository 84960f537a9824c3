//! Infrastructure layer: the concrete HTTP implementation of the
//! `GraphApi` port and environment-based configuration resolution.

pub mod config;
pub mod graph;

pub use graph::GraphHttpClient;
