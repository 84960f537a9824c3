//! Social graph API over HTTP.
//!
//! [`GraphHttpClient`] implements the
//! [`GraphApi`](postwarden_core::graph::GraphApi) port against the graph
//! API's REST surface.

pub mod client;
pub mod wire;

pub use client::GraphHttpClient;
