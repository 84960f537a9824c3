//! HTTP handlers for the web form.

pub mod connect;
