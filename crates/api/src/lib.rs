//! HTTP API: enforcement middleware, route binding, and the `/api` namespace.

pub mod app;
pub mod binder;
pub mod config;
pub mod context;
pub mod middleware;
