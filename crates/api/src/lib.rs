//! HTTP API: server, routing, and the request pipeline.

pub mod app;
pub mod context;
pub mod middleware;
