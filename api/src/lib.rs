//! # PayApprove API
//!
//! actix-web application: middleware, DTOs, route handlers and the server
//! wiring shared by the binaries.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
