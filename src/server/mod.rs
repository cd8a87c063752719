//! HTTP server for the pricing gateway.
//!
//! This module provides:
//! - The axum router and handlers (`service`)
//! - The HTML form served at `/` (`page`)
//! - Configuration types (`config`)
//!
//! Every `/predict` outcome is a `200 OK` plain-text body; see
//! [`LustreError::response_text`](crate::LustreError::response_text).

pub mod config;
mod page;
pub mod service;

pub use service::{router, serve};
