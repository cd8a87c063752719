//! Client library for connecting to lustred.
//!
//! Provides [`ServiceClient`], which posts prediction forms to a remote
//! lustred instance over HTTP.

mod service_client;

pub use service_client::{ServiceClient, parse_price};
