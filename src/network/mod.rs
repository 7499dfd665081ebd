//! HTTP networking module
//!
//! Provides the HTTP client used for upstream searches and the chat connector.

mod client;
mod user_agent;

pub use client::{ApiRequest, ApiResponse, HttpClient, HttpMethod};
pub use user_agent::identify;
