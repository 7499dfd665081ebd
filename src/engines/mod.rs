//! Wiki search clients
//!
//! Shapes search requests, maps API responses into results and keeps one
//! client per supported language.

mod registry;
mod request;
mod wikisource;

pub use registry::{ClientRegistry, RegistryError};
pub use request::{SearchRequest, DEFAULT_LIMIT, DEFAULT_PARAMETERS};
pub use wikisource::{parse_pages, MappingError, SearchError, WikiClient};
