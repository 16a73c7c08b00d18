//! Port definitions (interfaces)
//!
//! Ports define the boundary between the application core and external
//! systems; adapters in the infrastructure layer implement them.

mod http_client;

pub use http_client::{HttpClient, HttpClientError};
