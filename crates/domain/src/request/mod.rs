//! Request specification types
//!
//! A request is described declaratively: a method, a URL template with
//! `{name}` placeholders, the path parameters that fill them, and the query
//! parameters appended to the final URL.

mod method;
mod params;
mod spec;
pub mod template;

pub use method::HttpMethod;
pub use params::{PathParam, PathParams, QueryParam, QueryParams};
pub use spec::{RequestSpec, DEFAULT_TIMEOUT_MS};
