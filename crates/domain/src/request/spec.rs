//! Request specification type

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::params::{PathParam, PathParams, QueryParam, QueryParams};
use super::template;
use super::HttpMethod;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Complete specification for an HTTP request.
///
/// The URL is a template: `{name}` placeholders are substituted from
/// `path_params` and the query parameters are appended when the final URL is
/// built. All fields are plain data so a spec can be written out as JSON and
/// loaded back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Unique identifier for this request
    #[serde(default = "generate_id")]
    pub id: Uuid,
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,
    /// URL template (may contain `{name}` placeholders)
    pub url: String,
    /// Values for the URL template's placeholders
    #[serde(default)]
    pub path_params: PathParams,
    /// Query string parameters
    #[serde(default)]
    pub query_params: QueryParams,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn generate_id() -> Uuid {
    Uuid::now_v7()
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl RequestSpec {
    /// Creates a GET request with the given name and URL template.
    #[must_use]
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            method: HttpMethod::Get,
            url: url.into(),
            path_params: PathParams::new(),
            query_params: QueryParams::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Adds a path parameter (builder pattern).
    #[must_use]
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.add(PathParam::new(name, value));
        self
    }

    /// Adds a query parameter (builder pattern).
    #[must_use]
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.add(QueryParam::new(key, value));
        self
    }

    /// Sets the request timeout (builder pattern).
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns true if the URL template contains `{name}` placeholders.
    #[must_use]
    pub fn has_placeholders(&self) -> bool {
        !template::parse_placeholders(&self.url).is_empty()
    }

    /// Returns the names of placeholders with no matching path parameter.
    #[must_use]
    pub fn unresolved_placeholders(&self) -> Vec<String> {
        template::substitute(&self.url, &self.path_params).unresolved
    }

    /// Builds the final URL: substitutes path placeholders, then appends the
    /// query string.
    ///
    /// Placeholders with no matching parameter keep their literal `{name}`
    /// text. Query parameters are form-urlencoded; if the template already
    /// carries a query string, further parameters are appended with `&`.
    #[must_use]
    pub fn full_url(&self) -> String {
        let resolved = template::substitute(&self.url, &self.path_params).resolved;

        if self.query_params.is_empty() {
            return resolved;
        }

        let query = serde_urlencoded::to_string(self.query_params.pairs()).unwrap_or_default();
        let separator = if resolved.contains('?') { '&' } else { '?' };
        format!("{resolved}{separator}{query}")
    }

    /// Validates the final URL and returns the parsed form.
    ///
    /// # Errors
    ///
    /// Returns an error if the built URL is malformed.
    pub fn parse_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.full_url())
    }
}
