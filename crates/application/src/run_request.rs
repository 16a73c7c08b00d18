//! Run Request use case
//!
//! Builds the final URL from a request specification, executes it through
//! the `HttpClient` port, and optionally extracts a body value instead of
//! returning the whole response.

use std::sync::Arc;

use thiserror::Error;

use restcheck_domain::{DomainError, PathError, PathExpr, RequestSpec, ResponseSpec};

use crate::ports::{HttpClient, HttpClientError};

/// Result type for request execution.
pub type RunResult = Result<ResponseSpec, RunRequestError>;

/// Error type for the run request use case.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RunRequestError {
    /// URL is empty.
    #[error("URL is required")]
    EmptyUrl,

    /// URL is invalid.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The transport failed before a response was obtained.
    #[error("{0}")]
    Http(#[from] HttpClientError),

    /// Extraction was requested but the body is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    BodyNotJson(String),

    /// The extraction path did not resolve against the body.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The extraction path expression could not be parsed.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl RunRequestError {
    /// Returns true if this error came from the transport rather than from
    /// validation or extraction.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

/// Use case for executing HTTP requests.
///
/// # Example
///
/// ```ignore
/// let client = Arc::new(ReqwestHttpClient::new()?);
/// let runner = RunRequest::new(client);
///
/// let spec = RequestSpec::get("circuits", "http://ergast.com/api/f1/{season}/circuits.json")
///     .with_path_param("season", "2017");
/// let response = runner.execute(&spec).await?;
/// ```
pub struct RunRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> RunRequest<C> {
    /// Creates a new `RunRequest` use case with the given HTTP client.
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Executes the request and returns the response.
    ///
    /// Blocks (awaits) until a response or a transport error arrives. An
    /// error status code is a normal response, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RunRequestError`] on validation or transport failures.
    pub async fn execute(&self, request: &RequestSpec) -> RunResult {
        self.validate(request)?;

        let response = self.client.execute(request).await?;

        Ok(response)
    }

    /// Executes the request and extracts the value at `path` from the JSON
    /// body instead of asserting on it.
    ///
    /// # Errors
    ///
    /// Returns [`RunRequestError`] if the request fails, the body is not
    /// JSON, or the path does not resolve.
    pub async fn execute_and_extract(
        &self,
        request: &RequestSpec,
        path: &str,
    ) -> Result<serde_json::Value, RunRequestError> {
        let expr = PathExpr::parse(path)?;
        let response = self.execute(request).await?;
        let body: serde_json::Value = serde_json::from_str(&response.body)
            .map_err(|e| RunRequestError::BodyNotJson(e.to_string()))?;

        Ok(expr.evaluate(&body)?)
    }

    /// Validates the request before execution.
    fn validate(&self, request: &RequestSpec) -> Result<(), RunRequestError> {
        if request.url.trim().is_empty() {
            return Err(RunRequestError::EmptyUrl);
        }

        if !request.url.starts_with("http://") && !request.url.starts_with("https://") {
            return Err(RunRequestError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }
}
