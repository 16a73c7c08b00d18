//! Restcheck Domain - Core types for the HTTP assertion toolkit
//!
//! This crate defines the data model: request specifications (URL templates,
//! path and query parameters), responses, body path expressions, assertions
//! with their results, and the scenario file format. All types here are pure
//! Rust with no I/O dependencies.

pub mod check;
pub mod error;
pub mod path;
pub mod request;
pub mod response;
pub mod scenario;

pub use check::{Assertion, CheckReport, CheckResult, Outcome, StatusExpectation};
pub use error::{DomainError, DomainResult};
pub use path::{PathError, PathExpr, PathSegment};
pub use request::{HttpMethod, PathParam, PathParams, QueryParam, QueryParams, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use scenario::{ExtractRule, Scenario, Step};
