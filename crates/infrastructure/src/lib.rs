//! Restcheck Infrastructure - Adapters and execution
//!
//! This crate provides the reqwest-backed HTTP client adapter and the check
//! and scenario runners that sit on top of the domain and application
//! layers.

pub mod adapters;
pub mod testing;

pub use adapters::ReqwestHttpClient;
pub use testing::{CheckRunner, ScenarioError, ScenarioReport, ScenarioRunner, StepReport};
