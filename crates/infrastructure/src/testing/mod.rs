//! Check and scenario execution.

mod runner;
mod scenario;

pub use runner::CheckRunner;
pub use scenario::{ScenarioError, ScenarioReport, ScenarioRunner, StepReport};
