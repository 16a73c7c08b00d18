//! Restcheck - Main entry point
//!
//! Loads a scenario file, runs its steps against the live services, prints
//! a per-check report, and exits non-zero if anything failed.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use restcheck_domain::check::Outcome;
use restcheck_domain::Scenario;
use restcheck_infrastructure::{ReqwestHttpClient, ScenarioReport, ScenarioRunner};

/// Run a JSON scenario of HTTP requests and response checks.
#[derive(Debug, Parser)]
#[command(name = "restcheck", version, about)]
struct Cli {
    /// Path to the scenario JSON file.
    scenario: PathBuf,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let text = std::fs::read_to_string(&cli.scenario)?;
    let scenario: Scenario = serde_json::from_str(&text)?;

    let client = Arc::new(ReqwestHttpClient::new()?);
    let runner = ScenarioRunner::new(client);
    let report = runner.run(&scenario).await?;

    print_report(&report);

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_report(report: &ScenarioReport) {
    println!(
        "scenario '{}' started {}",
        report.name,
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for step in &report.steps {
        println!("  {} -> {} ({})", step.name, step.status, step.url);

        for result in &step.checks.results {
            let marker = match result.outcome {
                Outcome::Pass => "pass",
                Outcome::Mismatch => "FAIL",
                Outcome::Missing => "FAIL missing",
            };
            println!("    [{marker}] {}", result.assertion.description());
            if let Some(message) = &result.message {
                println!("           {message}");
            }
        }

        for (name, value) in &step.extracted {
            println!("    extracted {name} = {value}");
        }
    }

    println!(
        "{} checks, {} failed in {} ms",
        report.total_checks(),
        report.failed_checks(),
        report.duration_ms
    );
}
