//! Benchmark result types and recording.

use serde::{Deserialize, Serialize};
use spherepack_core::{PackResult, PackStatus};
use std::fs;
use std::path::Path;

/// Result of a single scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Scenario id
    pub scenario: String,
    /// Seed used for the run
    pub seed: u64,
    /// Whether the stop criterion was reached
    pub converged: bool,
    /// Whether that matches the scenario's expectation
    pub as_expected: bool,
    /// Number of spheres placed
    pub placed: usize,
    /// Attempts consumed
    pub attempts: u64,
    /// Final porosity
    pub porosity: f64,
    /// Radii removed by the shrink policy
    pub dropped_radii: Vec<f64>,
    /// Wall-clock time in milliseconds
    pub time_ms: u64,
    /// Error message if the run failed before packing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunResult {
    /// Builds a run record from a finished pack.
    pub fn from_pack(
        scenario: impl Into<String>,
        seed: u64,
        expect_converged: bool,
        pack: &PackResult,
        time_ms: u64,
    ) -> Self {
        let converged = pack.status == PackStatus::Converged;
        Self {
            scenario: scenario.into(),
            seed,
            converged,
            as_expected: converged == expect_converged,
            placed: pack.placed_count(),
            attempts: pack.attempts,
            porosity: pack.porosity,
            dropped_radii: pack.dropped_radii.clone(),
            time_ms,
            error: None,
        }
    }

    /// Builds a run record for a run that returned an error.
    pub fn failed(scenario: impl Into<String>, seed: u64, error: impl ToString) -> Self {
        Self {
            scenario: scenario.into(),
            seed,
            converged: false,
            as_expected: false,
            placed: 0,
            attempts: 0,
            porosity: 1.0,
            dropped_radii: Vec::new(),
            time_ms: 0,
            error: Some(error.to_string()),
        }
    }
}

/// Collection of benchmark results.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Individual run results
    pub runs: Vec<RunResult>,
    /// Crate version that produced the results
    pub version: String,
}

/// Aggregated statistics for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub scenario: String,
    pub run_count: usize,
    pub converged_count: usize,
    pub unexpected_count: usize,
    pub avg_placed: f64,
    pub avg_attempts: f64,
    pub avg_porosity: f64,
    pub avg_time_ms: u64,
}

impl BenchmarkResult {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self {
            runs: Vec::new(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Adds a run result.
    pub fn add_run(&mut self, result: RunResult) {
        self.runs.push(result);
    }

    /// Appends every run of `other`.
    pub fn merge(&mut self, other: BenchmarkResult) {
        self.runs.extend(other.runs);
    }

    /// True when every run matched its scenario's expectation.
    pub fn all_as_expected(&self) -> bool {
        self.runs.iter().all(|r| r.as_expected)
    }

    /// Saves results to a JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    /// Computes statistics grouped by scenario, in first-seen order.
    pub fn summary_by_scenario(&self) -> Vec<ScenarioSummary> {
        let mut order: Vec<&str> = Vec::new();
        for run in &self.runs {
            if !order.contains(&run.scenario.as_str()) {
                order.push(&run.scenario);
            }
        }

        order
            .into_iter()
            .map(|scenario| {
                let runs: Vec<&RunResult> = self
                    .runs
                    .iter()
                    .filter(|r| r.scenario == scenario && r.error.is_none())
                    .collect();
                let n = runs.len().max(1) as f64;

                ScenarioSummary {
                    scenario: scenario.to_string(),
                    run_count: runs.len(),
                    converged_count: runs.iter().filter(|r| r.converged).count(),
                    unexpected_count: self
                        .runs
                        .iter()
                        .filter(|r| r.scenario == scenario && !r.as_expected)
                        .count(),
                    avg_placed: runs.iter().map(|r| r.placed as f64).sum::<f64>() / n,
                    avg_attempts: runs.iter().map(|r| r.attempts as f64).sum::<f64>() / n,
                    avg_porosity: runs.iter().map(|r| r.porosity).sum::<f64>() / n,
                    avg_time_ms: (runs.iter().map(|r| r.time_ms).sum::<u64>() as f64 / n) as u64,
                }
            })
            .collect()
    }

    /// Prints a summary table to stdout.
    pub fn print_summary(&self) {
        println!("\n{:=<96}", "");
        println!("SCENARIO RESULTS");
        println!("{:=<96}", "");
        println!(
            "{:<10} {:>6} {:>10} {:>10} {:>12} {:>10} {:>10} {:>10}",
            "Scenario", "Runs", "Converged", "Placed", "Attempts", "Porosity", "Time(ms)", "Unexp."
        );
        println!("{:-<96}", "");

        for s in self.summary_by_scenario() {
            println!(
                "{:<10} {:>6} {:>10} {:>10.1} {:>12.1} {:>10.4} {:>10} {:>10}",
                s.scenario,
                s.run_count,
                s.converged_count,
                s.avg_placed,
                s.avg_attempts,
                s.avg_porosity,
                s.avg_time_ms,
                s.unexpected_count
            );
        }

        for run in self.runs.iter().filter(|r| r.error.is_some()) {
            println!(
                "  {} seed={} failed: {}",
                run.scenario,
                run.seed,
                run.error.as_deref().unwrap_or_default()
            );
        }

        println!("{:=<96}\n", "");
    }
}
