//! Runs scenarios across seeds.

use crate::result::{BenchmarkResult, RunResult};
use crate::scenario::Scenario;
use instant::Instant;
use spherepack_core::Solver;
use spherepack_d3::SpherePacker;

/// Configuration for benchmark runs.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// First seed; run `i` uses `base_seed + i`.
    pub base_seed: u64,
    /// Number of seeds per scenario.
    pub runs_per_scenario: usize,
    /// Whether to print per-run lines.
    pub show_progress: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            base_seed: 0,
            runs_per_scenario: 5,
            show_progress: true,
        }
    }
}

impl BenchmarkConfig {
    /// Creates a new benchmark configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first seed.
    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Sets the number of runs per scenario.
    pub fn with_runs_per_scenario(mut self, n: usize) -> Self {
        self.runs_per_scenario = n;
        self
    }

    /// Enables or disables per-run output.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Seeds used for each scenario.
    pub fn seeds(&self) -> impl Iterator<Item = u64> {
        let base = self.base_seed;
        (0..self.runs_per_scenario as u64).map(move |i| base.wrapping_add(i))
    }
}

/// Benchmark runner.
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
}

impl BenchmarkRunner {
    /// Creates a new benchmark runner.
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    /// Runs one scenario for every configured seed.
    pub fn run_scenario(&self, scenario: &Scenario) -> BenchmarkResult {
        let mut results = BenchmarkResult::new();

        if self.config.show_progress {
            println!("\nScenario {} ({})", scenario.id, scenario.name);
            if !scenario.purpose.is_empty() {
                println!("  {}", scenario.purpose);
            }
        }

        for seed in self.config.seeds() {
            let packer = SpherePacker::new(scenario.seeded_config(seed));

            let start = Instant::now();
            let outcome = packer.solve(scenario.criterion);
            let elapsed = start.elapsed().as_millis() as u64;

            let run = match outcome {
                Ok(pack) => {
                    RunResult::from_pack(&scenario.id, seed, scenario.expect_converged, &pack, elapsed)
                }
                Err(e) => {
                    log::warn!("Scenario {} seed {} failed: {}", scenario.id, seed, e);
                    RunResult::failed(&scenario.id, seed, e)
                }
            };

            if self.config.show_progress {
                println!(
                    "    seed {}: placed={}, attempts={}, porosity={:.4}, converged={}, time={}ms",
                    seed, run.placed, run.attempts, run.porosity, run.converged, run.time_ms
                );
            }

            results.add_run(run);
        }

        results
    }

    /// Runs every scenario and merges the results.
    pub fn run_all(&self, scenarios: &[Scenario]) -> BenchmarkResult {
        let mut all = BenchmarkResult::new();
        for scenario in scenarios {
            all.merge(self.run_scenario(scenario));
        }
        all
    }
}
