//! Scenario benchmarks for the sphere packer.
//!
//! This crate provides:
//! - A built-in set of packing scenarios
//! - A runner that replays scenarios across seeds
//! - Result recording, per-scenario statistics and JSON export

mod result;
mod runner;
mod scenario;

pub use result::{BenchmarkResult, RunResult, ScenarioSummary};
pub use runner::{BenchmarkConfig, BenchmarkRunner};
pub use scenario::{builtin_scenarios, find_scenario, Scenario};
