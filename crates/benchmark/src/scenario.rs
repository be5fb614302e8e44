//! Built-in packing scenarios.
//!
//! Each scenario pins a configuration and a stop criterion. The runner
//! supplies the seed, so the same scenario can be replayed across many seeds.

use serde::{Deserialize, Serialize};
use spherepack_core::{Axis, Config, SearchStrategy, StopCriterion};

/// A named packing problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Short identifier (e.g., "S01")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// What this scenario exercises
    pub purpose: String,
    /// Packer configuration; the seed is overridden per run
    pub config: Config,
    /// When a run stops
    pub criterion: StopCriterion,
    /// Whether a run is expected to reach its criterion
    pub expect_converged: bool,
}

impl Scenario {
    /// Creates a scenario expected to converge.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        config: Config,
        criterion: StopCriterion,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            purpose: String::new(),
            config,
            criterion,
            expect_converged: true,
        }
    }

    /// Sets the purpose text.
    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    /// Marks the scenario as one that should exhaust its loop budget.
    pub fn expect_exhaustion(mut self) -> Self {
        self.expect_converged = false;
        self
    }

    /// Returns the configuration with `seed` applied.
    pub fn seeded_config(&self, seed: u64) -> Config {
        self.config.clone().with_seed(seed)
    }
}

/// Returns the built-in scenario set.
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "S01",
            "five-unit-spheres",
            Config::new()
                .with_dimensions(10.0, 10.0, 10.0)
                .with_radius_set(vec![1.0])
                .with_min_throat(0.0)
                .with_loop_limit(5000),
            StopCriterion::Count(5),
        )
        .with_purpose("Sparse monodisperse pack converges quickly"),
        Scenario::new(
            "S02",
            "single-fit-domain",
            Config::new()
                .with_dimensions(6.5, 6.5, 6.5)
                .with_radius_set(vec![3.0])
                .with_loop_limit(100),
            StopCriterion::Count(5),
        )
        .with_purpose("Only one sphere fits; the budget must run out")
        .expect_exhaustion(),
        Scenario::new(
            "S03",
            "polydisperse-porosity",
            Config::new()
                .with_dimensions(20.0, 20.0, 20.0)
                .with_radius_range(1.0, 3.0)
                .with_min_throat(0.2)
                .with_loop_limit(10_000),
            StopCriterion::Porosity(0.8),
        )
        .with_purpose("Range radii with a throat stop on porosity"),
        Scenario::new(
            "S04",
            "shrinking-radius-set",
            Config::new()
                .with_dimensions(15.0, 15.0, 15.0)
                .with_radius_set(vec![1.0, 2.0, 3.0])
                .with_shrink_interval(500)
                .with_loop_limit(5000),
            StopCriterion::Porosity(0.7),
        )
        .with_purpose("Dense target that relies on dropping the largest radii"),
        Scenario::new(
            "S05",
            "overlapping-count",
            Config::new()
                .with_dimensions(10.0, 10.0, 10.0)
                .with_radius_set(vec![1.0, 2.0])
                .with_overlapping(true)
                .with_loop_limit(1000),
            StopCriterion::Count(50),
        )
        .with_purpose("Overlap mode accepts every attempt"),
        Scenario::new(
            "S06",
            "boundary-walk-z",
            Config::new()
                .with_dimensions(12.0, 12.0, 24.0)
                .with_radius_set(vec![1.0, 1.5])
                .with_search(SearchStrategy::BoundaryWalk { axis: Axis::Z })
                .with_loop_limit(2000),
            StopCriterion::Count(40),
        )
        .with_purpose("Spheres settle against the far z face"),
    ]
}

/// Looks up a built-in scenario by id or name.
pub fn find_scenario(key: &str) -> Option<Scenario> {
    builtin_scenarios()
        .into_iter()
        .find(|s| s.id.eq_ignore_ascii_case(key) || s.name == key)
}
