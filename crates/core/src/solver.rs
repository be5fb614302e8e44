//! Solver traits and configuration.

use crate::radius::RadiusSpec;
use crate::result::PackResult;
use crate::{Error, Result};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    #[default]
    Z,
}

impl Axis {
    /// Index of this axis in an `[x, y, z]` array.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// How a position is searched for once a candidate radius is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchStrategy {
    /// One uniformly random position in the sampling sub-box.
    #[default]
    Random,
    /// Start at the far face of `axis` and step inward by 1/100 of the
    /// extent until a free position is found or the coordinate reaches zero.
    BoundaryWalk {
        /// Axis the walk moves along.
        axis: Axis,
    },
}

/// Stopping criterion for a pack.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopCriterion {
    /// Stop once porosity drops below the threshold.
    Porosity(f64),
    /// Stop once this many spheres have been accepted.
    Count(usize),
}

impl StopCriterion {
    /// Validates the target value.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Porosity(p) => {
                if !(p > 0.0 && p < 1.0) {
                    return Err(Error::InvalidConfiguration(format!(
                        "Porosity threshold must lie in (0, 1), got {}",
                        p
                    )));
                }
            }
            Self::Count(n) => {
                if n == 0 {
                    return Err(Error::InvalidConfiguration(
                        "Target sphere count must be at least 1".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Returns true once the criterion holds for the given pack state.
    pub fn is_met(&self, placed: usize, porosity: f64) -> bool {
        match *self {
            Self::Porosity(threshold) => porosity < threshold,
            Self::Count(n) => placed >= n,
        }
    }

    /// Short name of the criterion.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Porosity(_) => "porosity",
            Self::Count(_) => "count",
        }
    }
}

/// Configuration for a packing run. Read-only once a run starts.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Domain extents `[dx, dy, dz]`.
    pub dimensions: [f64; 3],

    /// Allowed radii.
    pub radii: RadiusSpec,

    /// Minimum surface-to-surface gap between spheres.
    pub min_throat: f64,

    /// Skip all collision checks.
    pub overlapping: bool,

    /// Maximum number of attempts, the seed sphere included.
    pub loop_limit: u64,

    /// Drop the largest remaining candidate radius every this many attempts.
    pub shrink_interval: u64,

    /// Report progress every this many attempts (0 = only at the end).
    pub progress_interval: u64,

    /// Position search used once a radius is fixed.
    pub search: SearchStrategy,

    /// RNG seed (`None` draws from entropy).
    pub seed: Option<u64>,

    /// Scale from domain units to voxels.
    pub scale_factor: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dimensions: [10.0, 10.0, 10.0],
            radii: RadiusSpec::default(),
            min_throat: 0.0,
            overlapping: false,
            loop_limit: 10_000,
            shrink_interval: 2_000,
            progress_interval: 500,
            search: SearchStrategy::default(),
            seed: None,
            scale_factor: 1.0,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the domain extents.
    pub fn with_dimensions(mut self, dx: f64, dy: f64, dz: f64) -> Self {
        self.dimensions = [dx, dy, dz];
        self
    }

    /// Sets the allowed radii.
    pub fn with_radii(mut self, radii: RadiusSpec) -> Self {
        self.radii = radii;
        self
    }

    /// Uses a radius range `[min, max]`.
    pub fn with_radius_range(self, min: f64, max: f64) -> Self {
        self.with_radii(RadiusSpec::range(min, max))
    }

    /// Uses an explicit radius set.
    pub fn with_radius_set(self, radii: impl Into<Vec<f64>>) -> Self {
        self.with_radii(RadiusSpec::set(radii))
    }

    /// Sets the minimum throat between spheres.
    pub fn with_min_throat(mut self, min_throat: f64) -> Self {
        self.min_throat = min_throat;
        self
    }

    /// Allows or forbids overlapping spheres.
    pub fn with_overlapping(mut self, overlapping: bool) -> Self {
        self.overlapping = overlapping;
        self
    }

    /// Sets the loop budget.
    pub fn with_loop_limit(mut self, limit: u64) -> Self {
        self.loop_limit = limit;
        self
    }

    /// Sets the radius-set shrink interval.
    pub fn with_shrink_interval(mut self, interval: u64) -> Self {
        self.shrink_interval = interval;
        self
    }

    /// Sets the progress reporting interval.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Sets the position search strategy.
    pub fn with_search(mut self, search: SearchStrategy) -> Self {
        self.search = search;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the voxelization scale factor.
    pub fn with_scale_factor(mut self, scale: f64) -> Self {
        self.scale_factor = scale;
        self
    }

    /// Domain volume `dx * dy * dz`.
    pub fn volume(&self) -> f64 {
        self.dimensions.iter().product()
    }

    /// Smallest domain extent.
    pub fn min_extent(&self) -> f64 {
        self.dimensions.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.dimensions.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(Error::InvalidDomain(format!(
                "All extents must be positive and finite, got {:?}",
                self.dimensions
            )));
        }

        self.radii.validate()?;

        if !self.min_throat.is_finite() || self.min_throat < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "min_throat must be non-negative, got {}",
                self.min_throat
            )));
        }

        if self.loop_limit == 0 {
            return Err(Error::InvalidConfiguration(
                "loop_limit must be at least 1".into(),
            ));
        }

        if self.shrink_interval == 0 {
            return Err(Error::InvalidConfiguration(
                "shrink_interval must be at least 1".into(),
            ));
        }

        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "scale_factor must be positive, got {}",
                self.scale_factor
            )));
        }

        let rmax = self.radii.max();
        if rmax >= self.min_extent() / 2.0 {
            return Err(Error::InvalidConfiguration(format!(
                "Largest radius {} leaves no room to sample in domain {:?}",
                rmax, self.dimensions
            )));
        }

        Ok(())
    }
}

/// Progress callback for long-running packs.
pub type ProgressCallback = Box<dyn Fn(ProgressInfo) + Send + Sync>;

/// Progress information during packing.
#[derive(Debug, Clone, Default)]
pub struct ProgressInfo {
    /// Attempts performed so far, the seed sphere included.
    pub attempts: u64,
    /// Loop budget.
    pub loop_limit: u64,
    /// Spheres accepted so far.
    pub placed: usize,
    /// Porosity of the current pack.
    pub porosity: f64,
    /// Radius dropped from the candidate list at this attempt, if any.
    pub dropped_radius: Option<f64>,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u64,
    /// Current phase description.
    pub phase: String,
    /// Whether the packer is still running.
    pub running: bool,
}

impl ProgressInfo {
    /// Creates a new progress info with default values.
    pub fn new() -> Self {
        Self {
            running: true,
            ..Default::default()
        }
    }

    /// Sets the attempt info.
    pub fn with_attempts(mut self, attempts: u64, loop_limit: u64) -> Self {
        self.attempts = attempts;
        self.loop_limit = loop_limit;
        self
    }

    /// Sets the placed count.
    pub fn with_placed(mut self, placed: usize) -> Self {
        self.placed = placed;
        self
    }

    /// Sets the porosity.
    pub fn with_porosity(mut self, porosity: f64) -> Self {
        self.porosity = porosity;
        self
    }

    /// Records a dropped radius.
    pub fn with_dropped_radius(mut self, radius: f64) -> Self {
        self.dropped_radius = Some(radius);
        self
    }

    /// Sets the elapsed time.
    pub fn with_elapsed(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self
    }

    /// Sets the phase description.
    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = phase.into();
        self
    }

    /// Marks the packer as finished.
    pub fn finished(mut self) -> Self {
        self.running = false;
        self
    }

    /// Fraction of the loop budget used (0.0 to 1.0).
    pub fn budget_used(&self) -> f64 {
        if self.loop_limit > 0 {
            self.attempts as f64 / self.loop_limit as f64
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for ProgressInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Loop #{:0>5}, n_spheres={:0>5}, porosity={:.4}",
            self.attempts, self.placed, self.porosity
        )
    }
}

/// Trait for sphere packers.
pub trait Solver {
    /// Packs until the criterion holds or the loop budget runs out.
    fn solve(&self, criterion: StopCriterion) -> Result<PackResult>;

    /// Packs with a caller-supplied random number generator.
    fn solve_with_rng<R: Rng>(&self, criterion: StopCriterion, rng: &mut R)
        -> Result<PackResult>;

    /// Packs with a progress callback.
    fn solve_with_progress(
        &self,
        criterion: StopCriterion,
        callback: ProgressCallback,
    ) -> Result<PackResult>;
}
