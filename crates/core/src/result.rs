//! Pack result representation.

use crate::geometry::{porosity, total_volume, Sphere};
use crate::solver::StopCriterion;
use crate::{Error, Result};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a pack ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PackStatus {
    /// The stopping criterion was met.
    #[default]
    Converged,
    /// The loop budget ran out first; the spheres are a partial pack.
    LoopLimitExceeded,
}

/// Number of spheres accepted at one radius.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RadiusCount {
    /// Radius value.
    pub radius: f64,
    /// Spheres accepted at this radius.
    pub count: usize,
}

/// Result of a packing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackResult {
    /// Accepted spheres in placement order.
    pub spheres: Vec<Sphere>,

    /// Attempts performed, the seed sphere included.
    pub attempts: u64,

    /// Whether the criterion was met.
    pub status: PackStatus,

    /// Criterion the run was asked to meet.
    pub target: StopCriterion,

    /// Domain volume used for porosity.
    pub volume: f64,

    /// Final porosity.
    pub porosity: f64,

    /// Accepted spheres per candidate radius, ascending by radius.
    pub radius_counts: Vec<RadiusCount>,

    /// Radii dropped by the shrink policy, in drop order.
    pub dropped_radii: Vec<f64>,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl PackResult {
    /// Creates a new empty result for the given target and domain volume.
    pub fn new(target: StopCriterion, volume: f64) -> Self {
        Self {
            spheres: Vec::new(),
            attempts: 0,
            status: PackStatus::default(),
            target,
            volume,
            porosity: 1.0,
            radius_counts: Vec::new(),
            dropped_radii: Vec::new(),
            computation_time_ms: 0,
        }
    }

    /// Number of accepted spheres.
    pub fn placed_count(&self) -> usize {
        self.spheres.len()
    }

    /// Returns true if the stopping criterion was met.
    pub fn converged(&self) -> bool {
        self.status == PackStatus::Converged
    }

    /// Returns the result, or [`Error::LoopLimitExceeded`] if the run did not converge.
    pub fn ensure_converged(self) -> Result<Self> {
        match self.status {
            PackStatus::Converged => Ok(self),
            PackStatus::LoopLimitExceeded => Err(Error::LoopLimitExceeded {
                attempts: self.attempts,
                placed: self.spheres.len(),
            }),
        }
    }

    /// Porosity recomputed from the sphere list.
    pub fn current_porosity(&self) -> f64 {
        porosity(&self.spheres, self.volume)
    }

    /// Fraction of the domain occupied by spheres (overlaps counted twice).
    pub fn solid_fraction(&self) -> f64 {
        total_volume(&self.spheres) / self.volume
    }

    /// Count for one radius value, zero if it is not a candidate.
    pub fn count_for_radius(&self, radius: f64) -> usize {
        self.radius_counts
            .iter()
            .find(|rc| rc.radius == radius)
            .map_or(0, |rc| rc.count)
    }

    /// Consumes the result and returns the sphere list.
    pub fn into_spheres(self) -> Vec<Sphere> {
        self.spheres
    }
}

/// Summary statistics for a pack result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackSummary {
    /// Criterion name.
    pub criterion: String,
    /// Attempts performed.
    pub attempts: u64,
    /// Spheres placed.
    pub placed: usize,
    /// Final porosity.
    pub porosity: f64,
    /// Whether the criterion was met.
    pub converged: bool,
    /// Per-radius counts.
    pub radius_counts: Vec<RadiusCount>,
    /// Computation time in milliseconds.
    pub time_ms: u64,
}

impl From<&PackResult> for PackSummary {
    fn from(result: &PackResult) -> Self {
        Self {
            criterion: result.target.name().to_string(),
            attempts: result.attempts,
            placed: result.spheres.len(),
            porosity: result.porosity,
            converged: result.converged(),
            radius_counts: result.radius_counts.clone(),
            time_ms: result.computation_time_ms,
        }
    }
}

impl fmt::Display for PackSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loop #{:0>5}, n_spheres={:0>5}, porosity={:.4}",
            self.attempts, self.placed, self.porosity
        )?;
        if !self.converged {
            write!(f, " (loop limit reached)")?;
        }
        write!(f, ", counts={{")?;
        for (i, rc) in self.radius_counts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", rc.radius, rc.count)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_result() -> PackResult {
        let mut result = PackResult::new(StopCriterion::Count(2), 1000.0);
        result.spheres.push(Sphere::new(2.0, 2.0, 2.0, 1.0));
        result.spheres.push(Sphere::new(6.0, 6.0, 6.0, 2.0));
        result.attempts = 12;
        result.porosity = result.current_porosity();
        result.radius_counts = vec![
            RadiusCount { radius: 1.0, count: 1 },
            RadiusCount { radius: 2.0, count: 1 },
        ];
        result
    }

    #[test]
    fn test_result_new() {
        let result = PackResult::new(StopCriterion::Porosity(0.5), 1000.0);
        assert!(result.spheres.is_empty());
        assert!(result.converged());
        assert_eq!(result.porosity, 1.0);
    }

    #[test]
    fn test_result_counts() {
        let result = sample_result();
        assert_eq!(result.placed_count(), 2);
        assert_eq!(result.count_for_radius(2.0), 1);
        assert_eq!(result.count_for_radius(3.0), 0);
        assert_relative_eq!(result.porosity + result.solid_fraction(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ensure_converged() {
        let result = sample_result();
        assert!(result.clone().ensure_converged().is_ok());

        let mut partial = result;
        partial.status = PackStatus::LoopLimitExceeded;
        match partial.ensure_converged() {
            Err(Error::LoopLimitExceeded { attempts, placed }) => {
                assert_eq!(attempts, 12);
                assert_eq!(placed, 2);
            }
            other => panic!("expected loop limit error, got {:?}", other),
        }
    }

    #[test]
    fn test_summary() {
        let result = sample_result();
        let summary = PackSummary::from(&result);

        assert_eq!(summary.criterion, "count");
        assert_eq!(summary.placed, 2);
        assert!(summary.converged);

        let line = summary.to_string();
        assert!(line.starts_with("Loop #00012, n_spheres=00002"));
        assert!(line.ends_with("counts={1: 1, 2: 1}"));
    }

    #[test]
    fn test_summary_flags_budget_exhaustion() {
        let mut result = sample_result();
        result.status = PackStatus::LoopLimitExceeded;
        let line = PackSummary::from(&result).to_string();
        assert!(line.contains("(loop limit reached)"));
    }
}
