//! Mutable accumulator for one packing run.

use spherepack_core::{
    porosity, PackResult, PackStatus, RadiusCount, RadiusLadder, Sphere, StopCriterion,
};

/// Spheres, counters and remaining candidate radii of a run in progress.
///
/// Spheres are only ever appended, so their order is the placement order.
#[derive(Debug, Clone)]
pub struct PackState {
    ladder: RadiusLadder,
    spheres: Vec<Sphere>,
    attempts: u64,
    counts: Vec<usize>,
    /// Rung indices still tried by the overlap search, ascending; the last
    /// entry is the largest radius.
    candidates: Vec<usize>,
    dropped: Vec<f64>,
    volume: f64,
}

impl PackState {
    /// Creates an empty state.
    pub fn new(ladder: RadiusLadder, volume: f64) -> Self {
        let rungs = ladder.len();
        Self {
            ladder,
            spheres: Vec::new(),
            attempts: 0,
            counts: vec![0; rungs],
            candidates: (0..rungs).collect(),
            dropped: Vec::new(),
            volume,
        }
    }

    /// Accepted spheres in placement order.
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Number of accepted spheres.
    pub fn placed(&self) -> usize {
        self.spheres.len()
    }

    /// Attempts so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Porosity recomputed from the full sphere list.
    pub fn porosity(&self) -> f64 {
        porosity(&self.spheres, self.volume)
    }

    /// The radius ladder of the run.
    pub fn ladder(&self) -> &RadiusLadder {
        &self.ladder
    }

    /// Remaining candidate rungs, ascending.
    pub fn candidates(&self) -> &[usize] {
        &self.candidates
    }

    /// Remaining candidate radii, largest first.
    pub fn candidate_radii(&self) -> Vec<f64> {
        self.candidates
            .iter()
            .rev()
            .map(|&rung| self.ladder.radii()[rung])
            .collect()
    }

    /// Radii dropped so far.
    pub fn dropped(&self) -> &[f64] {
        &self.dropped
    }

    /// Counts one attempt and returns the new attempt number.
    pub fn record_attempt(&mut self) -> u64 {
        self.attempts += 1;
        self.attempts
    }

    /// Appends an accepted sphere at the given rung.
    pub fn accept(&mut self, sphere: Sphere, rung: usize) {
        debug_assert_eq!(self.ladder.get(rung), Some(sphere.r));
        self.counts[rung] += 1;
        self.spheres.push(sphere);
    }

    /// Drops the largest remaining candidate radius while more than one remains.
    pub fn shrink(&mut self) -> Option<f64> {
        if self.candidates.len() <= 1 {
            return None;
        }
        let rung = self.candidates.pop()?;
        let radius = self.ladder.radii()[rung];
        self.dropped.push(radius);
        Some(radius)
    }

    /// Per-radius counts, ascending by radius.
    pub fn radius_counts(&self) -> Vec<RadiusCount> {
        self.ladder
            .radii()
            .iter()
            .zip(&self.counts)
            .map(|(&radius, &count)| RadiusCount { radius, count })
            .collect()
    }

    /// Consumes the state into a result.
    pub fn into_result(self, target: StopCriterion, status: PackStatus) -> PackResult {
        let radius_counts = self.radius_counts();
        let porosity = self.porosity();
        PackResult {
            spheres: self.spheres,
            attempts: self.attempts,
            status,
            target,
            volume: self.volume,
            porosity,
            radius_counts,
            dropped_radii: self.dropped,
            computation_time_ms: 0,
        }
    }
}
