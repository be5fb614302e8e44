//! Random candidate generation.
//!
//! Centers are always drawn from the sub-box sized for the largest allowed
//! radius, whatever radius the candidate ends up with, so small spheres never
//! sit closer to a face than the largest sphere could.

use crate::boundary::{Domain3D, SamplingBox};
use rand::Rng;
use spherepack_core::{round_coordinate, Config, RadiusLadder, Result, Sphere};

/// A sampled sphere together with its rung on the radius ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// The sampled sphere.
    pub sphere: Sphere,
    /// Index of the sphere's radius on the ladder.
    pub rung: usize,
}

/// Draws random radii and centers for one configuration.
#[derive(Debug, Clone)]
pub struct CandidateSampler {
    ladder: RadiusLadder,
    bounds: SamplingBox,
}

impl CandidateSampler {
    /// Creates a sampler for the configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let ladder = config.radii.ladder()?;
        let domain = Domain3D::from_config(config);
        let bounds = domain.sampling_box(config.radii.max())?;
        Ok(Self { ladder, bounds })
    }

    /// Returns the radius ladder.
    pub fn ladder(&self) -> &RadiusLadder {
        &self.ladder
    }

    /// Returns the center sampling box.
    pub fn bounds(&self) -> &SamplingBox {
        &self.bounds
    }

    /// Draws a center uniformly from the sampling box, rounded to 6 decimals.
    pub fn sample_position<R: Rng>(&self, rng: &mut R) -> [f64; 3] {
        let mut p = [0.0; 3];
        for (i, coord) in p.iter_mut().enumerate() {
            *coord = round_coordinate(rng.gen_range(self.bounds.min[i]..self.bounds.max[i]));
        }
        p
    }

    /// Draws a rung index uniformly.
    pub fn sample_rung<R: Rng>(&self, rng: &mut R) -> usize {
        self.ladder.sample_index(rng)
    }

    /// Draws a full candidate: radius first, then center.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Candidate {
        let rung = self.sample_rung(rng);
        let r = self.ladder.radii()[rung];
        let [x, y, z] = self.sample_position(rng);
        Candidate {
            sphere: Sphere::new(x, y, z, r),
            rung,
        }
    }
}

/// Draws one random sphere for the configuration.
pub fn sample_candidate<R: Rng>(config: &Config, rng: &mut R) -> Result<Sphere> {
    config.validate()?;
    Ok(CandidateSampler::new(config)?.sample(rng).sphere)
}
