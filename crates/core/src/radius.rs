//! Allowed radius representations.
//!
//! A pack draws radii either from an explicit finite set or from a range. Both
//! are reduced to a [`RadiusLadder`]: the ascending list of distinct radii that
//! the overlap search walks from largest to smallest.

use crate::{Error, Result};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound on ladder rungs generated from a range.
pub const MAX_LADDER_LEN: usize = 100_000;

/// The radii a pack is allowed to use.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RadiusSpec {
    /// Range `[min, max]` walked in unit steps from `min`.
    ///
    /// Random draws fall in `[min, max)`; the overlap search also tries the
    /// rungs up to and including `max`.
    Range {
        /// Smallest radius.
        min: f64,
        /// Largest radius.
        max: f64,
    },
    /// Explicit set of allowed radii.
    Set(Vec<f64>),
}

impl Default for RadiusSpec {
    fn default() -> Self {
        Self::Set(vec![1.0])
    }
}

impl RadiusSpec {
    /// Creates a range spec.
    pub fn range(min: f64, max: f64) -> Self {
        Self::Range { min, max }
    }

    /// Creates a set spec.
    pub fn set(radii: impl Into<Vec<f64>>) -> Self {
        Self::Set(radii.into())
    }

    /// Creates a single-radius spec (monodisperse pack).
    pub fn single(radius: f64) -> Self {
        Self::Set(vec![radius])
    }

    /// Smallest allowed radius (NaN for an empty set).
    pub fn min(&self) -> f64 {
        match self {
            Self::Range { min, .. } => *min,
            Self::Set(radii) => radii.iter().copied().fold(f64::NAN, f64::min),
        }
    }

    /// Largest allowed radius (NaN for an empty set).
    pub fn max(&self) -> f64 {
        match self {
            Self::Range { max, .. } => *max,
            Self::Set(radii) => radii.iter().copied().fold(f64::NAN, f64::max),
        }
    }

    /// Validates the spec.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Range { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(Error::InvalidConfiguration(
                        "Radius range bounds must be finite".into(),
                    ));
                }
                if *min <= 0.0 {
                    return Err(Error::InvalidConfiguration(format!(
                        "Minimum radius must be positive, got {}",
                        min
                    )));
                }
                if min > max {
                    return Err(Error::InvalidConfiguration(format!(
                        "rmin ({}) must not exceed rmax ({})",
                        min, max
                    )));
                }
                if max - min >= MAX_LADDER_LEN as f64 {
                    return Err(Error::InvalidConfiguration(format!(
                        "Radius range [{}, {}] spans too many unit steps",
                        min, max
                    )));
                }
            }
            Self::Set(radii) => {
                if radii.is_empty() {
                    return Err(Error::InvalidConfiguration(
                        "Radius set must not be empty".into(),
                    ));
                }
                if let Some(bad) = radii.iter().find(|r| !r.is_finite() || **r <= 0.0) {
                    return Err(Error::InvalidConfiguration(format!(
                        "Radii must be positive and finite, got {}",
                        bad
                    )));
                }
            }
        }
        Ok(())
    }

    /// Builds the ladder of candidate radii.
    pub fn ladder(&self) -> Result<RadiusLadder> {
        self.validate()?;

        let ladder = match self {
            Self::Range { min, max } => {
                let rungs = ((max - min).floor() as usize) + 1;
                let radii = (0..rungs).map(|i| min + i as f64).collect();
                let draw_count = ((max - min).ceil() as usize).max(1);
                RadiusLadder { radii, draw_count }
            }
            Self::Set(radii) => {
                let mut radii = radii.clone();
                radii.sort_by(f64::total_cmp);
                radii.dedup();
                let draw_count = radii.len();
                RadiusLadder { radii, draw_count }
            }
        };

        Ok(ladder)
    }
}

/// Ascending list of distinct candidate radii.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusLadder {
    radii: Vec<f64>,
    /// Number of lowest rungs eligible for uniform random draws.
    draw_count: usize,
}

impl RadiusLadder {
    /// Returns the radii in ascending order.
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Number of rungs.
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    /// Returns true if the ladder has no rungs.
    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    /// Smallest rung.
    pub fn min(&self) -> f64 {
        self.radii[0]
    }

    /// Largest rung.
    pub fn max(&self) -> f64 {
        self.radii[self.radii.len() - 1]
    }

    /// Radius at a rung index.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.radii.get(index).copied()
    }

    /// Rung index of an exact radius value.
    pub fn index_of(&self, radius: f64) -> Option<usize> {
        self.radii.iter().position(|r| *r == radius)
    }

    /// Returns true if `radius` is one of the rungs.
    pub fn contains(&self, radius: f64) -> bool {
        self.index_of(radius).is_some()
    }

    /// Draws a rung index uniformly.
    pub fn sample_index<R: Rng>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.draw_count)
    }

    /// Draws a radius uniformly.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        self.radii[self.sample_index(rng)]
    }
}
