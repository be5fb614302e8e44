//! Sphere type and the geometric primitives shared by all packers.

use nalgebra::{distance, Point3};
use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decimal places kept on sampled coordinates.
pub const COORDINATE_DECIMALS: i32 = 6;

/// A placed sphere: center coordinates and radius.
///
/// Fields are plain numbers so downstream consumers (voxelizers, tabular
/// exports) can read them without going through accessors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sphere {
    /// Center x coordinate.
    pub x: f64,
    /// Center y coordinate.
    pub y: f64,
    /// Center z coordinate.
    pub z: f64,
    /// Radius.
    pub r: f64,
}

impl Sphere {
    /// Creates a new sphere.
    pub fn new(x: f64, y: f64, z: f64, r: f64) -> Self {
        Self { x, y, z, r }
    }

    /// Creates a sphere from a center point and radius.
    pub fn from_center(center: Point3<f64>, r: f64) -> Self {
        Self::new(center.x, center.y, center.z, r)
    }

    /// Returns the center as a point.
    pub fn center(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Returns the center as an array.
    pub fn center_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns the sphere volume, 4/3·π·r³.
    pub fn volume(&self) -> f64 {
        sphere_volume(self.r)
    }

    /// Euclidean distance between the two centers.
    pub fn center_distance(&self, other: &Sphere) -> f64 {
        distance(&self.center(), &other.center())
    }

    /// Surface-to-surface gap (negative when the spheres intersect).
    pub fn gap(&self, other: &Sphere) -> f64 {
        self.center_distance(other) - self.r - other.r
    }

    /// Returns the sphere as an `(x, y, z, r)` tuple.
    pub fn to_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.z, self.r)
    }
}

impl From<(f64, f64, f64, f64)> for Sphere {
    fn from((x, y, z, r): (f64, f64, f64, f64)) -> Self {
        Self::new(x, y, z, r)
    }
}

impl From<[f64; 4]> for Sphere {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// Volume of a sphere with radius `r`.
#[inline]
pub fn sphere_volume(r: f64) -> f64 {
    4.0 / 3.0 * PI * r * r * r
}

/// Returns true if the two spheres are closer than their radii plus `min_throat`.
///
/// Touching spheres (distance exactly equal to the allowed distance) do not overlap.
#[inline]
pub fn overlaps(a: &Sphere, b: &Sphere, min_throat: f64) -> bool {
    a.center_distance(b) < a.r + b.r + min_throat
}

/// Returns true if `candidate` overlaps any sphere in `placed`.
pub fn overlaps_any(candidate: &Sphere, placed: &[Sphere], min_throat: f64) -> bool {
    placed.iter().any(|s| overlaps(candidate, s, min_throat))
}

/// Total volume of the given spheres.
pub fn total_volume(spheres: &[Sphere]) -> f64 {
    spheres.iter().map(Sphere::volume).sum()
}

/// Porosity of a pack: `1 - Σ(4/3·π·r³) / volume`.
///
/// Computed from the full list on every call. Overlapping spheres are counted
/// twice, so in overlap-allowed packs this underestimates the true void fraction.
pub fn porosity(spheres: &[Sphere], volume: f64) -> f64 {
    1.0 - total_volume(spheres) / volume
}

/// Rounds a coordinate to [`COORDINATE_DECIMALS`] decimal places.
#[inline]
pub fn round_coordinate(value: f64) -> f64 {
    let scale = 10f64.powi(COORDINATE_DECIMALS);
    (value * scale).round() / scale
}
