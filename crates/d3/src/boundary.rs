//! Rectangular packing domain.

use nalgebra::Vector3;
use spherepack_core::{Config, Error, Result, Sphere};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The box `[0, dx] × [0, dy] × [0, dz]` spheres are packed into.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Domain3D {
    /// Extents (dx, dy, dz).
    dimensions: Vector3<f64>,
}

impl Domain3D {
    /// Creates a new domain with the given extents.
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            dimensions: Vector3::new(dx, dy, dz),
        }
    }

    /// Creates the domain described by a configuration.
    pub fn from_config(config: &Config) -> Self {
        let [dx, dy, dz] = config.dimensions;
        Self::new(dx, dy, dz)
    }

    /// Returns the extents.
    pub fn dimensions(&self) -> &Vector3<f64> {
        &self.dimensions
    }

    /// Returns the extent along x.
    pub fn dx(&self) -> f64 {
        self.dimensions.x
    }

    /// Returns the extent along y.
    pub fn dy(&self) -> f64 {
        self.dimensions.y
    }

    /// Returns the extent along z.
    pub fn dz(&self) -> f64 {
        self.dimensions.z
    }

    /// Returns the extent along an axis index (0 = x, 1 = y, 2 = z).
    pub fn extent(&self, axis: usize) -> f64 {
        self.dimensions[axis]
    }

    /// Smallest extent.
    pub fn min_extent(&self) -> f64 {
        self.dimensions.min()
    }

    /// Domain volume.
    pub fn volume(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Validates the extents.
    pub fn validate(&self) -> Result<()> {
        if self.dimensions.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(Error::InvalidDomain(
                "All extents must be positive and finite".into(),
            ));
        }
        Ok(())
    }

    /// Returns true if the point lies inside the domain (faces included).
    pub fn contains_point(&self, point: [f64; 3]) -> bool {
        (0..3).all(|i| point[i] >= 0.0 && point[i] <= self.dimensions[i])
    }

    /// Returns true if the whole sphere lies inside the domain.
    pub fn contains_sphere(&self, sphere: &Sphere) -> bool {
        let c = sphere.center_array();
        (0..3).all(|i| c[i] - sphere.r >= 0.0 && c[i] + sphere.r <= self.dimensions[i])
    }

    /// Sub-box of centers that keep a sphere of radius `margin` inside the domain.
    ///
    /// Fails when `margin` is at least half of any extent, since the interval
    /// along that axis would be empty or inverted.
    pub fn sampling_box(&self, margin: f64) -> Result<SamplingBox> {
        self.validate()?;

        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        for i in 0..3 {
            let extent = self.dimensions[i];
            if margin >= extent / 2.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "Radius {} leaves an empty sampling interval along axis {} (extent {})",
                    margin, i, extent
                )));
            }
            min[i] = margin;
            max[i] = extent - margin;
        }

        Ok(SamplingBox { min, max })
    }
}

/// Axis-aligned box that candidate centers are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingBox {
    /// Minimum corner.
    pub min: [f64; 3],
    /// Maximum corner.
    pub max: [f64; 3],
}

impl SamplingBox {
    /// Returns true if the point lies inside the box.
    pub fn contains(&self, point: [f64; 3]) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// Side lengths of the box.
    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}
