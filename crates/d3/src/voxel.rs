//! Rasterization of a sphere pack into a 3D occupancy grid.
//!
//! Domain units are multiplied by a scale factor to get voxel units. Scaled
//! radii are rounded to an integer of at least one voxel and scaled centers are
//! rounded to the nearest grid index, so larger scale factors give smoother
//! spheres at the cost of a larger grid.

use crate::boundary::Domain3D;
use spherepack_core::{Error, Result, Sphere};

/// Largest grid this module will allocate.
pub const MAX_VOXELS: usize = 512 * 512 * 512;

/// Dense boolean grid, `true` for solid voxels. Indexed `[i, j, k]` along x, y, z.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    shape: [usize; 3],
    data: Vec<bool>,
}

impl VoxelGrid {
    /// Creates an all-void grid.
    pub fn new(shape: [usize; 3]) -> Self {
        Self {
            shape,
            data: vec![false; shape[0] * shape[1] * shape[2]],
        }
    }

    /// Grid shape.
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Total number of voxels.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the grid has no voxels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn offset(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.shape[1] + j) * self.shape[2] + k
    }

    /// Returns the voxel at `(i, j, k)`, `None` outside the grid.
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<bool> {
        if i < self.shape[0] && j < self.shape[1] && k < self.shape[2] {
            Some(self.data[self.offset(i, j, k)])
        } else {
            None
        }
    }

    /// Marks the voxel at `(i, j, k)` solid. Out-of-grid indices are ignored.
    pub fn set_solid(&mut self, i: usize, j: usize, k: usize) {
        if i < self.shape[0] && j < self.shape[1] && k < self.shape[2] {
            let idx = self.offset(i, j, k);
            self.data[idx] = true;
        }
    }

    /// Number of solid voxels.
    pub fn solid_count(&self) -> usize {
        self.data.iter().filter(|v| **v).count()
    }

    /// Fraction of void voxels.
    pub fn porosity(&self) -> f64 {
        if self.data.is_empty() {
            return 1.0;
        }
        1.0 - self.solid_count() as f64 / self.data.len() as f64
    }

    /// Raw voxel data in `i`-major order.
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    /// Stamps one sphere given in voxel units.
    fn stamp(&mut self, center: [i64; 3], radius: i64) {
        let r2 = radius * radius;
        let lo = |c: i64| (c - radius).max(0);
        let hi = |c: i64, n: usize| (c + radius).min(n as i64 - 1);

        for i in lo(center[0])..=hi(center[0], self.shape[0]) {
            let di = i - center[0];
            for j in lo(center[1])..=hi(center[1], self.shape[1]) {
                let dj = j - center[1];
                for k in lo(center[2])..=hi(center[2], self.shape[2]) {
                    let dk = k - center[2];
                    if di * di + dj * dj + dk * dk <= r2 {
                        self.set_solid(i as usize, j as usize, k as usize);
                    }
                }
            }
        }
    }
}

/// Radius of a sphere in voxel units: rounded, at least one.
pub fn voxel_radius(r: f64, scale_factor: f64) -> i64 {
    ((r * scale_factor).round() as i64).max(1)
}

/// Center of a sphere in voxel indices.
pub fn voxel_center(sphere: &Sphere, scale_factor: f64) -> [i64; 3] {
    sphere
        .center_array()
        .map(|c| (c * scale_factor).round() as i64)
}

/// Rasterizes spheres into a grid covering the domain.
pub fn voxelize(spheres: &[Sphere], domain: &Domain3D, scale_factor: f64) -> Result<VoxelGrid> {
    domain.validate()?;
    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return Err(Error::InvalidConfiguration(format!(
            "scale_factor must be positive, got {}",
            scale_factor
        )));
    }

    let mut shape = [0usize; 3];
    for (i, n) in shape.iter_mut().enumerate() {
        *n = ((domain.extent(i) * scale_factor).ceil() as usize).max(1);
    }

    let total = shape
        .iter()
        .try_fold(1usize, |acc, n| acc.checked_mul(*n))
        .filter(|total| *total <= MAX_VOXELS)
        .ok_or_else(|| {
            Error::InvalidConfiguration(format!(
                "Voxel grid {:?} exceeds {} voxels",
                shape, MAX_VOXELS
            ))
        })?;

    log::debug!(
        "Voxelizing {} spheres into {:?} grid ({} voxels)",
        spheres.len(),
        shape,
        total
    );

    let mut grid = VoxelGrid::new(shape);
    for sphere in spheres {
        grid.stamp(
            voxel_center(sphere, scale_factor),
            voxel_radius(sphere.r, scale_factor),
        );
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_sphere_voxel_count() {
        let domain = Domain3D::new(10.0, 10.0, 10.0);
        let grid = voxelize(&[Sphere::new(5.0, 5.0, 5.0, 2.0)], &domain, 1.0).unwrap();

        // Lattice points with x² + y² + z² <= 4.
        assert_eq!(grid.shape(), [10, 10, 10]);
        assert_eq!(grid.solid_count(), 33);
        assert_relative_eq!(grid.porosity(), 1.0 - 33.0 / 1000.0, epsilon = 1e-12);
        assert_eq!(grid.get(5, 5, 5), Some(true));
        assert_eq!(grid.get(5, 5, 8), Some(false));
    }

    #[test]
    fn test_scale_factor() {
        let domain = Domain3D::new(10.0, 5.0, 2.5);
        let grid = voxelize(&[], &domain, 2.0).unwrap();

        assert_eq!(grid.shape(), [20, 10, 5]);
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid.porosity(), 1.0);
    }

    #[test]
    fn test_voxel_radius_at_least_one() {
        assert_eq!(voxel_radius(0.2, 1.0), 1);
        assert_eq!(voxel_radius(1.4, 1.0), 1);
        assert_eq!(voxel_radius(1.6, 1.0), 2);
        assert_eq!(voxel_radius(1.5, 4.0), 6);
    }

    #[test]
    fn test_sphere_clipped_at_faces() {
        let domain = Domain3D::new(4.0, 4.0, 4.0);
        let grid = voxelize(&[Sphere::new(0.0, 0.0, 0.0, 1.0)], &domain, 1.0).unwrap();

        // Only the octant inside the grid survives: origin plus three neighbors.
        assert_eq!(grid.solid_count(), 4);
    }

    #[test]
    fn test_out_of_range_lookup() {
        let grid = VoxelGrid::new([2, 2, 2]);
        assert_eq!(grid.get(2, 0, 0), None);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_invalid_scale() {
        let domain = Domain3D::new(4.0, 4.0, 4.0);
        assert!(voxelize(&[], &domain, 0.0).is_err());
        assert!(voxelize(&[], &domain, 1e6).is_err());
    }
}
