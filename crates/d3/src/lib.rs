//! # Spherepack 3D
//!
//! Random sphere packing in rectangular domains, for building synthetic
//! porous media.
//!
//! Spheres are placed one at a time by rejection sampling. A run stops when
//! the porosity drops below a threshold ([`pack_by_porosity`]) or when enough
//! spheres are placed ([`pack_by_count`]), or when the loop budget runs out.
//! An exhausted budget is not an error: the partial pack is returned with
//! [`PackStatus::LoopLimitExceeded`].
//!
//! ```rust
//! use spherepack_d3::{pack_by_count, Config};
//!
//! let config = Config::new()
//!     .with_dimensions(10.0, 10.0, 10.0)
//!     .with_radius_set(vec![1.0])
//!     .with_loop_limit(5000)
//!     .with_seed(42);
//!
//! let result = pack_by_count(&config, 5).unwrap();
//! assert_eq!(result.spheres.len(), 5);
//! ```

pub mod boundary;
pub mod packer;
pub mod sampler;
pub mod search;
pub mod state;
pub mod voxel;

// Re-exports
pub use boundary::{Domain3D, SamplingBox};
pub use packer::SpherePacker;
pub use sampler::{sample_candidate, Candidate, CandidateSampler};
pub use search::{PositionSearch, SearchContext};
pub use state::PackState;
pub use voxel::{voxelize, VoxelGrid};
pub use spherepack_core::{
    Axis, Config, Error, PackResult, PackStatus, PackSummary, ProgressCallback, ProgressInfo,
    RadiusSpec, Result, SearchStrategy, Solver, Sphere, StopCriterion,
};

/// Packs until porosity drops below `porosity_threshold` or the loop budget runs out.
pub fn pack_by_porosity(config: &Config, porosity_threshold: f64) -> Result<PackResult> {
    SpherePacker::new(config.clone()).solve(StopCriterion::Porosity(porosity_threshold))
}

/// Packs until `sphere_count` spheres are placed or the loop budget runs out.
pub fn pack_by_count(config: &Config, sphere_count: usize) -> Result<PackResult> {
    SpherePacker::new(config.clone()).solve(StopCriterion::Count(sphere_count))
}

/// Voxelizes a finished pack using the configuration's domain and scale factor.
pub fn voxelize_result(config: &Config, result: &PackResult) -> Result<VoxelGrid> {
    voxelize(
        &result.spheres,
        &Domain3D::from_config(config),
        config.scale_factor,
    )
}
