//! # Spherepack Core
//!
//! Core types shared by the sphere packers.
//!
//! ## Core Components
//!
//! - **Geometry**: [`Sphere`], [`overlaps`], [`porosity`]
//! - **Radii**: [`RadiusSpec`] and the [`RadiusLadder`] the overlap search walks
//! - **Solver trait**: [`Solver`] with [`StopCriterion`] targets
//! - **Results**: [`PackResult`], [`PackStatus`], [`PackSummary`]
//!
//! ## Configuration
//!
//! Use [`Config`] to describe a run:
//!
//! ```rust
//! use spherepack_core::{Config, SearchStrategy};
//!
//! let config = Config::new()
//!     .with_dimensions(50.0, 50.0, 50.0)
//!     .with_radius_set(vec![1.0, 2.0, 3.0])
//!     .with_min_throat(0.5)
//!     .with_loop_limit(20_000)
//!     .with_search(SearchStrategy::Random);
//!
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod geometry;
pub mod radius;
pub mod result;
pub mod solver;

// Re-exports
pub use error::{Error, Result};
pub use geometry::{
    overlaps, overlaps_any, porosity, round_coordinate, sphere_volume, total_volume, Sphere,
};
pub use radius::{RadiusLadder, RadiusSpec};
pub use result::{PackResult, PackStatus, PackSummary, RadiusCount};
pub use solver::{
    Axis, Config, ProgressCallback, ProgressInfo, SearchStrategy, Solver, StopCriterion,
};
