//! Position search once a candidate radius is fixed.
//!
//! The placement loop asks a [`PositionSearch`] for a free center for each
//! radius it tries. [`SearchStrategy::Random`] makes a single random draw;
//! [`SearchStrategy::BoundaryWalk`] anchors the sphere at a far face and walks
//! it inward along one axis.

use crate::boundary::Domain3D;
use crate::sampler::CandidateSampler;
use rand::Rng;
use spherepack_core::{overlaps_any, round_coordinate, Axis, SearchStrategy, Sphere};

/// Number of steps a boundary walk divides the walk axis into.
pub const WALK_STEPS: f64 = 100.0;

/// Everything a search needs to know about the current pack.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    /// Candidate sampler for the run.
    pub sampler: &'a CandidateSampler,
    /// Packing domain.
    pub domain: &'a Domain3D,
    /// Spheres accepted so far.
    pub placed: &'a [Sphere],
    /// Minimum gap between spheres.
    pub min_throat: f64,
}

impl SearchContext<'_> {
    /// Returns true if the sphere is clear of every placed sphere.
    pub fn is_free(&self, sphere: &Sphere) -> bool {
        !overlaps_any(sphere, self.placed, self.min_throat)
    }
}

/// Strategy for finding a center for a sphere of fixed radius.
pub trait PositionSearch {
    /// Returns a non-overlapping sphere of radius `r`, or `None` if this attempt failed.
    fn search<R: Rng>(&self, ctx: &SearchContext<'_>, r: f64, rng: &mut R) -> Option<Sphere>;

    /// Returns the first position the search would test, without any overlap check.
    fn propose<R: Rng>(&self, ctx: &SearchContext<'_>, r: f64, rng: &mut R) -> Sphere;
}

impl PositionSearch for SearchStrategy {
    fn search<R: Rng>(&self, ctx: &SearchContext<'_>, r: f64, rng: &mut R) -> Option<Sphere> {
        match *self {
            SearchStrategy::Random => random_position(ctx, r, rng),
            SearchStrategy::BoundaryWalk { axis } => boundary_walk(ctx, axis, r, rng),
        }
    }

    fn propose<R: Rng>(&self, ctx: &SearchContext<'_>, r: f64, rng: &mut R) -> Sphere {
        let mut center = ctx.sampler.sample_position(rng);
        if let SearchStrategy::BoundaryWalk { axis } = *self {
            let i = axis.index();
            center[i] = round_coordinate(ctx.domain.extent(i) - r);
        }
        Sphere::new(center[0], center[1], center[2], r)
    }
}

/// One random center in the sampling box.
fn random_position<R: Rng>(ctx: &SearchContext<'_>, r: f64, rng: &mut R) -> Option<Sphere> {
    let [x, y, z] = ctx.sampler.sample_position(rng);
    let sphere = Sphere::new(x, y, z, r);
    ctx.is_free(&sphere).then_some(sphere)
}

/// Walks from `extent - r` toward zero along `axis` in steps of `extent / 100`.
///
/// The other two coordinates are drawn once. The walk gives up as soon as the
/// coordinate is no longer positive.
fn boundary_walk<R: Rng>(
    ctx: &SearchContext<'_>,
    axis: Axis,
    r: f64,
    rng: &mut R,
) -> Option<Sphere> {
    let i = axis.index();
    let extent = ctx.domain.extent(i);
    let step = extent / WALK_STEPS;
    let mut center = ctx.sampler.sample_position(rng);

    let start = extent - r;
    let mut k = 0u32;
    loop {
        let coord = start - f64::from(k) * step;
        if coord <= 0.0 {
            return None;
        }
        center[i] = round_coordinate(coord);
        let sphere = Sphere::new(center[0], center[1], center[2], r);
        if ctx.is_free(&sphere) {
            return Some(sphere);
        }
        k += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use spherepack_core::Config;

    fn setup() -> (CandidateSampler, Domain3D) {
        let config = Config::new()
            .with_dimensions(10.0, 10.0, 10.0)
            .with_radius_set(vec![1.0]);
        (
            CandidateSampler::new(&config).unwrap(),
            Domain3D::from_config(&config),
        )
    }

    #[test]
    fn test_random_search_on_empty_pack() {
        let (sampler, domain) = setup();
        let ctx = SearchContext {
            sampler: &sampler,
            domain: &domain,
            placed: &[],
            min_throat: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(1);

        let s = SearchStrategy::Random.search(&ctx, 1.0, &mut rng).unwrap();
        assert_eq!(s.r, 1.0);
        assert!(sampler.bounds().contains(s.center_array()));
    }

    #[test]
    fn test_random_search_rejects_overlap() {
        let (sampler, domain) = setup();
        // A sphere covering the whole domain blocks every draw.
        let blocker = [Sphere::new(5.0, 5.0, 5.0, 20.0)];
        let ctx = SearchContext {
            sampler: &sampler,
            domain: &domain,
            placed: &blocker,
            min_throat: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..20 {
            assert!(SearchStrategy::Random.search(&ctx, 1.0, &mut rng).is_none());
        }
    }

    #[test]
    fn test_boundary_walk_starts_at_face() {
        let (sampler, domain) = setup();
        let ctx = SearchContext {
            sampler: &sampler,
            domain: &domain,
            placed: &[],
            min_throat: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(3);
        let walk = SearchStrategy::BoundaryWalk { axis: Axis::Z };

        let s = walk.search(&ctx, 1.0, &mut rng).unwrap();
        assert_eq!(s.z, 9.0);
    }

    #[test]
    fn test_boundary_walk_steps_below_obstacle() {
        let (sampler, domain) = setup();
        // Slab-like blocker occupying the top of the domain down to z = 6.
        let blocker = [Sphere::new(5.0, 5.0, 26.0, 20.0)];
        let ctx = SearchContext {
            sampler: &sampler,
            domain: &domain,
            placed: &blocker,
            min_throat: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(4);
        let walk = SearchStrategy::BoundaryWalk { axis: Axis::Z };

        let s = walk.search(&ctx, 1.0, &mut rng).unwrap();
        assert!(ctx.is_free(&s));
        // Every column is clear at z = 5 and blocked above z = 5.8.
        assert!(s.z >= 4.99 && s.z <= 5.8, "walk stopped at z = {}", s.z);
    }

    #[test]
    fn test_boundary_walk_fails_when_column_blocked() {
        let (sampler, domain) = setup();
        let blocker = [Sphere::new(5.0, 5.0, 5.0, 20.0)];
        let ctx = SearchContext {
            sampler: &sampler,
            domain: &domain,
            placed: &blocker,
            min_throat: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(5);
        let walk = SearchStrategy::BoundaryWalk { axis: Axis::X };

        assert!(walk.search(&ctx, 1.0, &mut rng).is_none());
    }

    #[test]
    fn test_propose() {
        let (sampler, domain) = setup();
        let ctx = SearchContext {
            sampler: &sampler,
            domain: &domain,
            placed: &[],
            min_throat: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(6);

        let s = SearchStrategy::BoundaryWalk { axis: Axis::Y }.propose(&ctx, 1.0, &mut rng);
        assert_eq!(s.y, 9.0);

        let s = SearchStrategy::Random.propose(&ctx, 1.0, &mut rng);
        assert!(sampler.bounds().contains(s.center_array()));
    }
}
