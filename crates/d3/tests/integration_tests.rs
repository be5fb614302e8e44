//! Integration tests for spherepack-d3.

use rand::rngs::StdRng;
use rand::SeedableRng;
use spherepack_core::overlaps;
use spherepack_d3::{
    pack_by_count, pack_by_porosity, voxelize_result, Axis, Config, Domain3D, Error, PackResult,
    PackStatus, SearchStrategy, Solver, Sphere, SpherePacker, StopCriterion,
};

fn pairwise_clear(result: &PackResult, min_throat: f64) -> bool {
    result.spheres.iter().enumerate().all(|(i, a)| {
        result.spheres[i + 1..]
            .iter()
            .all(|b| a.center_distance(b) >= a.r + b.r + min_throat)
    })
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_five_unit_spheres_fit_comfortably() {
        let config = Config::new()
            .with_dimensions(10.0, 10.0, 10.0)
            .with_radius_set(vec![1.0])
            .with_min_throat(0.0)
            .with_loop_limit(5000)
            .with_seed(2024);

        let result = pack_by_count(&config, 5).unwrap();

        assert_eq!(result.spheres.len(), 5);
        assert_eq!(result.status, PackStatus::Converged);
        assert!(pairwise_clear(&result, 0.0));
        assert!(result.attempts < 5000);
    }

    #[test]
    fn test_oversized_radius_is_a_configuration_error() {
        let config = Config::new()
            .with_dimensions(4.0, 4.0, 4.0)
            .with_radius_set(vec![3.0])
            .with_loop_limit(100);

        let err = pack_by_count(&config, 5).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_single_fit_domain_exhausts_budget() {
        let config = Config::new()
            .with_dimensions(6.5, 6.5, 6.5)
            .with_radius_set(vec![3.0])
            .with_loop_limit(100)
            .with_seed(5);

        let result = pack_by_count(&config, 5).unwrap();

        assert_eq!(result.status, PackStatus::LoopLimitExceeded);
        assert_eq!(result.spheres.len(), 1);
        assert!(matches!(
            result.ensure_converged(),
            Err(Error::LoopLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_overlapping_returns_exact_count() {
        let config = Config::new()
            .with_dimensions(6.5, 6.5, 6.5)
            .with_radius_set(vec![3.0])
            .with_overlapping(true)
            .with_loop_limit(100)
            .with_seed(5);

        let result = pack_by_count(&config, 5).unwrap();

        assert_eq!(result.spheres.len(), 5);
        assert!(result.converged());
    }
}

mod property_tests {
    use super::*;

    #[test]
    fn test_no_overlaps_across_seeds() {
        for seed in 0..10 {
            let config = Config::new()
                .with_dimensions(15.0, 15.0, 15.0)
                .with_radius_range(1.0, 3.0)
                .with_min_throat(0.25)
                .with_loop_limit(3000)
                .with_seed(seed);

            let result = pack_by_porosity(&config, 0.7).unwrap();
            assert!(pairwise_clear(&result, 0.25), "seed {} produced overlaps", seed);
        }
    }

    #[test]
    fn test_radii_belong_to_allowed_set() {
        let radii = vec![0.5, 1.25, 2.0];
        let config = Config::new()
            .with_dimensions(20.0, 20.0, 20.0)
            .with_radius_set(radii.clone())
            .with_seed(17);

        let result = pack_by_count(&config, 40).unwrap();
        assert!(result.spheres.iter().all(|s| radii.contains(&s.r)));

        let counted: usize = result.radius_counts.iter().map(|rc| rc.count).sum();
        assert_eq!(counted, result.spheres.len());
    }

    #[test]
    fn test_spheres_inside_domain_with_global_margin() {
        let config = Config::new()
            .with_dimensions(12.0, 16.0, 20.0)
            .with_radius_set(vec![0.5, 2.5])
            .with_seed(23);
        let domain = Domain3D::from_config(&config);

        let result = pack_by_count(&config, 30).unwrap();
        for s in &result.spheres {
            assert!(domain.contains_sphere(s));
            assert!(s.x >= 2.5 && s.x <= 9.5);
            assert!(s.y >= 2.5 && s.y <= 13.5);
            assert!(s.z >= 2.5 && s.z <= 17.5);
        }
    }

    #[test]
    fn test_porosity_in_unit_interval() {
        let config = Config::new()
            .with_dimensions(20.0, 20.0, 20.0)
            .with_radius_set(vec![1.0, 2.0])
            .with_seed(31);

        let result = pack_by_porosity(&config, 0.85).unwrap();

        assert!(result.porosity > 0.0 && result.porosity < 1.0);
        assert!((result.porosity - result.current_porosity()).abs() < 1e-12);
    }

    #[test]
    fn test_porosity_run_never_exceeds_budget() {
        for seed in 0..5 {
            let config = Config::new()
                .with_dimensions(8.0, 8.0, 8.0)
                .with_radius_set(vec![1.0, 1.5])
                .with_loop_limit(250)
                .with_shrink_interval(50)
                .with_seed(seed);

            let result = pack_by_porosity(&config, 0.05).unwrap();
            assert!(result.attempts <= 250);
            assert_eq!(result.status, PackStatus::LoopLimitExceeded);
        }
    }

    #[test]
    fn test_shrink_removes_largest_radii_in_order() {
        let config = Config::new()
            .with_dimensions(60.0, 60.0, 60.0)
            .with_radius_set(vec![1.0, 2.0, 3.0, 4.0])
            .with_shrink_interval(20)
            .with_loop_limit(500)
            .with_seed(3);

        let result = pack_by_count(&config, 100).unwrap();

        assert_eq!(result.dropped_radii, vec![4.0, 3.0, 2.0]);
        // From attempt 61 on only radius 1 is tried; those spheres start at index 60.
        assert!(result.spheres[60..].iter().all(|s| s.r == 1.0));
        // After the first drop (attempt 20) radius 4 is never accepted again.
        assert!(result.spheres[20..].iter().all(|s| s.r != 4.0));
    }

    #[test]
    fn test_caller_rng_is_deterministic() {
        let config = Config::new()
            .with_dimensions(12.0, 12.0, 12.0)
            .with_radius_set(vec![1.0, 2.0]);
        let packer = SpherePacker::new(config);

        let a = packer
            .solve_with_rng(StopCriterion::Count(12), &mut StdRng::seed_from_u64(8))
            .unwrap();
        let b = packer
            .solve_with_rng(StopCriterion::Count(12), &mut StdRng::seed_from_u64(8))
            .unwrap();

        assert_eq!(a.spheres, b.spheres);
    }
}

mod variant_tests {
    use super::*;

    #[test]
    fn test_boundary_walk_along_x() {
        let config = Config::new()
            .with_dimensions(20.0, 10.0, 10.0)
            .with_radius_set(vec![1.0])
            .with_search(SearchStrategy::BoundaryWalk { axis: Axis::X })
            .with_loop_limit(1000)
            .with_seed(13);

        let result = pack_by_count(&config, 10).unwrap();

        assert!(result.converged());
        assert!(pairwise_clear(&result, 0.0));
        assert!(result.spheres.iter().all(|s| s.x > 0.0 && s.x <= 19.0));

        // The first walked sphere sits against the far x face unless the seed blocks it.
        let (seed, first) = (result.spheres[0], result.spheres[1]);
        let at_face = Sphere::new(19.0, first.y, first.z, first.r);
        assert!(first.x == 19.0 || overlaps(&seed, &at_face, 0.0));
    }

    #[test]
    fn test_boundary_walk_overlapping_anchors_at_face() {
        let config = Config::new()
            .with_dimensions(10.0, 10.0, 10.0)
            .with_radius_set(vec![1.0, 2.0])
            .with_search(SearchStrategy::BoundaryWalk { axis: Axis::Z })
            .with_overlapping(true)
            .with_seed(19);

        let result = pack_by_count(&config, 8).unwrap();

        assert_eq!(result.spheres.len(), 8);
        assert!(result.spheres[1..].iter().all(|s| s.z == 10.0 - s.r));
    }

    #[test]
    fn test_voxelized_pack() {
        let config = Config::new()
            .with_dimensions(10.0, 10.0, 10.0)
            .with_radius_set(vec![1.0, 2.0])
            .with_scale_factor(2.0)
            .with_seed(29);

        let result = pack_by_count(&config, 6).unwrap();
        let grid = voxelize_result(&config, &result).unwrap();

        assert_eq!(grid.shape(), [20, 20, 20]);
        assert!(grid.solid_count() > 0);
        // Non-overlapping spheres rasterize to roughly their analytic volume.
        assert!((grid.porosity() - result.porosity).abs() < 0.05);
    }
}
