//! Rejection-sampling sphere packer.

use crate::boundary::Domain3D;
use crate::sampler::CandidateSampler;
use crate::search::{PositionSearch, SearchContext};
use crate::state::PackState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spherepack_core::solver::{Config, ProgressCallback, ProgressInfo, Solver, StopCriterion};
use spherepack_core::{PackResult, PackStatus, PackSummary, Result};

use std::time::Instant;

/// Random sphere packer.
///
/// Seeds the pack with one random sphere, then repeats an attempt step until
/// the stopping criterion holds or the loop budget is spent. With overlaps
/// disallowed, each attempt tries the remaining candidate radii from largest
/// to smallest and keeps the first one that fits; every `shrink_interval`
/// attempts the largest candidate is dropped for the rest of the run.
pub struct SpherePacker {
    config: Config,
}

impl SpherePacker {
    /// Creates a new packer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Creates a packer with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Runs the placement loop.
    fn run<R: Rng>(
        &self,
        criterion: StopCriterion,
        rng: &mut R,
        callback: Option<&ProgressCallback>,
    ) -> Result<PackResult> {
        self.config.validate()?;
        criterion.validate()?;

        let start = Instant::now();
        let config = &self.config;
        let domain = Domain3D::from_config(config);
        let sampler = CandidateSampler::new(config)?;
        let mut state = PackState::new(sampler.ladder().clone(), domain.volume());

        log::debug!(
            "Packing {:?} domain by {} with radii {:?}, overlapping={}, loop_limit={}",
            config.dimensions,
            criterion.name(),
            sampler.ladder().radii(),
            config.overlapping,
            config.loop_limit
        );

        // Seed sphere counts as the first attempt.
        let seed = sampler.sample(rng);
        state.record_attempt();
        state.accept(seed.sphere, seed.rung);

        while !criterion.is_met(state.placed(), state.porosity()) {
            if state.attempts() >= config.loop_limit {
                break;
            }
            let attempt = state.record_attempt();

            if config.overlapping {
                self.place_unchecked(&sampler, &domain, &mut state, rng);
            } else {
                self.place_checked(&sampler, &domain, &mut state, rng);

                if attempt % config.shrink_interval == 0 {
                    if let Some(radius) = state.shrink() {
                        log::debug!(
                            "Removed {} from the list of sphere sizes at loop {}",
                            radius,
                            attempt
                        );
                        if let Some(cb) = callback {
                            cb(progress(&state, config, &start)
                                .with_phase("Radius dropped")
                                .with_dropped_radius(radius));
                        }
                    }
                }
            }

            if config.progress_interval > 0 && attempt % config.progress_interval == 0 {
                let info = progress(&state, config, &start).with_phase("Packing");
                log::debug!("{}", info);
                if let Some(cb) = callback {
                    cb(info);
                }
            }
        }

        let status = if criterion.is_met(state.placed(), state.porosity()) {
            PackStatus::Converged
        } else {
            log::warn!(
                "Reached loop limit of {} before meeting the {} target ({} spheres placed)",
                config.loop_limit,
                criterion.name(),
                state.placed()
            );
            PackStatus::LoopLimitExceeded
        };

        let final_info = progress(&state, config, &start)
            .with_phase("Complete")
            .finished();

        let mut result = state.into_result(criterion, status);
        result.computation_time_ms = start.elapsed().as_millis() as u64;

        log::info!("{}", PackSummary::from(&result));
        if let Some(cb) = callback {
            cb(final_info);
        }

        Ok(result)
    }

    /// Attempt step with collision checks: largest remaining radius first.
    fn place_checked<R: Rng>(
        &self,
        sampler: &CandidateSampler,
        domain: &Domain3D,
        state: &mut PackState,
        rng: &mut R,
    ) {
        let accepted = {
            let ctx = SearchContext {
                sampler,
                domain,
                placed: state.spheres(),
                min_throat: self.config.min_throat,
            };
            state.candidates().iter().rev().find_map(|&rung| {
                let r = state.ladder().radii()[rung];
                self.config
                    .search
                    .search(&ctx, r, &mut *rng)
                    .map(|sphere| (sphere, rung))
            })
        };

        if let Some((sphere, rung)) = accepted {
            state.accept(sphere, rung);
        }
    }

    /// Attempt step without collision checks: random radius, always accepted.
    fn place_unchecked<R: Rng>(
        &self,
        sampler: &CandidateSampler,
        domain: &Domain3D,
        state: &mut PackState,
        rng: &mut R,
    ) {
        let rung = sampler.sample_rung(rng);
        let r = sampler.ladder().radii()[rung];
        let sphere = {
            let ctx = SearchContext {
                sampler,
                domain,
                placed: state.spheres(),
                min_throat: self.config.min_throat,
            };
            self.config.search.propose(&ctx, r, rng)
        };
        state.accept(sphere, rung);
    }
}

fn progress(state: &PackState, config: &Config, start: &Instant) -> ProgressInfo {
    ProgressInfo::new()
        .with_attempts(state.attempts(), config.loop_limit)
        .with_placed(state.placed())
        .with_porosity(state.porosity())
        .with_elapsed(start.elapsed().as_millis() as u64)
}

impl Solver for SpherePacker {
    fn solve(&self, criterion: StopCriterion) -> Result<PackResult> {
        let mut rng = self.rng();
        self.run(criterion, &mut rng, None)
    }

    fn solve_with_rng<R: Rng>(&self, criterion: StopCriterion, rng: &mut R) -> Result<PackResult> {
        self.run(criterion, rng, None)
    }

    fn solve_with_progress(
        &self,
        criterion: StopCriterion,
        callback: ProgressCallback,
    ) -> Result<PackResult> {
        let mut rng = self.rng();
        self.run(criterion, &mut rng, Some(&callback))
    }
}
