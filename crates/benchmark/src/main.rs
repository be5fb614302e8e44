//! Sphere pack runner CLI

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use spherepack_benchmark::{
    builtin_scenarios, find_scenario, BenchmarkConfig, BenchmarkRunner,
};
use spherepack_d3::{
    voxelize_result, Axis, Config, PackResult, PackSummary, ProgressInfo, SearchStrategy, Solver,
    SpherePacker, StopCriterion,
};

#[derive(Parser)]
#[command(name = "pack-runner")]
#[command(about = "Random sphere packing for synthetic porous media")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack until porosity drops below a threshold
    Porosity {
        /// Target porosity in (0, 1)
        threshold: f64,

        #[command(flatten)]
        pack: PackArgs,
    },

    /// Pack a fixed number of spheres
    Count {
        /// Number of spheres to place
        count: usize,

        #[command(flatten)]
        pack: PackArgs,
    },

    /// Pack, then rasterize the result into a voxel grid
    Voxel {
        /// Stop on porosity instead of count
        #[arg(long, conflicts_with = "count")]
        porosity: Option<f64>,

        /// Stop after this many spheres
        #[arg(long)]
        count: Option<usize>,

        #[command(flatten)]
        pack: PackArgs,
    },

    /// Run the built-in scenarios across seeds
    Scenarios {
        /// Run a single scenario by id or name
        #[arg(short = 'i', long)]
        scenario: Option<String>,

        /// Seeds per scenario
        #[arg(short, long, default_value = "5")]
        runs: usize,

        /// First seed
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only list the scenarios
        #[arg(long)]
        list: bool,

        /// Suppress per-run lines
        #[arg(short, long)]
        quiet: bool,
    },
}

#[derive(Args)]
struct PackArgs {
    /// Domain extents along x, y and z
    #[arg(long, num_args = 3, value_names = ["DX", "DY", "DZ"], default_values_t = vec![10.0, 10.0, 10.0])]
    dims: Vec<f64>,

    /// Allowed radii, comma separated
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["rmin", "rmax"])]
    radii: Vec<f64>,

    /// Smallest radius of an integer range
    #[arg(long, requires = "rmax")]
    rmin: Option<f64>,

    /// Largest radius of an integer range
    #[arg(long, requires = "rmin")]
    rmax: Option<f64>,

    /// Minimum surface gap between spheres
    #[arg(long, default_value = "0.0")]
    throat: f64,

    /// Accept overlapping spheres
    #[arg(long)]
    overlapping: bool,

    /// Maximum number of attempts
    #[arg(long, default_value = "10000")]
    loop_limit: u64,

    /// Attempts between drops of the largest radius
    #[arg(long, default_value = "2000")]
    shrink_interval: u64,

    /// Attempts between progress reports (0 disables)
    #[arg(long, default_value = "500")]
    progress_interval: u64,

    /// Position search
    #[arg(long, value_enum, default_value = "random")]
    search: SearchArg,

    /// Walk axis for boundary-walk search
    #[arg(long, value_enum, default_value = "z")]
    axis: AxisArg,

    /// Voxels per unit length
    #[arg(long, default_value = "1.0")]
    scale: f64,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print progress reports to stderr
    #[arg(long)]
    progress: bool,

    /// Print the full result as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SearchArg {
    /// Uniform random centers
    Random,
    /// Walk from the far face toward the origin
    BoundaryWalk,
}

#[derive(Clone, Copy, ValueEnum)]
enum AxisArg {
    X,
    Y,
    Z,
}

impl From<AxisArg> for Axis {
    fn from(arg: AxisArg) -> Self {
        match arg {
            AxisArg::X => Axis::X,
            AxisArg::Y => Axis::Y,
            AxisArg::Z => Axis::Z,
        }
    }
}

impl PackArgs {
    fn to_config(&self) -> Config {
        let search = match self.search {
            SearchArg::Random => SearchStrategy::Random,
            SearchArg::BoundaryWalk => SearchStrategy::BoundaryWalk {
                axis: self.axis.into(),
            },
        };

        let config = Config::new()
            .with_dimensions(self.dims[0], self.dims[1], self.dims[2])
            .with_min_throat(self.throat)
            .with_overlapping(self.overlapping)
            .with_loop_limit(self.loop_limit)
            .with_shrink_interval(self.shrink_interval)
            .with_progress_interval(self.progress_interval)
            .with_search(search)
            .with_scale_factor(self.scale);

        let config = match (self.rmin, self.rmax) {
            (Some(min), Some(max)) => config.with_radius_range(min, max),
            _ if !self.radii.is_empty() => config.with_radius_set(self.radii.clone()),
            _ => config,
        };

        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    fn pack(&self, criterion: StopCriterion) -> anyhow::Result<(Config, PackResult)> {
        let config = self.to_config();
        let packer = SpherePacker::new(config.clone());

        let result = if self.progress {
            packer.solve_with_progress(
                criterion,
                Box::new(|info: ProgressInfo| eprintln!("{}", info)),
            )?
        } else {
            packer.solve(criterion)?
        };

        Ok((config, result))
    }

    fn report(&self, result: &PackResult) -> anyhow::Result<()> {
        if self.json {
            eprintln!("{}", PackSummary::from(result));
            println!("{}", serde_json::to_string_pretty(result)?);
        } else {
            println!("{}", PackSummary::from(result));
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Porosity { threshold, pack } => {
            let (_, result) = pack.pack(StopCriterion::Porosity(threshold))?;
            pack.report(&result)?;
        }

        Commands::Count { count, pack } => {
            let (_, result) = pack.pack(StopCriterion::Count(count))?;
            pack.report(&result)?;
        }

        Commands::Voxel {
            porosity,
            count,
            pack,
        } => {
            let criterion = match (porosity, count) {
                (Some(p), _) => StopCriterion::Porosity(p),
                (None, Some(n)) => StopCriterion::Count(n),
                (None, None) => anyhow::bail!("voxel needs --porosity or --count"),
            };

            let (config, result) = pack.pack(criterion)?;
            pack.report(&result)?;

            let grid = voxelize_result(&config, &result)?;
            let [nx, ny, nz] = grid.shape();
            eprintln!(
                "Voxel grid {}x{}x{}: solid={}, voxel porosity={:.4}, analytic porosity={:.4}",
                nx,
                ny,
                nz,
                grid.solid_count(),
                grid.porosity(),
                result.porosity
            );
        }

        Commands::Scenarios {
            scenario,
            runs,
            seed,
            output,
            list,
            quiet,
        } => {
            let scenarios = match scenario {
                Some(key) => match find_scenario(&key) {
                    Some(s) => vec![s],
                    None => anyhow::bail!("Unknown scenario: {}", key),
                },
                None => builtin_scenarios(),
            };

            if list {
                println!("Built-in scenarios:");
                println!("===================");
                for s in &scenarios {
                    println!("  {} {:<24} {}", s.id, s.name, s.purpose);
                }
                return Ok(());
            }

            let config = BenchmarkConfig::new()
                .with_base_seed(seed)
                .with_runs_per_scenario(runs)
                .with_progress(!quiet);

            let runner = BenchmarkRunner::new(config);
            let results = runner.run_all(&scenarios);

            results.print_summary();

            if let Some(path) = output {
                results.save_json(&path)?;
                println!("Results saved to: {}", path.display());
            }

            if !results.all_as_expected() {
                anyhow::bail!("Some scenario runs did not match their expected outcome");
            }
        }
    }

    Ok(())
}
