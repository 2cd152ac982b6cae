use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use tracing::{debug, info};

use crease::demo::{generate, GeneratorOptions, DEFAULT_SEED};
use crease::display::DisplayRangeInclusive;
use crease::domain::Season;
use crease::eligibility::SuspensionConfig;
use crease::file::{load_suspensions, ToJsonFile};
use crease::store::RejectedDataset;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// seed for the random number generator
    #[clap(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// first season to generate
    #[clap(long, default_value_t = 2008)]
    from: Season,

    /// last season to generate
    #[clap(long, default_value_t = 2024)]
    to: Season,

    /// matches per season
    #[clap(long, default_value_t = 60)]
    matches: usize,

    /// players per franchise
    #[clap(long, default_value_t = 20)]
    squad: usize,

    /// JSON suspension configuration, replacing the default one
    #[clap(long)]
    suspensions: Option<PathBuf>,

    /// where to write the dataset to
    #[clap(short = 'o', long)]
    out: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        self.out.as_ref().ok_or(anyhow!("output file must be specified"))?;
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let config = match &args.suspensions {
        Some(path) => load_suspensions(path)?,
        None => SuspensionConfig::default(),
    };
    let options = GeneratorOptions {
        seed: args.seed,
        seasons: args.from..=args.to,
        matches_per_season: args.matches,
        squad_size: args.squad,
    };
    let dataset = generate(&options, &config)?;

    let errors = dataset.validate();
    if !errors.is_empty() {
        return Err(RejectedDataset { errors }.into());
    }
    info!(
        "generated {} matches, {} player seasons and {} team seasons over {}",
        dataset.matches.len(),
        dataset.players.len(),
        dataset.teams.len(),
        DisplayRangeInclusive::from(&options.seasons)
    );

    let out = args.out.unwrap_or_default();
    dataset.to_json_file(&out)?;
    info!("wrote {}", out.display());
    Ok(())
}
