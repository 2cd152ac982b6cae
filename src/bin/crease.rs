use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info, warn};

use crease::aggregate::{MarginKind, Order, PlayerSort, SuspendedSeasons, TOP_PLAYERS};
use crease::analysis::{run, Analysis, AnalysisKind, Query};
use crease::demo::{generate, GeneratorOptions, DEFAULT_SEED};
use crease::domain::{Role, Season};
use crease::eligibility::SuspensionConfig;
use crease::file::{load_dataset, load_suspensions};
use crease::filter::TeamFilter;
use crease::print::tabulate;
use crease::store::RecordStore;
use crease::csv;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// JSON dataset to analyse
    #[clap(short = 'd', long)]
    data: Option<PathBuf>,

    /// seed for a generated dataset, used in place of a data file
    #[clap(long)]
    seed: Option<u64>,

    /// season to analyse
    #[clap(short = 's', long)]
    season: Season,

    /// team to analyse, or "all"
    #[clap(short = 't', long, default_value = "all")]
    team: TeamFilter,

    /// analysis to run
    #[clap(short = 'a', long, default_value = "season-overview")]
    analysis: AnalysisKind,

    /// margin of victory for the margin trend (runs or wickets)
    #[clap(long, default_value = "runs")]
    margin: MarginKind,

    /// restrict the player leaderboard to one role
    #[clap(long)]
    role: Option<Role>,

    /// player leaderboard sort key (runs, average, strike_rate, wickets or economy)
    #[clap(long)]
    sort: Option<PlayerSort>,

    /// player leaderboard order
    #[clap(long, default_value = "descending")]
    order: Order,

    /// number of players to show
    #[clap(long)]
    limit: Option<usize>,

    /// leave suspended seasons out of the team history
    #[clap(long)]
    exclude_suspended: bool,

    /// JSON suspension configuration, replacing the default one
    #[clap(long)]
    suspensions: Option<PathBuf>,

    /// where to write the outcome as CSV
    #[clap(long)]
    csv: Option<PathBuf>,

    /// set aside invalid records instead of rejecting the dataset
    #[clap(long)]
    lenient: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.data.is_some() && self.seed.is_some() {
            bail!("either a data file or a seed may be specified, not both");
        }
        if self.analysis.requires_team() && self.team == TeamFilter::All {
            bail!("the {} analysis needs a team", self.analysis);
        }
        if self.limit == Some(0) {
            bail!("limit must be positive");
        }
        Ok(())
    }

    fn query(&self) -> Query {
        let analysis = match self.analysis {
            AnalysisKind::MarginTrend => Analysis::MarginTrend(self.margin),
            AnalysisKind::TeamHistory => Analysis::TeamHistory(if self.exclude_suspended {
                SuspendedSeasons::Exclude
            } else {
                SuspendedSeasons::Include
            }),
            AnalysisKind::Players => Analysis::Players {
                role: self.role,
                sort: self.sort.unwrap_or(PlayerSort::default_for(self.role)),
                order: self.order,
                limit: self.limit,
            },
            AnalysisKind::TopPlayers => Analysis::TopPlayers {
                limit: self.limit.unwrap_or(TOP_PLAYERS),
            },
            kind => kind.analysis(),
        };
        Query {
            season: self.season,
            team: self.team.clone(),
            analysis,
        }
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
    let dataset = match &args.data {
        Some(path) => load_dataset(path)?,
        None => {
            let options = GeneratorOptions {
                seed: args.seed.unwrap_or(DEFAULT_SEED),
                ..GeneratorOptions::default()
            };
            generate(&options, &config)?
        }
    };
    let store = if args.lenient {
        RecordStore::lenient(dataset)
    } else {
        RecordStore::try_new(dataset)?
    };
    if !store.flagged().is_empty() {
        warn!("{} record(s) set aside as invalid", store.flagged().len());
    }

    let query = args.query();
    let start_time = Instant::now();
    let outcome = run(&store, &config, &query)?;
    debug!("ran {} in {:?}", args.analysis, start_time.elapsed());

    let table = tabulate(&outcome);
    info!(
        "{} for {} in {}:\n{}",
        args.analysis,
        query.team,
        query.season,
        Console::default().render(&table)
    );

    if let Some(path) = &args.csv {
        csv::export(path, &outcome)?;
        info!("wrote {}", path.display());
    }
    Ok(())
}
