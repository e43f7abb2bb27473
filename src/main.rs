use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use dota_draft::config::Config;
use dota_draft::dataset::loader::DatasetLoader;
use dota_draft::display::output::{
    display_error, display_full_draft, display_heroes, display_info, display_pair_breakdown,
    display_pool, display_positions, display_success, display_suggestions,
    GLOBAL_SUGGESTION_LIMIT, POOL_SUGGESTION_LIMIT,
};
use dota_draft::{
    pair_breakdown, predict_positions, score_pool, Dataset, DraftAnalysis, DraftReport,
    DraftState, HeroCatalog, HeroId, HeroPool, Role, SharedDataset,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "Dota Draft")]
#[command(about = "Synergy and counter pick suggestions for Dota 2 drafts", long_about = None)]
struct Args {
    /// Directory holding heroes.json, synergyMatrix.json and hero-roles.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print engine output as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Suggest picks, or break down the draft once both teams have five heroes
    Suggest {
        #[command(flatten)]
        draft: DraftArgs,

        /// Only suggest heroes with this role (e.g. Carry, Support)
        #[arg(short, long)]
        role: Option<String>,

        /// Show every candidate instead of the top 3 / top 10
        #[arg(long)]
        all: bool,

        /// Also show the per-pair breakdown for this picked hero
        #[arg(long)]
        explain: Option<String>,
    },

    /// Score only the heroes in your pool
    Pool {
        #[command(flatten)]
        draft: DraftArgs,
    },

    /// List heroes by attribute, optionally filtered by name or alias
    Heroes { query: Option<String> },

    /// Predict which position each enemy hero plays
    Positions {
        /// Enemy heroes (ids or names, comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        enemy: Vec<String>,
    },

    /// Re-download datasets from the configured sources
    Refresh,
}

#[derive(ClapArgs, Debug)]
struct DraftArgs {
    /// Allied picks in pick order (ids or names, comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    ally: Vec<String>,

    /// Enemy picks in pick order
    #[arg(short, long, value_delimiter = ',')]
    enemy: Vec<String>,

    /// Banned heroes
    #[arg(short, long, value_delimiter = ',')]
    ban: Vec<String>,

    /// Your hero pool (overrides DOTA_HERO_POOL)
    #[arg(short, long, value_delimiter = ',')]
    pool: Vec<String>,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env().context("Failed to read configuration")?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    let loader = DatasetLoader::new(config.clone());
    let shared = SharedDataset::default();

    if let Command::Refresh = args.command {
        display_info(&format!("Refreshing datasets in {}", config.data_dir.display()));
        let report = loader.refresh().context("Dataset refresh failed")?;
        if report.files_updated.is_empty() {
            display_info("No dataset sources configured, nothing to refresh");
            return Ok(());
        }
        display_success(&format!("Updated {}", report.files_updated.join(", ")));
        display_success(&format!(
            "Aliases merged: {}, heroes kept from previous list: {}",
            report.aliases_merged, report.heroes_appended
        ));
    }

    shared.replace(loader.load().context("Failed to load datasets")?);
    let dataset = shared.snapshot();

    match args.command {
        Command::Suggest {
            draft,
            role,
            all,
            explain,
        } => {
            let role = role
                .map(|r| r.parse::<Role>())
                .transpose()
                .context("Invalid --role")?;
            let pool = resolve_pool(&dataset.catalog, &draft, &config)?;
            let state = resolve_draft(&dataset.catalog, &draft)?;
            suggest(&dataset, &state, role, &pool, all, explain.as_deref(), args.json)
        }
        Command::Pool { draft } => {
            let pool = resolve_pool(&dataset.catalog, &draft, &config)?;
            let state = resolve_draft(&dataset.catalog, &draft)?;
            let records = score_pool(&dataset, &state, &pool)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                display_pool(&records);
            }
            Ok(())
        }
        Command::Heroes { query } => {
            display_heroes(&dataset.catalog, query.as_deref().unwrap_or(""));
            Ok(())
        }
        Command::Positions { enemy } => {
            let enemies = resolve_all(&dataset.catalog, &enemy)?;
            let assignments = predict_positions(&enemies, &dataset.positions);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&assignments)?);
            } else {
                display_positions(&assignments, &dataset.catalog);
            }
            Ok(())
        }
        Command::Refresh => {
            display_success(&format!(
                "Loaded {} heroes, {} matchup entries at {}",
                dataset.catalog.len(),
                dataset.matchups.len(),
                dataset.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
            Ok(())
        }
    }
}

fn suggest(
    dataset: &Arc<Dataset>,
    state: &DraftState,
    role: Option<Role>,
    pool: &HeroPool,
    all: bool,
    explain: Option<&str>,
    json: bool,
) -> Result<()> {
    let report = DraftReport::build(dataset, state, role, pool)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !state.has_picks() {
        display_info("No picks yet, every candidate scores zero");
    }

    match &report.analysis {
        DraftAnalysis::Suggestion(suggestions) => {
            let (pool_limit, global_limit) = if all {
                (usize::MAX, usize::MAX)
            } else {
                (POOL_SUGGESTION_LIMIT, GLOBAL_SUGGESTION_LIMIT)
            };
            display_suggestions(suggestions, role, pool_limit, global_limit);
        }
        DraftAnalysis::FullDraft(full) => display_full_draft(full),
    }

    if !pool.is_empty() {
        display_pool(&report.pool);
    }

    display_positions(&report.positions, &dataset.catalog);

    if let Some(name) = explain {
        let hero = dataset
            .catalog
            .resolve(name)
            .with_context(|| format!("Cannot explain '{}'", name))?;
        match pair_breakdown(dataset, state, hero) {
            Some(pairs) => {
                let hero_name = dataset
                    .catalog
                    .get(hero)
                    .map(|h| h.name.as_str())
                    .unwrap_or(name);
                display_pair_breakdown(hero_name, &pairs);
            }
            None => display_info(&format!("{} is not picked by either team", name)),
        }
    }

    Ok(())
}

fn resolve_all(catalog: &HeroCatalog, inputs: &[String]) -> Result<Vec<HeroId>> {
    inputs
        .iter()
        .map(|input| {
            catalog
                .resolve(input)
                .with_context(|| format!("Could not find hero '{}'", input))
        })
        .collect()
}

fn resolve_draft(catalog: &HeroCatalog, args: &DraftArgs) -> Result<DraftState> {
    Ok(DraftState::new(
        resolve_all(catalog, &args.ally).context("Invalid --ally")?,
        resolve_all(catalog, &args.enemy).context("Invalid --enemy")?,
        resolve_all(catalog, &args.ban).context("Invalid --ban")?,
    ))
}

fn resolve_pool(catalog: &HeroCatalog, args: &DraftArgs, config: &Config) -> Result<HeroPool> {
    let raw = if args.pool.is_empty() {
        &config.hero_pool
    } else {
        &args.pool
    };
    let ids = resolve_all(catalog, raw).context("Invalid hero pool")?;
    let pool: HeroPool = ids.into_iter().collect();

    if !pool.is_empty() && !pool.is_active() {
        display_info(&format!(
            "Hero pool has {} heroes; add at least {} to split suggestions by pool",
            pool.len(),
            HeroPool::MIN_ACTIVE_SIZE
        ));
    }

    Ok(pool)
}
