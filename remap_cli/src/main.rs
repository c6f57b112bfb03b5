//! remap_cli - Find the attribute remap that trains a skill plan fastest
//!
//! Reads a character snapshot and a plan from TOML, runs the remapping
//! search (or evaluates one allocation) and prints the result.

mod report;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use training_core::config::{default_catalog, load_constants, load_skill_catalog, load_toml};
use training_core::types::ATTRIBUTE_COUNT;
use training_core::{
    CharacterSnapshot, CharacterState, RemappingOptimizer, TrainingConstants, TrainingPlan,
    TrainingTimeCalculator, ONE_YEAR,
};

/// Attribute remap optimizer for skill training plans
#[derive(Parser, Debug)]
#[command(name = "remap")]
#[command(about = "Find the attribute allocation that trains a skill plan fastest")]
struct Args {
    /// Character snapshot (TOML)
    #[arg(long)]
    character: PathBuf,

    /// Training plan (TOML)
    #[arg(long)]
    plan: PathBuf,

    /// Skill catalog (TOML); the built-in catalog is used if omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Training constants (TOML); defaults are used if omitted
    #[arg(long)]
    constants: Option<PathBuf>,

    /// Evaluate this allocation instead of searching, e.g. 27,21,17,17,17
    #[arg(long, value_parser = parse_allocation)]
    manual: Option<[i32; ATTRIBUTE_COUNT]>,

    /// Only optimize for goals starting within the first year
    #[arg(long)]
    first_year: bool,

    /// Print a per-level breakdown under the proposed attributes
    #[arg(long)]
    breakdown: bool,

    /// Also solve the remap points stored in the plan
    #[arg(long)]
    remap_points: bool,

    /// Estimate in-progress training at this time (RFC 3339), default now
    #[arg(long)]
    at: Option<DateTime<Utc>>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => load_skill_catalog(path)
            .with_context(|| format!("loading skill catalog {}", path.display()))?,
        None => default_catalog(),
    };
    if catalog.is_empty() {
        bail!("skill catalog is empty");
    }

    let constants = match &args.constants {
        Some(path) => load_constants(path)
            .with_context(|| format!("loading constants {}", path.display()))?,
        None => TrainingConstants::default(),
    };

    let snapshot: CharacterSnapshot = load_toml(&args.character)
        .with_context(|| format!("loading character {}", args.character.display()))?;
    let now = args.at.unwrap_or_else(Utc::now);
    let character = CharacterState::from_snapshot(&catalog, &snapshot).advanced_to(now);

    let plan: TrainingPlan = load_toml(&args.plan)
        .with_context(|| format!("loading plan {}", args.plan.display()))?;
    let resolved = plan.resolve(&catalog).context("resolving plan")?;
    tracing::info!(
        "Loaded {} with {} SP, plan of {} goals",
        character.name,
        character.total_skill_points(),
        resolved.len()
    );

    let mut optimizer = RemappingOptimizer::new(&catalog, &constants, &character, resolved);
    if args.first_year {
        optimizer = optimizer.with_horizon(ONE_YEAR);
    }

    let points = if args.remap_points {
        let (solved, points) = optimizer.optimize_remap_points();
        tracing::info!("Solved {} remap points", points.len());
        optimizer = RemappingOptimizer::new(&catalog, &constants, &character, solved);
        Some(points)
    } else {
        None
    };

    let result = match args.manual {
        Some(bases) => optimizer
            .evaluate(bases)
            .context("manual allocation rejected")?,
        None => optimizer.optimize(),
    };

    let steps = if args.breakdown {
        let calculator = TrainingTimeCalculator::new(&catalog, &constants);
        Some(calculator.plan_breakdown(&character, optimizer.plan(), &result.best_scratchpad))
    } else {
        None
    };

    let report = report::Report::new(
        &catalog,
        &character,
        &optimizer,
        &result,
        steps.as_deref(),
        points.as_deref(),
    );
    match args.format {
        Format::Text => print!("{}", report),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

/// `RUST_LOG` directives when set and valid, `info` otherwise
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Parse `a,b,c,d,e` into base values in attribute order
fn parse_allocation(value: &str) -> Result<[i32; ATTRIBUTE_COUNT], String> {
    let values = value
        .split(',')
        .map(|part| part.trim().parse::<i32>().map_err(|e| format!("{:?}: {}", part, e)))
        .collect::<Result<Vec<_>, _>>()?;
    let count = values.len();
    values
        .try_into()
        .map_err(|_| format!("expected {} values, got {}", ATTRIBUTE_COUNT, count))
}
