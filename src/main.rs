use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use matchup_fairness::calculate::{audit_schedule, evaluate, observed_players};
use matchup_fairness::config::AppConfig;
use matchup_fairness::models::{MatchRecord, ScoreReport};
use matchup_fairness::storage::{read_schedule, write_json, JsonlWriter, ScheduleFormat};

const DEFAULT_CONFIG_PATH: &str = "./fairness.toml";

#[derive(Parser)]
#[command(name = "matchup-fairness")]
#[command(about = "Score the fairness of a round-based team matchmaking schedule")]
#[command(version)]
struct Cli {
    /// Path to configuration file (./fairness.toml is used when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Schedule file line layout
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// {"team_a": ["A", "B"], "team_b": ["C", "D"]} per line
    Pairings,
    /// Full match records per line
    Records,
}

impl From<FormatArg> for ScheduleFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pairings => ScheduleFormat::Pairings,
            FormatArg::Records => ScheduleFormat::Records,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute fairness indices and the weighted loss for a schedule
    Score {
        /// Schedule file (JSONL, chronological)
        schedule: PathBuf,

        /// Schedule line format
        #[arg(long, value_enum, default_value = "pairings")]
        format: FormatArg,

        /// Parallel fields per round (overrides config)
        #[arg(long)]
        num_fields: Option<usize>,

        /// Pool size (overrides config; default: players seen in the schedule)
        #[arg(long)]
        num_players: Option<usize>,

        /// Write the full JSON report here
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write per-player statistics as JSONL here
        #[arg(long)]
        players_out: Option<PathBuf>,
    },

    /// Check a schedule for duplicate pairings and uneven game counts
    Audit {
        /// Schedule file (JSONL, chronological)
        schedule: PathBuf,

        /// Schedule line format
        #[arg(long, value_enum, default_value = "pairings")]
        format: FormatArg,

        /// Pool size (overrides config; default: players seen in the schedule)
        #[arg(long)]
        num_players: Option<usize>,
    },

    /// Print the effective configuration as TOML
    ShowConfig,
}

/// Where the configuration came from.
enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Load the config file. A path given with `--config` must exist; without the
/// flag a missing `./fairness.toml` falls back to defaults.
fn load_config(explicit: Option<&Path>) -> Result<(AppConfig, ConfigSource)> {
    let path = match explicit {
        Some(path) if !path.exists() => bail!("Config file not found: {:?}", path),
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !path.exists() {
                return Ok((AppConfig::default(), ConfigSource::Defaults));
            }
            path
        }
    };

    let config = AppConfig::from_file(&path)
        .with_context(|| format!("Failed to load config from {:?}", path))?;
    Ok((config, ConfigSource::File(path)))
}

fn pool_size(explicit: Option<usize>, config: &AppConfig, records: &[MatchRecord]) -> usize {
    explicit
        .or(config.scoring.num_players)
        .unwrap_or_else(|| observed_players(records).len())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, source) = load_config(cli.config.as_deref())?;

    // Initialize tracing
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting matchup-fairness v{}", env!("CARGO_PKG_VERSION"));
    match &source {
        ConfigSource::File(path) => tracing::info!("Loaded config from {:?}", path),
        ConfigSource::Defaults => {
            tracing::info!("No config at {}, using defaults", DEFAULT_CONFIG_PATH)
        }
    }

    match cli.command {
        Commands::Score {
            schedule,
            format,
            num_fields,
            num_players,
            out,
            players_out,
        } => {
            let records = read_schedule(&schedule, format.into())
                .with_context(|| format!("Failed to read schedule {:?}", schedule))?;

            let num_fields = num_fields.unwrap_or(config.scoring.num_fields);
            let num_players = pool_size(num_players, &config, &records);
            let weights = &config.scoring.weights;

            for key in weights.unknown_keys() {
                tracing::warn!("Weight '{}' matches no fairness index and is ignored", key);
            }

            let evaluation = evaluate(&records, num_players, weights, num_fields)?;
            let report = ScoreReport::new(&records, num_players, num_fields, evaluation);

            println!("\n=== Fairness Indices ===");
            for (index, value) in report.global.iter() {
                let weight = weights.get(index.name()).unwrap_or(0.0);
                println!("{:<44} {:>14.4}   (weight {})", index.name(), value, weight);
            }
            println!("\nSchedule:  {}", report.schedule_id);
            println!("Matchups:  {}", report.num_matchups);
            println!("Players:   {} (pool {})", report.players.len(), num_players);
            println!("Fields:    {}", num_fields);
            println!("Loss:      {:.4}", report.loss);

            if let Some(path) = players_out {
                let written = JsonlWriter::new(&path)
                    .write_all(&report.player_lines())
                    .with_context(|| format!("Failed to write player stats to {:?}", path))?;
                println!("Player statistics: {} lines -> {:?}", written, path);
            }

            if let Some(path) = out {
                write_json(&path, &report)
                    .with_context(|| format!("Failed to write report to {:?}", path))?;
                println!("Report: {:?}", path);
            }
        }

        Commands::Audit {
            schedule,
            format,
            num_players,
        } => {
            let records = read_schedule(&schedule, format.into())
                .with_context(|| format!("Failed to read schedule {:?}", schedule))?;
            let num_players = pool_size(num_players, &config, &records);

            let audit = audit_schedule(&records, num_players);

            println!("\n=== Schedule Audit ===");
            println!("Total matchups:        {}", audit.total_matchups);
            println!("Unique matchups (max): {}", audit.max_unique_matchups);

            println!("\nDuplicate matchups:");
            if audit.has_duplicates() {
                for (matchup, count) in &audit.duplicates {
                    println!("  '{}' appears {} times", matchup, count);
                }
            } else {
                println!("  none");
            }

            println!("\nGames per player:");
            for (player, games) in &audit.games_per_player {
                println!("  {:<20} {}", player, games);
            }

            if audit.is_fair() {
                println!("\nFair distribution: every player plays {} games", audit.min_games);
            } else {
                println!(
                    "\nUnfair distribution: games range from {} to {}",
                    audit.min_games, audit.max_games
                );
            }
        }

        Commands::ShowConfig => {
            let toml_str =
                toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
            println!("{}", toml_str);
        }
    }

    Ok(())
}
