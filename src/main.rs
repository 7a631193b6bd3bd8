use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cuberank::contest::EventResults;
use cuberank::scoring::{EventRegistry, RankedResult};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 1;
const EXIT_VALIDATION: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank an event's results (default command)
    Rank {
        /// Contest file (JSON)
        file: PathBuf,
        /// Event to rank, e.g. "3x3"
        event: String,
        /// Restrict ranking to one round
        #[arg(short, long)]
        round: Option<u32>,
    },
    /// Check submissions against the event's rules
    Validate {
        /// Contest file (JSON)
        file: PathBuf,
        /// Event to validate; all events when omitted
        event: Option<String>,
    },
    /// Show statistics for an event
    Stats {
        /// Contest file (JSON)
        file: PathBuf,
        /// Event to summarize, e.g. "3x3"
        event: String,
        /// Restrict statistics to one round
        #[arg(short, long)]
        round: Option<u32>,
    },
    /// Export an event's ranking as CSV
    Export {
        /// Contest file (JSON)
        file: PathBuf,
        /// Event to export, e.g. "3x3"
        event: String,
        /// Restrict export to one round
        #[arg(short, long)]
        round: Option<u32>,
    },
    /// Show school records
    Records {
        /// Records file (JSON)
        file: PathBuf,
    },
    /// List known events and their scoring rules
    Events,
}

#[derive(Parser, Debug)]
#[command(name = "cuberank")]
#[command(about = "Club speedcubing results: scoring, ranking, records", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/cuberank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli.config.map(PathBuf::from);
    let registry = match cuberank::config::load_registry(config_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!("Registry knows {} events", registry.names().len());
    }

    let use_colors = cuberank::output::should_use_colors();

    match cli.command {
        Commands::Rank { file, event, round } => {
            let results = match load_event(&file, &event, cli.verbose) {
                Some(e) => e,
                None => std::process::exit(EXIT_DATA),
            };
            let ranked = rank_event(&results, &event, round, &registry, cli.verbose);
            let attempts = registry.policy(&event).attempts;
            println!("{}", cuberank::output::format_ranked_table(&ranked, attempts, use_colors));
        }
        Commands::Validate { file, event } => {
            let contest = match load_contest(&file) {
                Some(c) => c,
                None => std::process::exit(EXIT_DATA),
            };

            let mut problems = 0usize;
            for results in &contest.events {
                if let Some(ref only) = event {
                    if &results.event != only {
                        continue;
                    }
                }
                if !registry.is_known(&results.event) {
                    eprintln!(
                        "warning: unknown event \"{}\", default rules apply",
                        results.event
                    );
                }
                let policy = registry.policy(&results.event);
                for entry in &results.entries {
                    if let Err(errors) =
                        cuberank::scoring::validate_entry(entry, &results.event, &policy)
                    {
                        problems += errors.len();
                        eprintln!("{} / {}:", results.event, entry.name);
                        for error in errors {
                            eprintln!("  - {}", error);
                        }
                    }
                }
            }

            if problems > 0 {
                eprintln!("{} problem(s) found", problems);
                std::process::exit(EXIT_VALIDATION);
            }
            println!("All submissions valid.");
        }
        Commands::Stats { file, event, round } => {
            let results = match load_event(&file, &event, cli.verbose) {
                Some(e) => e,
                None => std::process::exit(EXIT_DATA),
            };
            let policy = registry.policy(&event);
            let scored = score_event(&results, round, &registry, &event);
            let stats = cuberank::scoring::event_stats(&scored, &policy);
            println!("{}", cuberank::output::format_stats(&stats, use_colors));
        }
        Commands::Export { file, event, round } => {
            let results = match load_event(&file, &event, cli.verbose) {
                Some(e) => e,
                None => std::process::exit(EXIT_DATA),
            };
            let ranked = rank_event(&results, &event, round, &registry, cli.verbose);
            let attempts = registry.policy(&event).attempts;
            println!("{}", cuberank::output::format_csv(&ranked, attempts));
        }
        Commands::Records { file } => {
            let records = match cuberank::contest::load_records(&file) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Records error: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            };
            println!("{}", cuberank::output::format_records_table(&records, use_colors));
        }
        Commands::Events => {
            for name in registry.names() {
                let policy = registry.policy(name);
                println!(
                    "{:<12} {} attempts, {:?}, {:?}",
                    name, policy.attempts, policy.method, policy.format
                );
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn load_contest(file: &PathBuf) -> Option<cuberank::contest::Contest> {
    match cuberank::contest::load_contest(file) {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Contest error: {}", e);
            None
        }
    }
}

fn load_event(file: &PathBuf, event: &str, verbose: bool) -> Option<EventResults> {
    let contest = load_contest(file)?;
    if verbose {
        eprintln!(
            "Loaded \"{}\" with events: {}",
            contest.title,
            contest.event_names().join(", ")
        );
    }
    match contest.event(event) {
        Some(results) => Some(results.clone()),
        None => {
            eprintln!(
                "Event \"{}\" not found in this contest (has: {})",
                event,
                contest.event_names().join(", ")
            );
            None
        }
    }
}

fn score_event(
    results: &EventResults,
    round: Option<u32>,
    registry: &EventRegistry,
    event: &str,
) -> Vec<cuberank::scoring::ContestantResult> {
    let policy = registry.policy(event);
    results
        .entries
        .iter()
        .filter(|entry| round.map_or(true, |r| entry.round == r))
        .map(|entry| cuberank::scoring::score_entry(entry, &policy))
        .collect()
}

fn rank_event(
    results: &EventResults,
    event: &str,
    round: Option<u32>,
    registry: &EventRegistry,
    verbose: bool,
) -> Vec<RankedResult> {
    let scored = score_event(results, round, registry, event);
    if verbose {
        eprintln!("Scored {} entries for {}", scored.len(), event);
    }
    cuberank::scoring::rank_results(scored)
}
