//! CLI frontend for the omikuji fortune engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "omikuji",
    about = "Omikuji: engineer-themed fortune slips with rarity and saisen",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log every draw step to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a fortune slip
    Draw {
        /// Omikuji type id (see `omikuji types`)
        #[arg(short = 't', long = "type", default_value = "engineer")]
        kind: String,

        /// Offering: none, goen, fifty, hundred, five-hundred, bug
        #[arg(short, long, default_value = "none")]
        saisen: String,

        /// RNG seed for a reproducible slip
        #[arg(long)]
        seed: Option<u64>,

        /// Print the slip as JSON
        #[arg(long)]
        json: bool,

        /// JSON file with a custom fortune level table
        #[arg(short, long)]
        levels: Option<PathBuf>,
    },

    /// List the available omikuji types
    Types,

    /// Show the fortune level table and its cumulative weights
    Levels {
        /// JSON file with a custom fortune level table
        #[arg(short, long)]
        levels: Option<PathBuf>,
    },

    /// Show rarity odds, adjusted for an offering
    Rarity {
        /// Offering: none, goen, fifty, hundred, five-hundred, bug
        #[arg(short, long, default_value = "none")]
        saisen: String,
    },

    /// Run the statistical validators
    Validate {
        #[command(subcommand)]
        check: ValidateCommand,
    },
}

#[derive(Subcommand)]
enum ValidateCommand {
    /// Compare sampled frequencies with the declared odds
    Accuracy {
        /// What to sample: emotion, fortune, rarity
        #[arg(long, default_value = "emotion")]
        target: String,

        /// Fortune value the emotion distribution is derived from
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        value: i32,

        /// Offering used for the rarity target
        #[arg(long, default_value = "none")]
        saisen: String,

        /// Number of draws
        #[arg(short = 'n', long, default_value = "10000")]
        samples: usize,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Allowed deviation in percentage points
        #[arg(long, default_value = "5.0")]
        tolerance: f64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Chi-square goodness-of-fit of the emotion selector
    Significance {
        /// Fortune value the emotion distribution is derived from
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        value: i32,

        /// Number of draws
        #[arg(short = 'n', long, default_value = "10000")]
        samples: usize,

        /// Significance level
        #[arg(long, default_value = "0.05")]
        alpha: f64,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that emotion tags agree with the fortune level
    Consistency {
        /// Fortune level id
        #[arg(short, long, default_value = "daikichi")]
        level: String,

        /// Omikuji type whose categories are drawn
        #[arg(short = 't', long = "type", default_value = "engineer")]
        kind: String,

        /// Number of trials
        #[arg(short = 'n', long, default_value = "1000")]
        iterations: usize,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check raw emotion-distribution parameters
    #[command(allow_negative_numbers = true)]
    Params {
        /// Probability of POSITIVE
        positive: f64,

        /// Probability of NEUTRAL
        neutral: f64,

        /// Probability of NEGATIVE
        negative: f64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // stdout is reserved for tables and JSON
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Draw {
            kind,
            saisen,
            seed,
            json,
            levels,
        } => commands::draw::run(&kind, &saisen, seed, json, levels.as_deref()),
        Commands::Types => commands::types::run(),
        Commands::Levels { levels } => commands::levels::run(levels.as_deref()),
        Commands::Rarity { saisen } => commands::rarity::run(&saisen),
        Commands::Validate { check } => match check {
            ValidateCommand::Accuracy {
                target,
                value,
                saisen,
                samples,
                seed,
                tolerance,
                json,
            } => commands::validate::accuracy(
                &target,
                value,
                &saisen,
                samples,
                seed,
                tolerance,
                json,
            ),
            ValidateCommand::Significance {
                value,
                samples,
                alpha,
                seed,
                json,
            } => commands::validate::significance(value, samples, alpha, seed, json),
            ValidateCommand::Consistency {
                level,
                kind,
                iterations,
                seed,
                json,
            } => commands::validate::consistency(&level, &kind, iterations, seed, json),
            ValidateCommand::Params {
                positive,
                neutral,
                negative,
                json,
            } => commands::validate::params([positive, neutral, negative], json),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
