//! declmap CLI
//!
//! Runs the declarative mapping walkthroughs against an in-memory database

use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use declmap_core::logging_facility::{self, Profile};
use declmap_core::{log_op_end, log_op_start};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "declmap")]
#[command(about = "declmap - declarative mapping walkthroughs", long_about = None)]
struct Cli {
    /// Echo every SQL statement to stderr (always on for getting-started)
    #[arg(long, global = true)]
    echo: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogProfile::Development)]
    log_profile: LogProfile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogProfile {
    Development,
    Production,
}

impl From<LogProfile> for Profile {
    fn from(profile: LogProfile) -> Self {
        match profile {
            LogProfile::Development => Profile::Development,
            LogProfile::Production => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Define a user, create the schema, and commit one row, echoing SQL
    GettingStarted,
    /// Commit a user, rename it, and print its serialized form
    Mutation,
    /// Commit a user, rename it, and serialize it without field enumeration (fails)
    NoSerialization,
}

impl Commands {
    fn op(&self) -> &'static str {
        match self {
            Commands::GettingStarted => "getting_started",
            Commands::Mutation => "mutation",
            Commands::NoSerialization => "no_serialization",
        }
    }

    fn echoes_by_default(&self) -> bool {
        matches!(self, Commands::GettingStarted)
    }
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_profile.into());

    let options = commands::Options {
        echo: cli.echo || cli.command.echoes_by_default(),
    };
    let op = cli.command.op();
    log_op_start!(op, echo = options.echo);
    let start = Instant::now();

    let result = match cli.command {
        Commands::GettingStarted => commands::getting_started::execute(&options),
        Commands::Mutation => commands::mutation::execute(&options),
        Commands::NoSerialization => commands::no_serialization::execute(&options),
    };

    if let Err(e) = result {
        tracing::error!(op = op, error = %e, "walkthrough failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
}
