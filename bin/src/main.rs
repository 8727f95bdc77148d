//! tsfold CLI - Consolidate OHLCV series into calendar periods.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

mod commands;

use commands::job::{JobArgs, SelectArgs};

#[derive(Parser)]
#[command(name = "tsfold")]
#[command(about = "Consolidate OHLCV series into calendar periods", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Consolidate records into one bar per period
    Consolidate {
        #[command(flatten)]
        job: JobArgs,
    },

    /// Pick the records on which period extremes happened
    Select {
        #[command(flatten)]
        job: JobArgs,

        #[command(flatten)]
        select: SelectArgs,
    },

    /// List the record filter catalogue
    Filters,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Consolidate { job } => commands::job::run(&job, None, cli.quiet),
        Commands::Select { job, select } => commands::job::run(&job, Some(&select), cli.quiet),
        Commands::Filters => commands::filters::list_filters(),
    }
}
