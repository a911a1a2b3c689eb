//! Regionate CLI
//!
//! Command-line interface for checking and fixing the `#region` grouping
//! convention in C# source trees.

mod output;
mod run;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use regionate_core::{ConfigLoader, init_tracing};
use tracing::error;

#[derive(Parser)]
#[command(name = "regionate")]
#[command(about = "Check and fix the #region grouping convention in C# sources")]
#[command(version = regionate_core::VERSION)]
#[command(
    long_about = "Regionate enforces a region-per-declaration convention in C# files:\n\
every type sits inside a '#region <Kind>: <Name>' marker and every member\n\
sits inside a '#region <Category>: <Visibility>' group.\n\
\n\
Examples:\n  \
regionate check              # Check current directory\n  \
regionate check src/         # Check files under src/\n  \
regionate fix --check .      # Report files that would change\n  \
regionate fix --diff .       # Show fixes as diffs without writing\n  \
regionate fix src/           # Rewrite violating files in place"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true, help = "Path to regionate.toml")]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Number of threads to use for parallel processing
    #[arg(
        short = 'j',
        long,
        global = true,
        help = "Number of threads (default: number of CPU cores)"
    )]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report declarations missing their region markers
    Check {
        /// Files or directories to check
        #[arg(help = "Files or directories to process (default: current directory)")]
        paths: Vec<PathBuf>,
    },

    /// Rewrite files so every declaration has its region marker
    Fix {
        /// Files or directories to fix
        #[arg(help = "Files or directories to process (default: current directory)")]
        paths: Vec<PathBuf>,

        /// Report whether files would change, without writing
        #[arg(
            long,
            visible_alias = "dry-run",
            help = "Report files that would be rewritten without applying anything"
        )]
        check: bool,

        /// Print each rewrite as a unified diff instead of writing
        #[arg(long, help = "Show proposed rewrites as diffs without applying them")]
        diff: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize colored output
    if !cli.no_color && std::env::var("NO_COLOR").is_err() {
        colored::control::set_override(true);
    } else {
        colored::control::set_override(false);
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "regionate=error",
        1 => "regionate=warn",
        2 => "regionate=info",
        3 => "regionate=debug",
        _ => "regionate=trace",
    };
    init_tracing(log_level);

    // Set thread pool size if specified
    if let Some(threads) = cli.threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
    {
        error!("Failed to set thread pool size: {}", e);
        std::process::exit(2);
    }

    match run_command(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("regionate failed: {e}");
            std::process::exit(2);
        }
    }
}

fn run_command(cli: Cli) -> anyhow::Result<i32> {
    let config = ConfigLoader::load(cli.config.as_deref(), None)?;

    match cli.command {
        Some(Commands::Check { paths }) => {
            let paths = default_paths(paths);
            run::check(&paths, &config)
        }
        Some(Commands::Fix { paths, check, diff }) => {
            let paths = default_paths(paths);
            let mode = if diff {
                run::FixMode::Diff
            } else if check {
                run::FixMode::Check
            } else {
                run::FixMode::Write
            };
            run::fix(&paths, &config, mode)
        }
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(0)
        }
    }
}

fn default_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    }
}
