use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rpgscan::navigator::SortOrder;
use rpgscan::{commands, diagnostics, error, watch};

/// Environment variable holding an `EnvFilter` directive that overrides the flags.
const LOG_ENV: &str = "RPGSCAN_LOG";

#[derive(Parser)]
#[command(name = "rpgscan", version, about = "Scope-aware symbol scanner for free-format ILE RPG")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Only log errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Log scanner decisions at debug level
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the symbols of one source file, grouped by kind
    Symbols {
        /// Source file to scan
        file: PathBuf,
        /// Emit the listing as JSON
        #[arg(long)]
        json: bool,
        /// Order within each group
        #[arg(long, value_enum, default_value_t = SortOrder::Line)]
        sort: SortOrder,
    },
    /// Print a markdown report of one source file
    Report {
        /// Source file to scan
        file: PathBuf,
        /// Emit the full document as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find the declaration a name refers to at a given line
    Lookup {
        /// Source file to scan
        file: PathBuf,
        /// One-based line the name is written on
        #[arg(long)]
        line: u32,
        /// Name to look up, case-insensitive
        name: String,
    },
    /// Count symbols, control blocks, and to-dos across the project
    Summary {
        /// Emit the per-file rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rescan a source file whenever it changes
    Watch {
        /// Source file to watch
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Symbols { file, json, sort } => commands::symbols(&file, sort, json),
        Commands::Report { file, json } => commands::report(&file, json),
        Commands::Lookup { file, line, name } => commands::lookup(&file, &name, line),
        Commands::Summary { json } => commands::summary(json),
        Commands::Watch { file } => watch::run(&file),
    };

    return result.unwrap_or_else(|e| {
        diagnostics::print_error(&e);
        return exit_code_for(&e);
    });
}

/// Lookups that find nothing exit 1; every other failure exits 2.
fn exit_code_for(e: &error::Error) -> ExitCode {
    return match e {
        error::Error::SymbolNotFound { .. } => ExitCode::from(1),
        _ => ExitCode::from(2),
    };
}

/// Log to stderr so stdout stays parseable. `RPGSCAN_LOG` wins over the flags.
fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| return tracing_subscriber::EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
