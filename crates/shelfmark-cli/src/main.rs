use clap::{ArgAction, Parser, Subcommand};
use commands::{import, resolve, statuses};
use shelfmark_models::CanonicalStatus;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "shelfmark")]
#[command(about = "Shelfmark - Track your reading everywhere")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve raw status strings to canonical reading statuses
    #[command(long_about = "Resolve one or more raw status strings, exactly as they appear in a CSV export or user entry, to canonical reading statuses. Unresolved inputs are reported but are not an error.")]
    Resolve {
        /// Status strings as received from an export or keyboard entry
        #[arg(required = true, value_name = "STATUS")]
        values: Vec<String>,
    },

    /// Import a library CSV export
    #[command(long_about = "Import a library CSV export, resolving every status cell to a canonical reading status. Prints an import report; rows whose status doesn't resolve are skipped unless --keep-unresolved or --fallback-status says otherwise.")]
    Import {
        /// Path to the CSV file
        file: PathBuf,

        /// Export format of the file
        #[arg(long, value_enum, default_value = "goodreads")]
        format: import::ImportFormat,

        /// Canonical status to assign when a status cell doesn't resolve
        #[arg(long, value_name = "STATUS", conflicts_with = "keep_unresolved")]
        fallback_status: Option<CanonicalStatus>,

        /// Keep rows with unresolved statuses instead of skipping them
        #[arg(long, action = ArgAction::SetTrue)]
        keep_unresolved: bool,

        /// Write the imported entries as pretty JSON to this file
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// List canonical statuses and their synonyms
    #[command(long_about = "List every canonical reading status together with the synonym strings that resolve to it exactly.")]
    Statuses,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Resolve { values } => resolve::run_resolve(&values, &output),
        Commands::Import {
            file,
            format,
            fallback_status,
            keep_unresolved,
            out,
        } => import::run_import(file, format, fallback_status, keep_unresolved, out, &output),
        Commands::Statuses => statuses::run_statuses(&output),
    }
}
