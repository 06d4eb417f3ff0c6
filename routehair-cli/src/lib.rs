//! Command-line interface for planning salon visits and keeping visit
//! records.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;

mod error;
mod optimize;
mod visits;

pub use error::CliError;

use optimize::OptimizeArgs;
use visits::{ClearArgs, DeleteArgs, ListArgs, RecordArgs, SummaryArgs};

pub(crate) const ARG_OPTIMIZE_REQUEST: &str = "request";
pub(crate) const ENV_OPTIMIZE_REQUEST: &str = "ROUTEHAIR_REQUEST_PATH";
pub(crate) const ARG_MODE: &str = "mode";
pub(crate) const ARG_ALLOW_ANY_COUNT: &str = "allow-any-count";
pub(crate) const ARG_AVERAGE_SPEED: &str = "average-speed-kmh";
pub(crate) const ARG_DWELL_MINUTES: &str = "dwell-minutes";
pub(crate) const ARG_STORE: &str = "store";
pub(crate) const ARG_LOCATION: &str = "location";
pub(crate) const ENV_LOCATION: &str = "ROUTEHAIR_LOCATION";
pub(crate) const ARG_VISIT_ID: &str = "id";
pub(crate) const ENV_VISIT_ID: &str = "ROUTEHAIR_ID";

/// Store path used when neither `--store` nor `ROUTEHAIR_STORE` is set.
pub const DEFAULT_STORE_PATH: &str = "routehair_visits.json";

/// Run the routehair CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration, the store or
/// output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, chrono::Utc::now(), &mut stdout)
}

fn dispatch(
    command: Command,
    now: chrono::DateTime<chrono::Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Optimize(args) => optimize::run_optimize_with(args, writer),
        Command::Record(args) => visits::run_record_with(args, now, writer),
        Command::List(args) => visits::run_list_with(args, writer),
        Command::Delete(args) => visits::run_delete_with(args, writer),
        Command::Clear(args) => visits::run_clear_with(args, writer),
        Command::Summary(args) => visits::run_summary_with(args, now.date_naive(), writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "routehair",
    about = "Plan salon visiting routes and keep a log of visit outcomes",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Order a selection of locations by greedy nearest neighbour.
    Optimize(OptimizeArgs),
    /// Save today's checklist result for a location.
    Record(RecordArgs),
    /// List stored visit records.
    List(ListArgs),
    /// Delete one visit record by id.
    Delete(DeleteArgs),
    /// Remove every visit record.
    Clear(ClearArgs),
    /// Summarise completion over a history window.
    Summary(SummaryArgs),
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
