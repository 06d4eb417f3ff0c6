//! Visit record commands: `record`, `list`, `delete`, `clear` and `summary`.
//!
//! Every command opens the store named by `--store` (or `ROUTEHAIR_STORE`).
//! Paths ending in `.db`, `.sqlite` or `.sqlite3` use a SQLite slot; any
//! other path is a JSON file.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use routehair_core::{
    FileSlot, HistoryWindow, SlotMedium, SqliteSlot, VisitRecord, VisitStore, VisitStoreError,
    VisitSummary, VisitUpdate,
};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{
    ARG_LOCATION, ARG_STORE, ARG_VISIT_ID, CliError, DEFAULT_STORE_PATH, ENV_LOCATION,
    ENV_VISIT_ID, write_json,
};

/// Slot name used inside SQLite stores.
pub(crate) const SQLITE_SLOT_NAME: &str = "routehair_visits";

pub(crate) type CliStore = VisitStore<Box<dyn SlotMedium>>;

/// Open the store at `path`, choosing the medium from its extension.
pub(crate) fn open_store(path: &Utf8Path) -> Result<CliStore, CliError> {
    let slot: Box<dyn SlotMedium> = if is_sqlite_path(path) {
        Box::new(SqliteSlot::open(path.as_std_path(), SQLITE_SLOT_NAME)?)
    } else {
        Box::new(FileSlot::new(path.to_path_buf()))
    };
    Ok(VisitStore::new(slot))
}

fn is_sqlite_path(path: &Utf8Path) -> bool {
    matches!(path.extension(), Some("db" | "sqlite" | "sqlite3"))
}

fn store_path(store: Option<Utf8PathBuf>) -> Utf8PathBuf {
    store.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STORE_PATH))
}

fn store_error(path: &Utf8Path) -> impl FnOnce(VisitStoreError) -> CliError + '_ {
    move |source| CliError::Store {
        path: path.to_path_buf(),
        source,
    }
}

/// CLI arguments for the `record` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Save the checklist for a location. Saving twice on the same \
                 day updates the existing record instead of adding another.",
    about = "Record a visit outcome"
)]
#[ortho_config(prefix = "ROUTEHAIR")]
pub(crate) struct RecordArgs {
    /// Path to the visit store.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
    /// Identifier of the visited location.
    #[arg(long = ARG_LOCATION, value_name = "id")]
    #[serde(default)]
    pub(crate) location: Option<String>,
    /// Whether the visit objective was achieved.
    #[arg(long, value_name = "bool")]
    #[serde(default)]
    pub(crate) completed: Option<bool>,
    /// Free-text notes; blank text clears the memo.
    #[arg(long, value_name = "text")]
    #[serde(default)]
    pub(crate) memo: Option<String>,
}

impl RecordArgs {
    pub(crate) fn into_config(self) -> Result<RecordConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecordConfig::try_from(merged)
    }
}

/// Resolved `record` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordConfig {
    pub(crate) store: Utf8PathBuf,
    pub(crate) update: VisitUpdate,
}

impl TryFrom<RecordArgs> for RecordConfig {
    type Error = CliError;

    fn try_from(args: RecordArgs) -> Result<Self, Self::Error> {
        let location_id = args.location.ok_or(CliError::MissingArgument {
            field: ARG_LOCATION,
            env: ENV_LOCATION,
        })?;
        Ok(Self {
            store: store_path(args.store),
            update: VisitUpdate {
                location_id,
                completed: args.completed.unwrap_or(false),
                memo: args.memo,
            },
        })
    }
}

pub(crate) fn run_record_with(
    args: RecordArgs,
    now: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = open_store(&config.store)?;
    let record = store
        .record_visit(config.update, now)
        .map_err(store_error(&config.store))?;
    log::info!(
        "recorded visit {} for location {} in {}",
        record.id,
        record.location_id,
        config.store
    );
    write_json(writer, &record)
}

/// CLI arguments for the `list` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "List visit records, optionally by date range or location")]
#[ortho_config(prefix = "ROUTEHAIR")]
pub(crate) struct ListArgs {
    /// Path to the visit store.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
    /// First day to include (YYYY-MM-DD).
    #[arg(long, value_name = "date")]
    #[serde(default)]
    pub(crate) from: Option<NaiveDate>,
    /// Last day to include (YYYY-MM-DD).
    #[arg(long, value_name = "date")]
    #[serde(default)]
    pub(crate) to: Option<NaiveDate>,
    /// Only records for this location.
    #[arg(long = ARG_LOCATION, value_name = "id")]
    #[serde(default)]
    pub(crate) location: Option<String>,
}

impl ListArgs {
    pub(crate) fn into_config(self) -> Result<ListConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(ListConfig {
            store: store_path(merged.store),
            from: merged.from,
            to: merged.to,
            location: merged.location,
        })
    }
}

/// Resolved `list` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListConfig {
    pub(crate) store: Utf8PathBuf,
    pub(crate) from: Option<NaiveDate>,
    pub(crate) to: Option<NaiveDate>,
    pub(crate) location: Option<String>,
}

impl ListConfig {
    fn matches(&self, record: &VisitRecord) -> bool {
        self.from.is_none_or(|start| record.date >= start)
            && self.to.is_none_or(|end| record.date <= end)
            && self
                .location
                .as_deref()
                .is_none_or(|wanted| record.location_id == wanted)
    }
}

pub(crate) fn run_list_with(args: ListArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = open_store(&config.store)?;
    let candidates = match (config.from, config.to) {
        (Some(start), Some(end)) => store.find_by_date_range(start, end),
        _ => store.get_all(),
    };
    let records: Vec<VisitRecord> = candidates
        .into_iter()
        .filter(|record| config.matches(record))
        .collect();
    write_json(writer, &records)
}

/// CLI arguments for the `delete` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Delete a visit record by id")]
#[ortho_config(prefix = "ROUTEHAIR")]
pub(crate) struct DeleteArgs {
    /// Identifier of the record to delete.
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) id: Option<String>,
    /// Path to the visit store.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
}

#[derive(Debug, Serialize)]
struct DeleteReport {
    id: String,
    deleted: bool,
}

impl DeleteArgs {
    pub(crate) fn into_config(self) -> Result<DeleteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DeleteConfig::try_from(merged)
    }
}

/// Resolved `delete` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DeleteConfig {
    pub(crate) store: Utf8PathBuf,
    pub(crate) id: String,
}

impl TryFrom<DeleteArgs> for DeleteConfig {
    type Error = CliError;

    fn try_from(args: DeleteArgs) -> Result<Self, Self::Error> {
        let id = args.id.ok_or(CliError::MissingArgument {
            field: ARG_VISIT_ID,
            env: ENV_VISIT_ID,
        })?;
        Ok(Self {
            store: store_path(args.store),
            id,
        })
    }
}

pub(crate) fn run_delete_with(args: DeleteArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let DeleteConfig { store: path, id } = args.into_config()?;
    let deleted = open_store(&path)?
        .delete_by_id(&id)
        .map_err(store_error(&path))?;
    if deleted {
        log::info!("deleted visit {id} from {path}");
    }
    write_json(writer, &DeleteReport { id, deleted })
}

/// CLI arguments for the `clear` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Remove every visit record from the store")]
#[ortho_config(prefix = "ROUTEHAIR")]
pub(crate) struct ClearArgs {
    /// Path to the visit store.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
}

#[derive(Debug, Serialize)]
struct ClearReport<'a> {
    store: &'a str,
    cleared: bool,
}

impl ClearArgs {
    pub(crate) fn into_store_path(self) -> Result<Utf8PathBuf, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(store_path(merged.store))
    }
}

pub(crate) fn run_clear_with(args: ClearArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let path = args.into_store_path()?;
    open_store(&path)?.clear().map_err(store_error(&path))?;
    log::info!("cleared visit store {path}");
    write_json(
        writer,
        &ClearReport {
            store: path.as_str(),
            cleared: true,
        },
    )
}

/// CLI arguments for the `summary` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Summarise visit completion over a history window")]
#[ortho_config(prefix = "ROUTEHAIR")]
pub(crate) struct SummaryArgs {
    /// Path to the visit store.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
    /// Window relative to today.
    #[arg(long, value_name = "today|yesterday|last7days|all")]
    #[serde(default)]
    pub(crate) window: Option<HistoryWindow>,
}

impl SummaryArgs {
    /// Store path and window, defaulting the window to `all`.
    pub(crate) fn into_config(self) -> Result<(Utf8PathBuf, HistoryWindow), CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok((store_path(merged.store), merged.window.unwrap_or_default()))
    }
}

#[derive(Debug, Serialize)]
struct SummaryReport {
    window: HistoryWindow,
    today: NaiveDate,
    #[serde(flatten)]
    summary: VisitSummary,
}

pub(crate) fn run_summary_with(
    args: SummaryArgs,
    today: NaiveDate,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let (path, window) = args.into_config()?;
    let records = open_store(&path)?.get_all();
    let summary = VisitSummary::from_records(window.filter(&records, today));
    write_json(
        writer,
        &SummaryReport {
            window,
            today,
            summary,
        },
    )
}

#[cfg(test)]
pub(crate) fn record_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecordConfig, CliError> {
    let merged = RecordArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecordConfig::try_from(merged)
}
