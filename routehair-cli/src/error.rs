//! Error types emitted by the routehair CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use routehair_core::{SelectionError, SequencerConfigError, SqliteSlotError, VisitStoreError};
use thiserror::Error;

/// Errors emitted by the routehair CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Environment variable that may supply the value.
        env: &'static str,
    },
    /// Opening the optimisation request file failed.
    #[error("failed to open optimize request at {path:?}: {source}")]
    OpenRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The optimisation request JSON could not be decoded.
    #[error("failed to parse optimize request JSON at {path:?}: {source}")]
    ParseRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The selection size is outside the routing policy.
    #[error("{0}; pass --allow-any-count to sequence anyway")]
    Selection(#[from] SelectionError),
    /// Sequencer calibration overrides were rejected.
    #[error("invalid sequencer calibration: {0}")]
    Calibration(#[from] SequencerConfigError),
    /// Opening a SQLite-backed visit store failed.
    #[error(transparent)]
    OpenSqliteStore(#[from] SqliteSlotError),
    /// A visit store operation failed.
    #[error("visit store {path:?} failed: {source}")]
    Store {
        /// Store path.
        path: Utf8PathBuf,
        /// Store failure.
        #[source]
        source: VisitStoreError,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
