//! Workspace and request fixtures shared by the CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use routehair_core::{LatLng, OptimizationMode, test_support};
use tempfile::TempDir;

use crate::optimize::OptimizeRequest;

/// Temporary directory with a UTF-8 root path.
pub(super) fn temp_workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture");
}

/// Gangnam start with the first `count` sample salons.
pub(super) fn gangnam_request(count: usize, mode: Option<OptimizationMode>) -> OptimizeRequest {
    OptimizeRequest {
        start: LatLng::from(test_support::gangnam_start()),
        locations: test_support::sample_selection(count),
        mode,
    }
}

pub(super) fn write_request(path: &Utf8Path, request: &OptimizeRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialize request");
    write_utf8(path, payload.as_bytes());
}

/// Run a parsed command line against `writer` at a fixed instant.
pub(super) fn run_argv(
    argv: &[&str],
    now: chrono::DateTime<chrono::Utc>,
    writer: &mut Vec<u8>,
) -> Result<(), crate::CliError> {
    let cli = crate::Cli::try_parse_from(argv.iter().copied())?;
    crate::dispatch(cli.command, now, writer)
}
