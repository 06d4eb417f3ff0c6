//! `optimize` command: order a selection of locations from a JSON request.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use routehair_core::{
    LatLng, Location, NearestNeighbourSequencer, OptimizationMode, OptimizationResult,
    RouteSequencer, SelectionPolicy, SequencerConfig,
};
use routehair_fs::open_utf8_file;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};

use crate::{
    ARG_ALLOW_ANY_COUNT, ARG_AVERAGE_SPEED, ARG_DWELL_MINUTES, ARG_MODE, ARG_OPTIMIZE_REQUEST,
    CliError, ENV_OPTIMIZE_REQUEST, write_json,
};

/// CLI arguments for the `optimize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Order the selected locations by repeatedly visiting the \
                 nearest unvisited one. The request is a JSON object with a \
                 `start` coordinate, a `locations` array and an optional \
                 `mode`. Selections outside five to ten locations are \
                 rejected unless --allow-any-count is given.",
    about = "Sequence a visiting route"
)]
#[ortho_config(prefix = "ROUTEHAIR")]
pub(crate) struct OptimizeArgs {
    /// Path to a JSON file containing the optimisation request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Objective used to choose each next stop; overrides the request.
    #[arg(long = ARG_MODE, value_name = "distance|time")]
    #[serde(default)]
    pub(crate) mode: Option<OptimizationMode>,
    /// Sequence selections outside the five-to-ten policy.
    #[arg(long = ARG_ALLOW_ANY_COUNT)]
    #[serde(default)]
    pub(crate) allow_any_count: bool,
    /// Average travel speed used for the duration estimate.
    #[arg(long = ARG_AVERAGE_SPEED, value_name = "kmh")]
    #[serde(default)]
    pub(crate) average_speed_kmh: Option<f64>,
    /// Minutes spent at each stop.
    #[arg(long = ARG_DWELL_MINUTES, value_name = "minutes")]
    #[serde(default)]
    pub(crate) dwell_minutes: Option<u32>,
}

impl OptimizeArgs {
    pub(crate) fn into_config(self) -> Result<OptimizeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimizeConfig::try_from(merged)
    }
}

/// Resolved `optimize` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OptimizeConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) mode: Option<OptimizationMode>,
    pub(crate) allow_any_count: bool,
    pub(crate) sequencer: SequencerConfig,
}

impl TryFrom<OptimizeArgs> for OptimizeConfig {
    type Error = CliError;

    fn try_from(args: OptimizeArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_OPTIMIZE_REQUEST,
            env: ENV_OPTIMIZE_REQUEST,
        })?;
        let defaults = SequencerConfig::default();
        let sequencer = SequencerConfig {
            average_speed_kmh: args.average_speed_kmh.unwrap_or(defaults.average_speed_kmh),
            dwell_minutes: args.dwell_minutes.unwrap_or(defaults.dwell_minutes),
            ..defaults
        }
        .validate()?;
        Ok(Self {
            request_path,
            mode: args.mode,
            allow_any_count: args.allow_any_count,
            sequencer,
        })
    }
}

/// JSON body accepted by `optimize`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct OptimizeRequest {
    pub(crate) start: LatLng,
    pub(crate) locations: Vec<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) mode: Option<OptimizationMode>,
}

pub(crate) fn run_optimize_with(args: OptimizeArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let result = execute_optimize(args)?;
    write_json(writer, &result)
}

fn execute_optimize(args: OptimizeArgs) -> Result<OptimizationResult, CliError> {
    let config = args.into_config()?;
    let request = load_optimize_request(&config.request_path)?;
    if !config.allow_any_count {
        SelectionPolicy::default().check(request.locations.len())?;
    }
    let mode = config.mode.or(request.mode).unwrap_or_default();
    let sequencer = NearestNeighbourSequencer::with_config(config.sequencer);
    Ok(sequencer.sequence(request.start.into(), &request.locations, mode))
}

/// Loads a JSON-encoded [`OptimizeRequest`] from disk.
pub(crate) fn load_optimize_request(path: &Utf8Path) -> Result<OptimizeRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimizeConfig, CliError> {
    let merged = OptimizeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimizeConfig::try_from(merged)
}
