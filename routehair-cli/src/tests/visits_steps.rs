//! Behaviour-driven step definitions for the visit record commands.

use super::helpers::{run_argv, temp_workspace};
use super::*;
use camino::Utf8PathBuf;
use chrono::{DateTime, TimeZone, Utc};
use routehair_core::VisitRecord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use tempfile::TempDir;

#[derive(Debug)]
struct VisitsWorld {
    _tmp: TempDir,
    root: Utf8PathBuf,
    store: RefCell<Utf8PathBuf>,
    hour: Cell<u32>,
    output: RefCell<Option<Value>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl VisitsWorld {
    fn new() -> Self {
        let (tmp, root) = temp_workspace();
        let store = root.join(DEFAULT_STORE_PATH);
        Self {
            _tmp: tmp,
            root,
            store: RefCell::new(store),
            hour: Cell::new(9),
            output: RefCell::new(None),
            result: RefCell::new(None),
        }
    }

    /// Each command runs an hour after the previous one, on the same day.
    fn tick(&self) -> DateTime<Utc> {
        let hour = self.hour.get();
        self.hour.set(hour.saturating_add(1).min(23));
        Utc.with_ymd_and_hms(2025, 10, 24, hour, 0, 0)
            .single()
            .expect("unambiguous timestamp")
    }

    fn run(&self, command: &str, extra: &[&str]) {
        let store = self.store.borrow();
        let mut argv = vec!["routehair", command, "--store", store.as_str()];
        argv.extend_from_slice(extra);
        let mut stdout = Vec::new();
        let outcome = run_argv(&argv, self.tick(), &mut stdout);
        let parsed = outcome
            .is_ok()
            .then(|| serde_json::from_slice(&stdout).expect("JSON output"));
        self.output.replace(parsed);
        self.result.replace(Some(outcome));
    }

    fn output(&self) -> Value {
        self.output.borrow().clone().expect("command produced output")
    }

    fn listed(&self) -> Vec<VisitRecord> {
        self.run("list", &[]);
        serde_json::from_value(self.output()).expect("record array")
    }
}

#[fixture]
fn world() -> VisitsWorld {
    VisitsWorld::new()
}

#[given("an empty visit store in {file}")]
fn empty_store(#[from(world)] world: &VisitsWorld, file: String) {
    world.store.replace(world.root.join(file));
}

#[when("I record {location} as completed")]
fn record_completed(#[from(world)] world: &VisitsWorld, location: String) {
    world.run("record", &["--location", &location, "--completed", "true"]);
}

#[when("I record {location} as pending")]
fn record_pending(#[from(world)] world: &VisitsWorld, location: String) {
    world.run("record", &["--location", &location, "--completed", "false"]);
}

#[when("I save the checklist for {location} as completed with memo \"{memo}\"")]
fn record_with_memo(#[from(world)] world: &VisitsWorld, location: String, memo: String) {
    world.run(
        "record",
        &["--location", &location, "--completed", "true", "--memo", &memo],
    );
}

#[when("I record a visit without a location")]
fn record_without_location(#[from(world)] world: &VisitsWorld) {
    world.run("record", &["--completed", "true"]);
}

#[when("I request the {window} summary")]
fn request_summary(#[from(world)] world: &VisitsWorld, window: String) {
    world.run("summary", &["--window", &window]);
}

#[when("I delete visit {id}")]
fn delete_visit(#[from(world)] world: &VisitsWorld, id: String) {
    world.run("delete", &[&id]);
}

#[when("I clear the store")]
fn clear_store(#[from(world)] world: &VisitsWorld) {
    world.run("clear", &[]);
}

#[then("the store lists {count} records")]
fn store_lists(#[from(world)] world: &VisitsWorld, count: usize) {
    assert_eq!(world.listed().len(), count);
}

#[then("the record for {location} is completed with memo \"{memo}\"")]
fn record_has_memo(#[from(world)] world: &VisitsWorld, location: String, memo: String) {
    let records = world.listed();
    let record = records
        .iter()
        .find(|record| record.location_id == location)
        .expect("record for location");
    assert!(record.completed);
    assert_eq!(record.memo.as_deref(), Some(memo.as_str()));
}

#[then("the summary reports {total} visits, {completed} completed and a {rate} percent rate")]
fn summary_reports(#[from(world)] world: &VisitsWorld, total: u64, completed: u64, rate: u64) {
    let summary = world.output();
    assert_eq!(summary["total"], total);
    assert_eq!(summary["completed"], completed);
    assert_eq!(summary["completion_rate"], rate);
}

#[then("the delete reports no change")]
fn delete_reports_no_change(#[from(world)] world: &VisitsWorld) {
    assert_eq!(world.output()["deleted"], false);
}

#[then("the command fails because the location is missing")]
fn command_fails_missing_location(#[from(world)] world: &VisitsWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_LOCATION),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_visits_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/visit_commands.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: VisitsWorld) {
            let _ = world;
        }
    };
}

register_visits_scenario!(
    visits_checklist_twice,
    "saving a checklist twice on one day keeps one record"
);
register_visits_scenario!(
    visits_sqlite_summary,
    "summarising today's visits in a SQLite store"
);
register_visits_scenario!(
    visits_delete_unknown,
    "deleting an unknown visit reports no change"
);
register_visits_scenario!(visits_clear, "clearing the store");
register_visits_scenario!(visits_missing_location, "recording without a location");
