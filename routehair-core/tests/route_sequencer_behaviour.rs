//! Behavioural tests for the nearest-neighbour sequencer using rstest-bdd.

use std::cell::RefCell;

use geo::Coord;
use routehair_core::{
    Category, Location, OptimizationMode, OptimizationResult, SelectionError, SelectionPolicy,
    optimize,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct SequencerWorld {
    start: RefCell<Option<Coord<f64>>>,
    selection: RefCell<Vec<Location>>,
    result: RefCell<Option<OptimizationResult>>,
}

impl SequencerWorld {
    fn result(&self) -> OptimizationResult {
        self.result
            .borrow()
            .clone()
            .expect("the route should have been sequenced")
    }
}

#[fixture]
fn world() -> SequencerWorld {
    SequencerWorld::default()
}

fn salon(id: &str, lat: f64, lng: f64) -> Location {
    Location::new(id, id, "Seoul Gangnam-gu", Coord { x: lng, y: lat }, Category::HairSalon)
        .expect("valid coordinate")
}

fn gangnam_salons() -> Vec<Location> {
    vec![
        salon("sinnonhyeon", 37.5045, 127.0250),
        salon("nonhyeon", 37.5110, 127.0214),
        salon("cheongdam", 37.5172, 127.0473),
        salon("yeoksam", 37.4946, 127.0410),
        salon("dogok", 37.4860, 127.0330),
    ]
}

#[given("a start at Gangnam Station")]
fn given_start(world: &SequencerWorld) {
    world.start.replace(Some(Coord {
        x: 127.0276,
        y: 37.4979,
    }));
}

#[given("the five Gangnam salons")]
fn given_salons(world: &SequencerWorld) {
    world.selection.replace(gangnam_salons());
}

#[given("a selection of {count} salons")]
fn given_sized_selection(world: &SequencerWorld, count: usize) {
    let salons = gangnam_salons().into_iter().take(count).collect();
    world.selection.replace(salons);
}

fn sequence(world: &SequencerWorld, mode: OptimizationMode) {
    let start = (*world.start.borrow()).expect("start should be set");
    let result = optimize(start, &world.selection.borrow(), mode);
    world.result.replace(Some(result));
}

#[when("the route is sequenced in distance mode")]
fn when_distance(world: &SequencerWorld) {
    sequence(world, OptimizationMode::Distance);
}

#[when("the route is sequenced in time mode")]
fn when_time(world: &SequencerWorld) {
    sequence(world, OptimizationMode::Time);
}

#[then("the visiting order is {order}")]
fn then_order(world: &SequencerWorld, order: String) {
    let expected: Vec<&str> = order.split(',').map(str::trim).collect();
    let result = world.result();
    assert_eq!(result.location_ids(), expected);
    let orders: Vec<u32> = result.stops.iter().map(|stop| stop.order).collect();
    let gap_free: Vec<u32> = (1..=5).collect();
    assert_eq!(orders, gap_free);
}

#[then("the total distance is {km} km")]
fn then_distance(world: &SequencerWorld, km: f64) {
    let actual = world.result().total_distance_km;
    assert!((actual - km).abs() < 1e-9, "expected {km} km, got {actual}");
}

#[then("the total duration is {minutes} minutes")]
fn then_duration(world: &SequencerWorld, minutes: u32) {
    assert_eq!(world.result().total_duration_minutes, minutes);
}

#[then("the route has no stops")]
fn then_empty(world: &SequencerWorld) {
    assert!(world.result().is_empty());
}

#[then("the selection is rejected as too small")]
fn then_too_small(world: &SequencerWorld) {
    let count = world.selection.borrow().len();
    assert_eq!(
        SelectionPolicy::default().check(count),
        Err(SelectionError::TooFew { count, min: 5 })
    );
}

#[scenario(path = "tests/features/route_sequencer.feature", index = 0)]
fn distance_mode(world: SequencerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_sequencer.feature", index = 1)]
fn time_mode(world: SequencerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_sequencer.feature", index = 2)]
fn empty_selection(world: SequencerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_sequencer.feature", index = 3)]
fn below_minimum(world: SequencerWorld) {
    let _ = world;
}
