//! Core domain for the routehair field-sales engine.
//!
//! A sales representative selects salons to visit, asks for a visiting order
//! from a start coordinate and records the outcome of each visit. This crate
//! provides the domain types, the great-circle distance utility, the greedy
//! [`RouteSequencer`], the selection policy, and the [`VisitStore`] that
//! persists visit records in a single durable slot.
//!
//! Constructors that can fail return `Result` so invalid input surfaces
//! early; the sequencer itself is total over its input.

mod category;
mod distance;
mod filter;
mod history;
mod location;
mod route;
mod selection;
mod sequencer;
mod visit;

#[cfg(feature = "serde")]
mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use category::{Category, UnknownCategory};
pub use distance::{EARTH_RADIUS_KM, LatLng, distance_km, haversine_km};
pub use filter::{LocationFilter, filter_locations};
pub use history::{HistoryWindow, UnknownWindow, VisitSummary};
pub use location::{Location, LocationError};
pub use route::{OptimizationResult, RouteStop};
pub use selection::{
    MAX_SELECTION, MIN_SELECTION, Selection, SelectionChange, SelectionError, SelectionPolicy,
    can_add_selection, is_sequenceable,
};
pub use sequencer::{
    NearestNeighbourSequencer, OptimizationMode, RouteSequencer, SequencerConfig,
    SequencerConfigError, UnknownMode, optimize,
};
pub use visit::{VisitRecord, VisitUpdate};

#[cfg(feature = "serde")]
pub use store::{
    BoxError, MemorySlot, SlotError, SlotMedium, UpsertOutcome, VisitStore, VisitStoreError,
    decode_records, encode_records,
};

#[cfg(feature = "store-file")]
pub use store::FileSlot;

#[cfg(feature = "store-sqlite")]
pub use store::{SqliteSlot, SqliteSlotError};
