//! Facade crate for the routehair visit planner.
//!
//! Re-exports the catalogue, selection and route sequencing types, and the
//! visit store with its file and SQLite slots behind feature flags.

#![forbid(unsafe_code)]

pub use routehair_core::{
    Category, EARTH_RADIUS_KM, HistoryWindow, LatLng, Location, LocationError, LocationFilter,
    MAX_SELECTION, MIN_SELECTION, NearestNeighbourSequencer, OptimizationMode,
    OptimizationResult, RouteSequencer, RouteStop, Selection, SelectionChange, SelectionError,
    SelectionPolicy, SequencerConfig, SequencerConfigError, VisitRecord, VisitSummary,
    VisitUpdate, distance_km, filter_locations, haversine_km, optimize,
};

#[cfg(feature = "serde")]
pub use routehair_core::{
    MemorySlot, SlotError, SlotMedium, UpsertOutcome, VisitStore, VisitStoreError,
};

#[cfg(feature = "store-file")]
pub use routehair_core::FileSlot;

#[cfg(feature = "store-sqlite")]
pub use routehair_core::{SqliteSlot, SqliteSlotError};
