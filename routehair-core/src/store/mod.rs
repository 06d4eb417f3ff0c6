//! Durable collection of visit records kept in a single text slot.
//!
//! A [`VisitStore`] owns one [`SlotMedium`], a handle to a named unit of
//! durable text such as a file or a database row. The whole collection is
//! serialised as a JSON array and rewritten on every mutation. Reads are
//! forgiving: a missing slot or an undecodable payload yields an empty
//! collection rather than an error.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::{VisitRecord, VisitUpdate};

mod codec;
mod memory;

#[cfg(feature = "store-file")]
mod file;
#[cfg(feature = "store-sqlite")]
mod sqlite;

pub use codec::{decode_records, encode_records};
pub use memory::MemorySlot;

#[cfg(feature = "store-file")]
pub use file::FileSlot;
#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteSlot, SqliteSlotError};

/// Boxed error raised by a slot backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure reported by a [`SlotMedium`].
#[derive(Debug, Error)]
pub enum SlotError {
    /// Reading the slot failed.
    #[error("failed to read slot {slot}: {source}")]
    Read {
        /// Slot name.
        slot: String,
        /// Backend failure.
        #[source]
        source: BoxError,
    },
    /// Writing the slot failed.
    #[error("failed to write slot {slot}: {source}")]
    Write {
        /// Slot name.
        slot: String,
        /// Backend failure.
        #[source]
        source: BoxError,
    },
    /// Removing the slot failed.
    #[error("failed to remove slot {slot}: {source}")]
    Remove {
        /// Slot name.
        slot: String,
        /// Backend failure.
        #[source]
        source: BoxError,
    },
}

impl SlotError {
    /// Wrap a read failure for `slot`.
    pub fn read(slot: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Read {
            slot: slot.into(),
            source: source.into(),
        }
    }

    /// Wrap a write failure for `slot`.
    pub fn write(slot: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Write {
            slot: slot.into(),
            source: source.into(),
        }
    }

    /// Wrap a removal failure for `slot`.
    pub fn remove(slot: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Remove {
            slot: slot.into(),
            source: source.into(),
        }
    }
}

/// A named unit of durable text.
///
/// # Examples
/// ```
/// use routehair_core::{MemorySlot, SlotMedium};
///
/// let mut slot = MemorySlot::default();
/// assert_eq!(slot.read()?, None);
/// slot.write("[]")?;
/// assert_eq!(slot.read()?.as_deref(), Some("[]"));
/// slot.remove()?;
/// assert_eq!(slot.read()?, None);
/// # Ok::<(), routehair_core::SlotError>(())
/// ```
pub trait SlotMedium: Send + fmt::Debug {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Current contents, or `None` when the slot has never been written or
    /// has been removed.
    fn read(&self) -> Result<Option<String>, SlotError>;

    /// Replace the contents.
    fn write(&mut self, payload: &str) -> Result<(), SlotError>;

    /// Delete the slot. Removing an absent slot succeeds.
    fn remove(&mut self) -> Result<(), SlotError>;
}

impl<M: SlotMedium + ?Sized> SlotMedium for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read(&self) -> Result<Option<String>, SlotError> {
        (**self).read()
    }

    fn write(&mut self, payload: &str) -> Result<(), SlotError> {
        (**self).write(payload)
    }

    fn remove(&mut self) -> Result<(), SlotError> {
        (**self).remove()
    }
}

/// Errors raised by [`VisitStore`] operations that report failure.
#[derive(Debug, Error)]
pub enum VisitStoreError {
    /// The slot backend failed.
    #[error(transparent)]
    Slot(#[from] SlotError),
    /// The slot held text that is not a visit record array.
    #[error("stored visit records are not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
    /// The records could not be serialised.
    #[error("failed to encode visit records: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Effect of [`VisitStore::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record had the id; the record was appended.
    Inserted,
    /// A record with the same id was replaced in place.
    Replaced,
}

/// Visit records persisted in one slot.
///
/// Every operation holds the slot lock for its whole read-modify-write
/// cycle, so a shared store may be used from several threads.
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use routehair_core::{MemorySlot, UpsertOutcome, VisitRecord, VisitStore};
///
/// let store = VisitStore::new(MemorySlot::default());
/// let date = NaiveDate::from_ymd_opt(2025, 10, 24).expect("valid date");
/// let at = Utc.with_ymd_and_hms(2025, 10, 24, 9, 0, 0).unwrap();
///
/// let record = VisitRecord::new("v1", "salon-1", date, true, at);
/// assert_eq!(store.upsert(record.clone())?, UpsertOutcome::Inserted);
/// assert_eq!(store.upsert(record.clone())?, UpsertOutcome::Replaced);
/// assert_eq!(store.get_all(), vec![record]);
/// # Ok::<(), routehair_core::VisitStoreError>(())
/// ```
#[derive(Debug, Default)]
pub struct VisitStore<M> {
    slot: Mutex<M>,
}

impl<M: SlotMedium> VisitStore<M> {
    /// Wrap `slot`.
    #[must_use]
    pub const fn new(slot: M) -> Self {
        Self {
            slot: Mutex::new(slot),
        }
    }

    /// Release the slot handle.
    #[must_use]
    pub fn into_inner(self) -> M {
        self.slot.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, M> {
        // The guarded value is a slot handle with no invariants of its own.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the collection, reporting slot and decode failures.
    ///
    /// # Errors
    /// Returns [`VisitStoreError::Slot`] when the slot cannot be read and
    /// [`VisitStoreError::Decode`] when its payload is not a record array.
    pub fn load(&self) -> Result<Vec<VisitRecord>, VisitStoreError> {
        let slot = self.lock();
        read_records(&*slot)
    }

    /// Every record in collection order; empty when the slot is missing,
    /// unreadable or corrupt.
    #[must_use]
    pub fn get_all(&self) -> Vec<VisitRecord> {
        let slot = self.lock();
        read_records(&*slot).unwrap_or_else(|err| {
            log::warn!("ignoring visit records in slot {}: {err}", slot.name());
            Vec::new()
        })
    }

    /// Replace the whole collection.
    ///
    /// # Errors
    /// Returns [`VisitStoreError`] when encoding or writing fails.
    pub fn save_all(&self, records: &[VisitRecord]) -> Result<(), VisitStoreError> {
        let mut slot = self.lock();
        write_records(&mut *slot, records)
    }

    /// Replace the record sharing `record.id`, or append it.
    ///
    /// # Errors
    /// Returns [`VisitStoreError`] when the slot cannot be read or written.
    /// A corrupt payload is discarded and replaced.
    pub fn upsert(&self, record: VisitRecord) -> Result<UpsertOutcome, VisitStoreError> {
        let mut slot = self.lock();
        let mut records = read_for_update(&*slot)?;
        let outcome = replace_or_push(&mut records, record);
        write_records(&mut *slot, &records)?;
        log::debug!("{outcome:?} visit record in slot {}", slot.name());
        Ok(outcome)
    }

    /// Remove the record with `id`, returning whether one was removed.
    ///
    /// Nothing is written when no record matches.
    ///
    /// # Errors
    /// Returns [`VisitStoreError`] when the slot cannot be read or written.
    pub fn delete_by_id(&self, id: &str) -> Result<bool, VisitStoreError> {
        let mut slot = self.lock();
        let mut records = read_for_update(&*slot)?;
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Ok(false);
        }
        write_records(&mut *slot, &records)?;
        Ok(true)
    }

    /// First record, in collection order, for `location_id`.
    #[must_use]
    pub fn find_by_location_id(&self, location_id: &str) -> Option<VisitRecord> {
        self.get_all()
            .into_iter()
            .find(|record| record.location_id == location_id)
    }

    /// Record for `location_id` dated `date`, if any.
    #[must_use]
    pub fn find_by_location_and_date(
        &self,
        location_id: &str,
        date: NaiveDate,
    ) -> Option<VisitRecord> {
        self.get_all()
            .into_iter()
            .find(|record| record.location_id == location_id && record.date == date)
    }

    /// Records dated within `start..=end`, in collection order.
    #[must_use]
    pub fn find_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<VisitRecord> {
        self.get_all()
            .into_iter()
            .filter(|record| (start..=end).contains(&record.date))
            .collect()
    }

    /// Save a checklist update as today's record for its location.
    ///
    /// An existing record for the same location dated `now`'s day keeps its
    /// id and position; otherwise a new record is appended.
    ///
    /// # Errors
    /// Returns [`VisitStoreError`] when the slot cannot be read or written.
    pub fn record_visit(
        &self,
        update: VisitUpdate,
        now: DateTime<Utc>,
    ) -> Result<VisitRecord, VisitStoreError> {
        let mut slot = self.lock();
        let mut records = read_for_update(&*slot)?;
        let today = now.date_naive();
        let existing = records
            .iter()
            .find(|record| record.location_id == update.location_id && record.date == today);
        let record = update.into_record(existing, now);
        let outcome = replace_or_push(&mut records, record.clone());
        write_records(&mut *slot, &records)?;
        log::debug!(
            "{outcome:?} visit {} for location {} on {today}",
            record.id,
            record.location_id
        );
        Ok(record)
    }

    /// Remove the slot and with it every record.
    ///
    /// # Errors
    /// Returns [`VisitStoreError::Slot`] when the slot cannot be removed.
    pub fn clear(&self) -> Result<(), VisitStoreError> {
        let mut slot = self.lock();
        slot.remove()?;
        Ok(())
    }
}

fn read_records<M: SlotMedium>(slot: &M) -> Result<Vec<VisitRecord>, VisitStoreError> {
    slot.read()?.map_or_else(
        || Ok(Vec::new()),
        |payload| decode_records(&payload).map_err(VisitStoreError::Decode),
    )
}

/// Read ahead of a rewrite. A corrupt payload is dropped, but a slot that
/// cannot be read at all is reported so it is never overwritten blind.
fn read_for_update<M: SlotMedium>(slot: &M) -> Result<Vec<VisitRecord>, VisitStoreError> {
    match read_records(slot) {
        Err(VisitStoreError::Decode(err)) => {
            log::warn!("replacing corrupt visit records in slot {}: {err}", slot.name());
            Ok(Vec::new())
        }
        other => other,
    }
}

fn write_records<M: SlotMedium>(
    slot: &mut M,
    records: &[VisitRecord],
) -> Result<(), VisitStoreError> {
    let payload = encode_records(records).map_err(VisitStoreError::Encode)?;
    slot.write(&payload)?;
    Ok(())
}

fn replace_or_push(records: &mut Vec<VisitRecord>, record: VisitRecord) -> UpsertOutcome {
    let Some(existing) = records.iter_mut().find(|existing| existing.id == record.id) else {
        records.push(record);
        return UpsertOutcome::Inserted;
    };
    *existing = record;
    UpsertOutcome::Replaced
}
