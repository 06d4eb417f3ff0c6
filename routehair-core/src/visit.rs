//! Persisted outcomes of visiting a location on a given day.

use chrono::{DateTime, NaiveDate, Utc};

/// Outcome of one visit, owned by a [`VisitStore`](crate::VisitStore).
///
/// Records are replaced wholesale on edit. `date` serialises as
/// `YYYY-MM-DD`, whose lexical order is its chronological order, and
/// `recorded_at` as an RFC 3339 timestamp with full sub-second precision.
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use routehair_core::VisitRecord;
///
/// let date = NaiveDate::from_ymd_opt(2025, 10, 24).expect("valid date");
/// let at = Utc.with_ymd_and_hms(2025, 10, 24, 10, 30, 0).unwrap();
/// let record = VisitRecord::new("v1", "salon-1", date, true, at)
///     .with_memo("Owner interested; revisit next week");
///
/// assert!(record.completed);
/// assert_eq!(record.memo.as_deref(), Some("Owner interested; revisit next week"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitRecord {
    /// Unique, immutable identifier.
    pub id: String,
    /// Identifier of the visited [`Location`](crate::Location).
    pub location_id: String,
    /// Calendar day of the visit.
    pub date: NaiveDate,
    /// Whether the visit objective was achieved.
    pub completed: bool,
    /// Free-text notes: contact person, reaction, follow-ups.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub memo: Option<String>,
    /// When the record was last written.
    pub recorded_at: DateTime<Utc>,
}

impl VisitRecord {
    /// Construct a record without a memo.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        location_id: impl Into<String>,
        date: NaiveDate,
        completed: bool,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            location_id: location_id.into(),
            date,
            completed,
            memo: None,
            recorded_at,
        }
    }

    /// Attach a memo.
    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }
}

/// A checklist save: the fields a representative edits for one location.
///
/// [`VisitUpdate::into_record`] turns it into a full [`VisitRecord`],
/// reusing the identity of an existing record when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitUpdate {
    /// Location the update is for.
    pub location_id: String,
    /// Whether the visit objective was achieved.
    pub completed: bool,
    /// Raw memo text; blank input clears the memo.
    pub memo: Option<String>,
}

impl VisitUpdate {
    /// Construct an update without a memo.
    #[must_use]
    pub fn new(location_id: impl Into<String>, completed: bool) -> Self {
        Self {
            location_id: location_id.into(),
            completed,
            memo: None,
        }
    }

    /// Attach memo text.
    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Build the record to persist at `now`.
    ///
    /// The id is taken from `existing` when given, otherwise generated as
    /// `visit-{location_id}-{unix_millis}`. The date is `now`'s UTC calendar
    /// day and the memo is trimmed, with blank memos dropped.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use routehair_core::VisitUpdate;
    ///
    /// let now = Utc.timestamp_millis_opt(1_761_301_800_000).unwrap();
    /// let record = VisitUpdate::new("salon-7", false)
    ///     .with_memo("   ")
    ///     .into_record(None, now);
    ///
    /// assert_eq!(record.id, "visit-salon-7-1761301800000");
    /// assert_eq!(record.date.to_string(), "2025-10-24");
    /// assert!(record.memo.is_none());
    /// ```
    #[must_use]
    pub fn into_record(self, existing: Option<&VisitRecord>, now: DateTime<Utc>) -> VisitRecord {
        let id = existing.map_or_else(
            || format!("visit-{}-{}", self.location_id, now.timestamp_millis()),
            |record| record.id.clone(),
        );
        let memo = self
            .memo
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());
        VisitRecord {
            id,
            location_id: self.location_id,
            date: now.date_naive(),
            completed: self.completed,
            memo,
            recorded_at: now,
        }
    }
}
