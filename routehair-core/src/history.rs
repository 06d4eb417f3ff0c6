//! Views over visit history: relative date windows and completion summaries.

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::VisitRecord;

/// A date window relative to "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum HistoryWindow {
    /// Visits dated today.
    Today,
    /// Visits dated the day before today.
    Yesterday,
    /// Visits dated seven days ago or later.
    #[cfg_attr(feature = "serde", serde(rename = "last7days"))]
    Last7Days,
    /// Every visit.
    #[default]
    All,
}

/// Error returned when parsing an unknown [`HistoryWindow`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown history window '{0}' (expected today, yesterday, last7days or all)")]
pub struct UnknownWindow(pub String);

impl HistoryWindow {
    /// Return the window as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::Last7Days => "last7days",
            Self::All => "all",
        }
    }

    /// Whether a record dated `date` falls inside the window.
    #[must_use]
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::Today => date == today,
            Self::Yesterday => today.pred_opt() == Some(date),
            Self::Last7Days => today
                .checked_sub_days(Days::new(7))
                .is_none_or(|floor| date >= floor),
            Self::All => true,
        }
    }

    /// Records inside the window, in collection order.
    ///
    /// # Examples
    /// ```
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use routehair_core::{HistoryWindow, VisitRecord};
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2025, 10, d).expect("valid date");
    /// let at = Utc.with_ymd_and_hms(2025, 10, 24, 9, 0, 0).unwrap();
    /// let records = vec![
    ///     VisitRecord::new("a", "s1", day(24), true, at),
    ///     VisitRecord::new("b", "s2", day(23), false, at),
    /// ];
    ///
    /// let yesterday = HistoryWindow::Yesterday.filter(&records, day(24));
    /// assert_eq!(yesterday.len(), 1);
    /// assert_eq!(yesterday[0].id, "b");
    /// ```
    #[must_use]
    pub fn filter<'a>(self, records: &'a [VisitRecord], today: NaiveDate) -> Vec<&'a VisitRecord> {
        records
            .iter()
            .filter(|record| self.contains(record.date, today))
            .collect()
    }
}

impl std::fmt::Display for HistoryWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HistoryWindow {
    type Err = UnknownWindow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(Self::Today),
            "yesterday" => Ok(Self::Yesterday),
            "last7days" | "last-7-days" | "week" => Ok(Self::Last7Days),
            "all" => Ok(Self::All),
            _ => Err(UnknownWindow(s.to_owned())),
        }
    }
}

/// Completion statistics over a set of visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitSummary {
    /// Number of visits.
    pub total: usize,
    /// Number of visits marked completed.
    pub completed: usize,
    /// `completed / total` as a whole percentage; zero when there are no
    /// visits.
    pub completion_rate: u8,
}

impl VisitSummary {
    /// Summarise `records`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use routehair_core::{VisitRecord, VisitSummary};
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 10, 24).expect("valid date");
    /// let at = Utc.with_ymd_and_hms(2025, 10, 24, 9, 0, 0).unwrap();
    /// let records = vec![
    ///     VisitRecord::new("a", "s1", date, true, at),
    ///     VisitRecord::new("b", "s2", date, true, at),
    ///     VisitRecord::new("c", "s3", date, false, at),
    /// ];
    ///
    /// let summary = VisitSummary::from_records(records.iter());
    /// assert_eq!(summary.completed, 2);
    /// assert_eq!(summary.completion_rate, 67);
    /// ```
    #[must_use]
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a VisitRecord>,
    {
        let (total, completed) = records
            .into_iter()
            .fold((0_usize, 0_usize), |(total, completed), record| {
                (total + 1, completed + usize::from(record.completed))
            });
        Self {
            total,
            completed,
            completion_rate: completion_percent(completed, total),
        }
    }
}

/// Whole-percent ratio, rounding halves up, computed in integers.
#[expect(
    clippy::integer_division,
    reason = "rounded integer percentage; the divisor is checked non-zero"
)]
fn completion_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let scaled = completed.saturating_mul(200).saturating_add(total) / total.saturating_mul(2);
    u8::try_from(scaled.min(100)).unwrap_or(100)
}
