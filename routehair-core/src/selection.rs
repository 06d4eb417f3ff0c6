//! Cardinality gate on which selections may be sequenced.
//!
//! The policy is a pure predicate; it is the caller's job to surface a
//! rejection to the user and to skip sequencing when
//! [`is_sequenceable`] returns `false`. The sequencer itself never enforces
//! the bound.

use thiserror::Error;

/// Fewest locations a route may be planned for.
pub const MIN_SELECTION: usize = 5;

/// Most locations a route may be planned for.
pub const MAX_SELECTION: usize = 10;

/// Whether one more location may be selected when `current_count` are
/// already selected.
///
/// # Examples
/// ```
/// use routehair_core::can_add_selection;
///
/// assert!(can_add_selection(9));
/// assert!(!can_add_selection(10));
/// ```
#[must_use]
pub const fn can_add_selection(current_count: usize) -> bool {
    SelectionPolicy::DEFAULT.can_add(current_count)
}

/// Whether `count` selected locations may be sequenced.
///
/// # Examples
/// ```
/// use routehair_core::is_sequenceable;
///
/// assert!(!is_sequenceable(4));
/// assert!(is_sequenceable(5));
/// assert!(is_sequenceable(10));
/// assert!(!is_sequenceable(11));
/// ```
#[must_use]
pub const fn is_sequenceable(count: usize) -> bool {
    SelectionPolicy::DEFAULT.is_sequenceable(count)
}

/// Errors describing why a selection was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Fewer locations than the policy minimum.
    #[error("select at least {min} locations to plan a route (selected {count})")]
    TooFew {
        /// Number of selected locations.
        count: usize,
        /// Policy minimum.
        min: usize,
    },
    /// More locations than the policy maximum.
    #[error("at most {max} locations can be routed (selected {count})")]
    TooMany {
        /// Number of selected locations.
        count: usize,
        /// Policy maximum.
        max: usize,
    },
    /// Adding another location would exceed the maximum.
    #[error("cannot select more than {max} locations")]
    Full {
        /// Policy maximum.
        max: usize,
    },
}

/// Inclusive bounds on the size of a sequenceable selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Inclusive minimum.
    pub min: usize,
    /// Inclusive maximum.
    pub max: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SelectionPolicy {
    /// The five-to-ten policy used by route planning.
    pub const DEFAULT: Self = Self {
        min: MIN_SELECTION,
        max: MAX_SELECTION,
    };

    /// Whether a selection of `current_count` may grow by one.
    #[must_use]
    pub const fn can_add(&self, current_count: usize) -> bool {
        current_count < self.max
    }

    /// Whether `count` lies within the inclusive bounds.
    #[must_use]
    pub const fn is_sequenceable(&self, count: usize) -> bool {
        count >= self.min && count <= self.max
    }

    /// Explain why `count` is not sequenceable.
    ///
    /// # Errors
    /// Returns [`SelectionError::TooFew`] or [`SelectionError::TooMany`] when
    /// `count` falls outside the bounds.
    pub const fn check(&self, count: usize) -> Result<(), SelectionError> {
        if count < self.min {
            return Err(SelectionError::TooFew {
                count,
                min: self.min,
            });
        }
        if count > self.max {
            return Err(SelectionError::TooMany {
                count,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Effect of [`Selection::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// The location was added at the end of the selection.
    Added,
    /// The location was already selected and has been removed.
    Removed,
}

/// Ordered set of selected location identifiers.
///
/// Selection order is preserved because it is the order candidates are
/// handed to the sequencer, which decides ties by input position.
///
/// # Examples
/// ```
/// use routehair_core::{Selection, SelectionChange};
///
/// let mut selection = Selection::default();
/// assert_eq!(selection.toggle("a")?, SelectionChange::Added);
/// assert_eq!(selection.toggle("a")?, SelectionChange::Removed);
/// assert!(selection.is_empty());
/// # Ok::<(), routehair_core::SelectionError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    policy: SelectionPolicy,
    ids: Vec<String>,
}

impl Selection {
    /// An empty selection governed by `policy`.
    #[must_use]
    pub const fn with_policy(policy: SelectionPolicy) -> Self {
        Self {
            policy,
            ids: Vec::new(),
        }
    }

    /// Add `id` if absent, remove it if present.
    ///
    /// # Errors
    /// Returns [`SelectionError::Full`] when adding would exceed the policy
    /// maximum; the selection is left unchanged.
    pub fn toggle(&mut self, id: &str) -> Result<SelectionChange, SelectionError> {
        if let Some(position) = self.ids.iter().position(|selected| selected == id) {
            self.ids.remove(position);
            return Ok(SelectionChange::Removed);
        }
        if !self.policy.can_add(self.ids.len()) {
            return Err(SelectionError::Full {
                max: self.policy.max,
            });
        }
        self.ids.push(id.to_owned());
        Ok(SelectionChange::Added)
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }

    /// Selected identifiers in selection order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of selected locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether the selection may be sequenced under its policy.
    #[must_use]
    pub fn is_sequenceable(&self) -> bool {
        self.policy.is_sequenceable(self.ids.len())
    }

    /// Remove every selected location.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
