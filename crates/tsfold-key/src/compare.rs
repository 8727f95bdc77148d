//! Key comparators used by the group-by-then-sort engine.

use std::cmp::Ordering;

use tsfold_types::SortDirection;

use crate::OrderingKey;

/// Compares ordering keys.
pub trait KeyComparator: Send + Sync {
    /// Orders two keys.
    fn compare(&self, a: &OrderingKey, b: &OrderingKey) -> Ordering;
}

/// Compares the rendered group identities of two keys, ignoring sort values.
#[must_use]
pub fn compare_group_only(a: &OrderingKey, b: &OrderingKey) -> Ordering {
    a.group_identity().cmp(b.group_identity())
}

/// Orders keys by group identity only.
///
/// Used to delimit reduce groups: two keys belong to the same group exactly
/// when this comparator reports [`Ordering::Equal`]. The direction is applied
/// so that its order agrees with the group prefix of [`TotalOrderComparator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupComparator {
    direction: SortDirection,
}

impl GroupComparator {
    /// Creates a group comparator.
    #[must_use]
    pub const fn new(direction: SortDirection) -> Self {
        Self { direction }
    }

    /// Returns true if both keys belong to the same reduce group.
    #[must_use]
    pub fn same_group(&self, a: &OrderingKey, b: &OrderingKey) -> bool {
        compare_group_only(a, b) == Ordering::Equal
    }
}

impl KeyComparator for GroupComparator {
    fn compare(&self, a: &OrderingKey, b: &OrderingKey) -> Ordering {
        self.direction.apply(compare_group_only(a, b))
    }
}

/// Orders keys by group identity, then by sort value.
///
/// The whole ordering is flipped for [`SortDirection::Descending`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalOrderComparator {
    direction: SortDirection,
}

impl TotalOrderComparator {
    /// Creates a total order comparator.
    #[must_use]
    pub const fn new(direction: SortDirection) -> Self {
        Self { direction }
    }

    /// The configured direction.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Compares two sort values in the configured direction.
    #[must_use]
    pub fn compare_values(&self, a: f64, b: f64) -> Ordering {
        self.direction.apply(a.total_cmp(&b))
    }
}

impl KeyComparator for TotalOrderComparator {
    fn compare(&self, a: &OrderingKey, b: &OrderingKey) -> Ordering {
        let ordering = compare_group_only(a, b)
            .then_with(|| a.sort_value().total_cmp(&b.sort_value()));
        self.direction.apply(ordering)
    }
}
