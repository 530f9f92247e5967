//! Group categorization: partition a snapshot into the urgent and regular
//! subsets, each sorted ascending by current order.
//!
//! Pure partition + sort, no mutation. The acted-on item is excluded so the
//! engines can reason about "everyone else" and re-insert the item where the
//! request puts it. Unordered (absent) members belong to neither subset.

#![allow(clippy::module_name_repetitions)]

use courtq_core::{GroupSnapshot, OrderedRecord, SubmittalId};

/// The two ordered tiers of one group, borrowed from its snapshot.
#[derive(Debug, Default)]
pub struct Categorized<'a> {
    /// Urgent members, ascending by slot (0.1 first = longest waiting).
    pub urgent: Vec<&'a OrderedRecord>,
    /// Regular members, ascending by rank (1 first).
    pub regular: Vec<&'a OrderedRecord>,
}

/// Partition `snapshot` into urgent and regular subsets, excluding `exclude`.
///
/// Sorts are stable, so anomalous duplicate orders keep their snapshot
/// position as the tie-break.
#[must_use]
pub fn categorize<'a>(
    snapshot: &'a GroupSnapshot,
    exclude: Option<&SubmittalId>,
) -> Categorized<'a> {
    let mut categorized = Categorized::default();

    for record in &snapshot.records {
        if exclude.is_some_and(|id| id == &record.id) {
            continue;
        }
        if record.order.is_urgent() {
            categorized.urgent.push(record);
        } else if record.order.is_regular() {
            categorized.regular.push(record);
        }
    }

    categorized.urgent.sort_by_key(|record| record.order);
    categorized.regular.sort_by_key(|record| record.order);
    categorized
}
