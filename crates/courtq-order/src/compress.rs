//! Cross-group compression: close the gaps a departed member leaves behind.
//!
//! When a submittal's ball-in-court changes, the vacated group may be left
//! with a hole in either tier. The caller queries the remaining members (the
//! moved item already excluded) and this engine renumbers both tiers: regular
//! back to a tight 1..N, urgent repacked toward 0.9 with the same policy
//! manual assignment uses.
//!
//! Runs only for single-assignee groups; a multi-assignee key never had
//! singular responsibility, so its queue is left alone.

use courtq_core::{GroupSnapshot, Order, OrderMutation};
use tracing::{debug, instrument};

use crate::categorize::categorize;
use crate::manual::{UrgentMember, pack_toward_newest};

/// Compute the mutations that retighten a vacated group.
///
/// Returns an empty list for empty snapshots, multi-assignee groups, and
/// groups already tight in both tiers.
#[must_use]
#[instrument(skip(snapshot), fields(group = %snapshot.group))]
pub fn compute_compression(snapshot: &GroupSnapshot) -> Vec<OrderMutation> {
    if snapshot.is_empty() {
        return Vec::new();
    }
    if snapshot.group.is_multi_assignee() {
        debug!("multi-assignee group left uncompressed");
        return Vec::new();
    }

    let categorized = categorize(snapshot, None);
    let mut mutations = Vec::new();

    for (index, record) in categorized.regular.iter().enumerate() {
        let new_order = Order::Regular(u32::try_from(index + 1).unwrap_or(u32::MAX));
        if record.order != new_order {
            mutations.push(OrderMutation::new(record.id.clone(), new_order));
        }
    }

    let members: Vec<UrgentMember<'_>> = categorized
        .urgent
        .iter()
        .map(|record| UrgentMember::existing(record))
        .collect();
    mutations.extend(pack_toward_newest(&members));

    debug!(count = mutations.len(), "compression computed");
    mutations
}
