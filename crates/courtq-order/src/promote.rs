//! Ladder promotion engine: automatic escalation of a regular item into the
//! urgent tier when the approval workflow loops back to the submitter.
//!
//! # Packing policy ("push down")
//!
//! Promotions always contend for slot 0.9, the newest position:
//!
//! - 0.9 free → the item takes it; nobody else moves.
//! - 0.9 taken but fewer than nine slots filled → every occupied slot
//!   strictly above the lowest free slot shifts down one tenth to open 0.9.
//! - all nine filled → the 0.1 occupant (longest waiting) is evicted to
//!   regular rank 1, every regular rank steps up one, and the candidate ends
//!   at its prior rank + 1. The candidate does not reach the urgent tier in
//!   this overflow case.
//!
//! This deliberately differs from the manual engine's "pack toward 0.9"
//! policy: promotion displaces existing occupants downward so the most
//! recently escalated item always wins the front of the urgent line. Keep the
//! two policies separate; their tie-break and overflow behavior genuinely
//! differ.
//!
//! # Eligibility
//!
//! Only single-assignee groups promote (shared responsibility never
//! auto-escalates), and only items currently holding a regular rank. Anything
//! else yields [`OrderError::NotEligible`], a normal outcome the caller skips.

use courtq_core::workflow::WorkflowSnapshot;
use courtq_core::{GroupSnapshot, Order, OrderError, OrderMutation, SubmittalId, UrgentSlot};
use tracing::{debug, instrument, warn};

use crate::categorize::categorize;
use crate::manual::close_regular_gap;

/// Compute the mutations that escalate `item` into the urgent tier.
///
/// The caller has already decided the trigger fired (see
/// [`compute_promotion_if_triggered`] for the combined check).
///
/// # Errors
///
/// - [`OrderError::ItemNotFoundInGroup`] — snapshot/request mismatch.
/// - [`OrderError::NotEligible`] — multi-assignee group, or the item's order
///   is not a regular rank. Skip the item; nothing is wrong.
#[instrument(skip(snapshot), fields(group = %snapshot.group))]
pub fn compute_promotion(
    item: &SubmittalId,
    snapshot: &GroupSnapshot,
) -> Result<Vec<OrderMutation>, OrderError> {
    let record = snapshot
        .get(item)
        .ok_or_else(|| OrderError::ItemNotFoundInGroup {
            id: item.clone(),
            group: snapshot.group.clone(),
        })?;

    if snapshot.group.is_multi_assignee() {
        return Err(OrderError::NotEligible {
            id: item.clone(),
            reason: "responsibility is shared across multiple parties",
        });
    }
    let Order::Regular(rank) = record.order else {
        return Err(OrderError::NotEligible {
            id: item.clone(),
            reason: "order is not a regular backlog rank",
        });
    };

    let categorized = categorize(snapshot, Some(item));
    let mut taken = [false; UrgentSlot::COUNT];
    for record in &categorized.urgent {
        if let Some(slot) = record.order.slot() {
            taken[usize::from(slot.index()) - 1] = true;
        }
    }

    if !taken[usize::from(UrgentSlot::NEWEST.index()) - 1] {
        // 0.9 free: take it; close the gap the item leaves behind.
        let mut mutations = close_regular_gap(&categorized.regular, rank);
        mutations.push(OrderMutation::new(
            item.clone(),
            Order::Urgent(UrgentSlot::NEWEST),
        ));
        debug!(count = mutations.len(), "promotion onto free newest slot");
        return Ok(mutations);
    }

    if let Some(lowest_free) = taken.iter().position(|occupied| !occupied) {
        // 0.9 taken but a gap exists: shift everything above the lowest free
        // slot down one tenth, opening 0.9 for the candidate.
        let lowest_free_index = u8::try_from(lowest_free + 1).unwrap_or(u8::MAX);
        let mut mutations = close_regular_gap(&categorized.regular, rank);
        for record in &categorized.urgent {
            if let Some(slot) = record.order.slot()
                && slot.index() > lowest_free_index
                && let Some(down) = slot.down()
            {
                mutations.push(OrderMutation::new(record.id.clone(), Order::Urgent(down)));
            }
        }
        mutations.push(OrderMutation::new(
            item.clone(),
            Order::Urgent(UrgentSlot::NEWEST),
        ));
        debug!(count = mutations.len(), "promotion with push-down shift");
        return Ok(mutations);
    }

    // All nine slots occupied: the longest-waiting urgent item returns to the
    // front of the backlog and every regular rank steps up one. The candidate
    // stays regular, ending one rank later than it started.
    let Some(evicted) = categorized
        .urgent
        .iter()
        .find(|record| record.order == Order::Urgent(UrgentSlot::OLDEST))
    else {
        warn!("urgent tier reported full but slot 0.1 has no occupant");
        return Err(OrderError::NotEligible {
            id: item.clone(),
            reason: "urgent tier state is inconsistent",
        });
    };

    let mut mutations = vec![OrderMutation::new(evicted.id.clone(), Order::Regular(1))];
    for record in &categorized.regular {
        if let Some(existing) = record.order.rank() {
            mutations.push(OrderMutation::new(
                record.id.clone(),
                Order::Regular(existing.saturating_add(1)),
            ));
        }
    }
    mutations.push(OrderMutation::new(
        item.clone(),
        Order::Regular(rank.saturating_add(1)),
    ));
    debug!(count = mutations.len(), "promotion overflow: oldest urgent evicted");
    Ok(mutations)
}

/// Check the workflow loopback trigger, then promote.
///
/// # Errors
///
/// As [`compute_promotion`], plus [`OrderError::NotEligible`] when the
/// workflow is not currently waiting on the submitter.
pub fn compute_promotion_if_triggered(
    item: &SubmittalId,
    snapshot: &GroupSnapshot,
    workflow: &WorkflowSnapshot,
) -> Result<Vec<OrderMutation>, OrderError> {
    if !workflow.ball_back_with_submitter() {
        return Err(OrderError::NotEligible {
            id: item.clone(),
            reason: "workflow is not waiting on the submitter",
        });
    }
    compute_promotion(item, snapshot)
}
