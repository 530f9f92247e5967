//! Manual reorder engine: realize a user's explicit target order for one
//! item while repacking the rest of its group.
//!
//! # Overview
//!
//! A drag-and-drop "insert at position K" arrives as "set order = K". The
//! engine validates the target, then branches on its class:
//!
//! - **Absent** — clear the item's order; if it held a regular rank, every
//!   higher rank steps down one to close the gap.
//! - **Regular R** — insert the item into the regular list at position
//!   `floor(R) − 1` (clamped to the list) and renumber the whole list 1..N.
//!   The urgent tier is left untouched.
//! - **Urgent U** — close the regular gap if the item held a rank, then
//!   repack the entire urgent subset with [`pack_toward_newest`]: members
//!   sorted ascending occupy slots `(10 − k)/10 … 0.9`, so a group of three
//!   lands on 0.7, 0.8, 0.9 regardless of the values they held before.
//!
//! Output is the complete mutation set for every item whose value changed;
//! unaffected items are omitted.

use courtq_core::{GroupSnapshot, Order, OrderError, OrderMutation, OrderedRecord, SubmittalId, UrgentSlot};
use tracing::{debug, instrument, warn};

use crate::categorize::categorize;
use crate::validate::validate_target;

/// Compute the mutations that give `item` the proposed `target` order.
///
/// `snapshot` must contain every member of the item's group, the item
/// included. The caller applies the result as one atomic transaction.
///
/// # Errors
///
/// - [`OrderError::InvalidOrder`] — the target fails validation, or it names
///   an urgent slot while nine other items already hold urgent positions.
/// - [`OrderError::ItemNotFoundInGroup`] — the snapshot is inconsistent with
///   the request; nothing is computed.
#[instrument(skip(snapshot), fields(group = %snapshot.group))]
pub fn compute_manual_reorder(
    item: &SubmittalId,
    target: Option<f64>,
    snapshot: &GroupSnapshot,
) -> Result<Vec<OrderMutation>, OrderError> {
    let target = validate_target(target)?;
    let record = snapshot
        .get(item)
        .ok_or_else(|| OrderError::ItemNotFoundInGroup {
            id: item.clone(),
            group: snapshot.group.clone(),
        })?;
    let prior = record.order;

    let mutations = match target {
        Order::Absent => clear_order(item, prior, snapshot),
        Order::Regular(rank) => insert_regular(item, prior, rank, snapshot),
        Order::Urgent(slot) => assign_urgent(item, prior, slot, snapshot)?,
    };
    debug!(count = mutations.len(), "manual reorder computed");
    Ok(mutations)
}

/// Target = Absent: unorder the item and close the regular gap it leaves.
fn clear_order(item: &SubmittalId, prior: Order, snapshot: &GroupSnapshot) -> Vec<OrderMutation> {
    let mut mutations = Vec::new();
    match prior {
        Order::Regular(rank) => {
            let categorized = categorize(snapshot, Some(item));
            mutations.extend(close_regular_gap(&categorized.regular, rank));
            mutations.push(OrderMutation::new(item.clone(), Order::Absent));
        }
        // Leaving the urgent tier does not repack it; leaving nothing is a no-op.
        Order::Urgent(_) => mutations.push(OrderMutation::new(item.clone(), Order::Absent)),
        Order::Absent => {}
    }
    mutations
}

/// Target = Regular: insert at the requested position and renumber 1..N.
fn insert_regular(
    item: &SubmittalId,
    prior: Order,
    rank: u32,
    snapshot: &GroupSnapshot,
) -> Vec<OrderMutation> {
    let categorized = categorize(snapshot, Some(item));

    let position = usize::min(rank.saturating_sub(1) as usize, categorized.regular.len());
    let mut sequence: Vec<(&SubmittalId, Order)> = categorized
        .regular
        .iter()
        .map(|record| (&record.id, record.order))
        .collect();
    sequence.insert(position, (item, prior));

    let mut mutations = Vec::new();
    for (index, (id, current)) in sequence.iter().enumerate() {
        let new_order = Order::Regular(u32::try_from(index + 1).unwrap_or(u32::MAX));
        if *current != new_order {
            mutations.push(OrderMutation::new((*id).clone(), new_order));
        }
    }
    mutations
}

/// Target = Urgent: close the regular gap, then repack the whole urgent tier.
fn assign_urgent(
    item: &SubmittalId,
    prior: Order,
    slot: UrgentSlot,
    snapshot: &GroupSnapshot,
) -> Result<Vec<OrderMutation>, OrderError> {
    let categorized = categorize(snapshot, Some(item));
    if categorized.urgent.len() >= UrgentSlot::COUNT {
        return Err(OrderError::InvalidOrder {
            value: slot.as_stored(),
            reason: "no free urgent slot: all nine urgent positions are occupied".to_string(),
        });
    }

    let mut mutations = Vec::new();
    if let Order::Regular(rank) = prior {
        mutations.extend(close_regular_gap(&categorized.regular, rank));
    }

    // Merge the item into the ascending urgent sequence at its requested
    // value. On a slot tie the existing occupant stays first; the acted-on
    // item is the more recently touched one and sorts after it.
    let requested = Order::Urgent(slot);
    let position = categorized
        .urgent
        .partition_point(|record| record.order <= requested);
    let mut members: Vec<UrgentMember<'_>> = categorized
        .urgent
        .iter()
        .map(|record| UrgentMember::existing(record))
        .collect();
    members.insert(
        position,
        UrgentMember {
            id: item,
            current: prior,
        },
    );

    mutations.extend(pack_toward_newest(&members));
    Ok(mutations)
}

/// Decrement every regular rank above `removed_rank` by one.
pub(crate) fn close_regular_gap(
    regular: &[&OrderedRecord],
    removed_rank: u32,
) -> Vec<OrderMutation> {
    regular
        .iter()
        .filter_map(|record| match record.order {
            Order::Regular(rank) if rank > removed_rank => Some(OrderMutation::new(
                record.id.clone(),
                Order::Regular(rank - 1),
            )),
            _ => None,
        })
        .collect()
}

/// One urgent-tier member in its final ascending position, paired with the
/// order it actually holds right now.
pub(crate) struct UrgentMember<'a> {
    pub id: &'a SubmittalId,
    pub current: Order,
}

impl<'a> UrgentMember<'a> {
    pub(crate) const fn existing(record: &'a OrderedRecord) -> Self {
        Self {
            id: &record.id,
            current: record.order,
        }
    }
}

/// The "pack toward 0.9" policy shared by manual assignment and cross-group
/// compression: `k` members in ascending (oldest-first) order occupy slots
/// `(10 − k)/10 … 0.9`, compressing out gaps without forcing anyone to 0.1.
///
/// Distinct from the promotion engine's "push down" policy, which contends
/// for 0.9 and displaces existing occupants downward.
pub(crate) fn pack_toward_newest(ascending: &[UrgentMember<'_>]) -> Vec<OrderMutation> {
    let count = ascending.len();
    let Some(base) = UrgentSlot::COUNT.checked_sub(count) else {
        warn!(count, "more than nine urgent members; urgent tier left untouched");
        return Vec::new();
    };

    ascending
        .iter()
        .enumerate()
        .filter_map(|(index, member)| {
            let slot_index = u8::try_from(base + index + 1).ok()?;
            let slot = UrgentSlot::from_index(slot_index)?;
            let new_order = Order::Urgent(slot);
            (member.current != new_order)
                .then(|| OrderMutation::new(member.id.clone(), new_order))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mutation(id: &str, order: Order) -> OrderMutation {
        OrderMutation::new(id, order)
    }

    fn slot(index: u8) -> UrgentSlot {
        UrgentSlot::from_index(index).expect("valid slot index")
    }

    fn id(raw: &str) -> SubmittalId {
        SubmittalId::from(raw)
    }

    #[test]
    fn unknown_item_is_rejected() {
        let snapshot = GroupSnapshot::new("Alice", vec![]);
        let err = compute_manual_reorder(&id("sub-1"), Some(1.0), &snapshot)
            .expect_err("unknown item");
        assert!(matches!(err, OrderError::ItemNotFoundInGroup { .. }));
    }

    #[test]
    fn invalid_target_is_rejected_before_lookup() {
        let snapshot = GroupSnapshot::new("Alice", vec![]);
        let err = compute_manual_reorder(&id("sub-1"), Some(0.0), &snapshot)
            .expect_err("zero target");
        assert!(matches!(err, OrderError::InvalidOrder { .. }));
    }

    #[test]
    fn clearing_a_regular_item_closes_the_gap() {
        let snapshot = GroupSnapshot::new(
            "Alice",
            vec![
                OrderedRecord::new("a", Order::Regular(1)),
                OrderedRecord::new("b", Order::Regular(2)),
                OrderedRecord::new("c", Order::Regular(3)),
            ],
        );
        let mutations =
            compute_manual_reorder(&id("b"), None, &snapshot).expect("clear succeeds");
        assert_eq!(
            mutations,
            vec![
                mutation("c", Order::Regular(2)),
                mutation("b", Order::Absent),
            ]
        );
    }

    #[test]
    fn clearing_an_urgent_item_touches_nobody_else() {
        let snapshot = GroupSnapshot::new(
            "Alice",
            vec![
                OrderedRecord::new("a", Order::Urgent(slot(5))),
                OrderedRecord::new("b", Order::Urgent(slot(9))),
                OrderedRecord::new("c", Order::Regular(1)),
            ],
        );
        let mutations =
            compute_manual_reorder(&id("a"), None, &snapshot).expect("clear succeeds");
        assert_eq!(mutations, vec![mutation("a", Order::Absent)]);
    }

    #[test]
    fn clearing_an_unordered_item_is_a_no_op() {
        let snapshot = GroupSnapshot::new(
            "Alice",
            vec![OrderedRecord::new("a", Order::Absent)],
        );
        let mutations =
            compute_manual_reorder(&id("a"), None, &snapshot).expect("clear succeeds");
        assert!(mutations.is_empty());
    }

    #[test]
    fn regular_target_inserts_and_renumbers() {
        let snapshot = GroupSnapshot::new(
            "Alice",
            vec![
                OrderedRecord::new("a", Order::Regular(1)),
                OrderedRecord::new("b", Order::Regular(2)),
                OrderedRecord::new("c", Order::Regular(3)),
                OrderedRecord::new("d", Order::Absent),
            ],
        );
        let mutations =
            compute_manual_reorder(&id("d"), Some(2.0), &snapshot).expect("insert succeeds");
        assert_eq!(
            mutations,
            vec![
                mutation("d", Order::Regular(2)),
                mutation("b", Order::Regular(3)),
                mutation("c", Order::Regular(4)),
            ]
        );
    }

    #[test]
    fn regular_target_past_the_end_appends() {
        let snapshot = GroupSnapshot::new(
            "Alice",
            vec![
                OrderedRecord::new("a", Order::Regular(1)),
                OrderedRecord::new("b", Order::Absent),
            ],
        );
        let mutations =
            compute_manual_reorder(&id("b"), Some(50.0), &snapshot).expect("append succeeds");
        assert_eq!(mutations, vec![mutation("b", Order::Regular(2))]);
    }

    #[test]
    fn moving_a_regular_item_within_its_tier() {
        // a=1 b=2 c=3; move c to the front.
        let snapshot = GroupSnapshot::new(
            "Alice",
            vec![
                OrderedRecord::new("a", Order::Regular(1)),
                OrderedRecord::new("b", Order::Regular(2)),
                OrderedRecord::new("c", Order::Regular(3)),
            ],
        );
        let mutations =
            compute_manual_reorder(&id("c"), Some(1.0), &snapshot).expect("move succeeds");
        assert_eq!(
            mutations,
            vec![
                mutation("c", Order::Regular(1)),
                mutation("a", Order::Regular(2)),
                mutation("b", Order::Regular(3)),
            ]
        );
    }

    #[test]
    fn regular_target_leaves_urgent_tier_untouched() {
        let snapshot = GroupSnapshot::new(
            "Alice",
            vec![
                OrderedRecord::new("u", Order::Urgent(slot(4))),
                OrderedRecord::new("a", Order::Regular(1)),
                OrderedRecord::new("b", Order::Absent),
            ],
        );
        let mutations =
            compute_manual_reorder(&id("b"), Some(1.0), &snapshot).expect("insert succeeds");
        assert!(mutations.iter().all(|m| m.id != id("u")));
    }

    #[test]
    fn urgent_target_repacks_toward_newest() {
        // Urgent {x: 0.5, y: 0.6}; set z to 0.3. The three members pack onto
        // 0.7, 0.8, 0.9 in ascending order, not onto 0.1..0.3.
        let snapshot = GroupSnapshot::new(
            "Alice",
            vec![
                OrderedRecord::new("x", Order::Urgent(slot(5))),
                OrderedRecord::new("y", Order::Urgent(slot(6))),
                OrderedRecord::new("z", Order::Absent),
            ],
        );
        let mutations =
            compute_manual_reorder(&id("z"), Some(0.3), &snapshot).expect("assign succeeds");
        assert_eq!(
            mutations,
            vec![
                mutation("z", Order::Urgent(slot(7))),
                mutation("x", Order::Urgent(slot(8))),
                mutation("y", Order::Urgent(slot(9))),
            ]
        );
    }

    #[test]
    fn urgent_target_from_regular_also_closes_the_gap() {
        let snapshot = GroupSnapshot::new(
            "Alice",
            vec![
                OrderedRecord::new("a", Order::Regular(1)),
                OrderedRecord::new("b", Order::Regular(2)),
                OrderedRecord::new("c", Order::Regular(3)),
            ],
        );
        let mutations =
            compute_manual_reorder(&id("a"), Some(0.9), &snapshot).expect("assign succeeds");
        assert_eq!(
            mutations,
            vec![
                mutation("b", Order::Regular(1)),
                mutation("c", Order::Regular(2)),
                mutation("a", Order::Urgent(slot(9))),
            ]
        );
    }

    #[test]
    fn urgent_tie_puts_the_acted_on_item_on_the_newer_slot() {
        let snapshot = GroupSnapshot::new(
            "Alice",
            vec![
                OrderedRecord::new("x", Order::Urgent(slot(5))),
                OrderedRecord::new("z", Order::Absent),
            ],
        );
        let mutations =
            compute_manual_reorder(&id("z"), Some(0.5), &snapshot).expect("assign succeeds");
        assert_eq!(
            mutations,
            vec![
                mutation("x", Order::Urgent(slot(8))),
                mutation("z", Order::Urgent(slot(9))),
            ]
        );
    }

    #[test]
    fn reassigning_an_urgent_item_compresses_gaps() {
        // {a: 0.2, b: 0.9}; move b to 0.1. Ascending order becomes b, a and
        // the pair packs onto 0.8, 0.9.
        let snapshot = GroupSnapshot::new(
            "Alice",
            vec![
                OrderedRecord::new("a", Order::Urgent(slot(2))),
                OrderedRecord::new("b", Order::Urgent(slot(9))),
            ],
        );
        let mutations =
            compute_manual_reorder(&id("b"), Some(0.1), &snapshot).expect("assign succeeds");
        assert_eq!(
            mutations,
            vec![
                mutation("b", Order::Urgent(slot(8))),
                mutation("a", Order::Urgent(slot(9))),
            ]
        );
    }

    #[test]
    fn urgent_target_with_nine_other_urgent_items_is_rejected() {
        let mut records: Vec<OrderedRecord> = (1..=9u8)
            .map(|index| OrderedRecord::new(format!("u{index}"), Order::Urgent(slot(index))))
            .collect();
        records.push(OrderedRecord::new("z", Order::Regular(1)));
        let snapshot = GroupSnapshot::new("Alice", records);

        let err = compute_manual_reorder(&id("z"), Some(0.5), &snapshot)
            .expect_err("full urgent tier");
        assert!(matches!(err, OrderError::InvalidOrder { .. }));
        assert!(err.to_string().contains("no free urgent slot"), "{err}");
    }
}
