//! The tagged `order` value and its stored floating-point encoding.
//!
//! # Overview
//!
//! The upstream store keeps a submittal's queue position as a single nullable
//! float. The numeric range encodes the class: values in (0, 1) are urgent
//! slots, values ≥ 1 are regular backlog ranks, null is unordered. This module
//! replaces that implicit tagged union with an explicit one:
//!
//! - [`UrgentSlot`] — exactly one of the nine tenths 0.1–0.9. Slot 0.1 holds
//!   the longest-waiting urgent item, 0.9 the most recently escalated.
//! - [`Order`] — `Urgent(UrgentSlot) | Regular(u32) | Absent`.
//!
//! [`Order::from_stored`] is the lossy bridge back from the float encoding.
//! Stored data can carry anomalies (fractional regular ranks, off-slot urgent
//! values); decode normalizes them with a warning rather than failing, since
//! a snapshot read must always produce a workable group.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// One of the nine fixed urgent positions.
///
/// Ordering follows slot value: `Slot1` (0.1) sorts first and is the
/// longest-waiting urgent item; `Slot9` (0.9) is the newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UrgentSlot {
    Slot1,
    Slot2,
    Slot3,
    Slot4,
    Slot5,
    Slot6,
    Slot7,
    Slot8,
    Slot9,
}

impl UrgentSlot {
    /// The slot holding the longest-waiting urgent item.
    pub const OLDEST: Self = Self::Slot1;
    /// The slot a fresh escalation contends for.
    pub const NEWEST: Self = Self::Slot9;
    /// Number of urgent positions per group.
    pub const COUNT: usize = 9;

    /// 1-based slot index (1 ↦ 0.1, …, 9 ↦ 0.9).
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Slot1 => 1,
            Self::Slot2 => 2,
            Self::Slot3 => 3,
            Self::Slot4 => 4,
            Self::Slot5 => 5,
            Self::Slot6 => 6,
            Self::Slot7 => 7,
            Self::Slot8 => 8,
            Self::Slot9 => 9,
        }
    }

    /// Inverse of [`Self::index`]; `None` outside 1..=9.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Slot1),
            2 => Some(Self::Slot2),
            3 => Some(Self::Slot3),
            4 => Some(Self::Slot4),
            5 => Some(Self::Slot5),
            6 => Some(Self::Slot6),
            7 => Some(Self::Slot7),
            8 => Some(Self::Slot8),
            9 => Some(Self::Slot9),
            _ => None,
        }
    }

    /// The next slot toward 0.1, or `None` from [`Self::OLDEST`].
    #[must_use]
    pub const fn down(self) -> Option<Self> {
        Self::from_index(self.index() - 1)
    }

    /// The stored float value for this slot.
    #[must_use]
    pub fn as_stored(self) -> f64 {
        f64::from(self.index()) / 10.0
    }
}

impl fmt::Display for UrgentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0.{}", self.index())
    }
}

/// A submittal's queue position within its responsible party's group.
///
/// Variant declaration order gives the natural sort: urgent items first
/// (oldest slot lowest), then regular ranks ascending, then unordered items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Order {
    /// One of the nine urgent positions 0.1–0.9.
    Urgent(UrgentSlot),
    /// Dense backlog rank ≥ 1.
    Regular(u32),
    /// Unordered backlog; carries no position.
    Absent,
}

impl Order {
    /// Decode a stored float into a typed order, normalizing anomalies.
    ///
    /// - `None`, non-finite, and non-positive values decode to `Absent`
    ///   (non-finite and non-positive are logged as data-quality warnings).
    /// - Values in (0, 1) snap to the nearest urgent slot.
    /// - Values ≥ 1 round *up* to a whole rank, per the convention that a
    ///   fractional regular rank is an anomaly to normalize, not to preserve.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_stored(raw: Option<f64>) -> Self {
        let Some(value) = raw else {
            return Self::Absent;
        };
        if !value.is_finite() || value <= 0.0 {
            warn!(value, "unusable stored order treated as absent");
            return Self::Absent;
        }
        if value < 1.0 {
            let index = ((value * 10.0).round() as u8).clamp(1, 9);
            let Some(slot) = UrgentSlot::from_index(index) else {
                return Self::Absent;
            };
            if (value - slot.as_stored()).abs() > 1e-9 {
                warn!(value, %slot, "off-slot urgent order snapped to nearest slot");
            }
            return Self::Urgent(slot);
        }
        let rank = value.ceil();
        if (rank - value).abs() > 1e-9 {
            warn!(value, rank, "fractional regular order rounded up");
        }
        Self::Regular(rank.min(f64::from(u32::MAX)) as u32)
    }

    /// Encode back to the nullable float the store persists.
    #[must_use]
    pub fn to_stored(self) -> Option<f64> {
        match self {
            Self::Urgent(slot) => Some(slot.as_stored()),
            Self::Regular(rank) => Some(f64::from(rank)),
            Self::Absent => None,
        }
    }

    /// `true` for an urgent-slot order.
    #[must_use]
    pub const fn is_urgent(self) -> bool {
        matches!(self, Self::Urgent(_))
    }

    /// `true` for a regular backlog rank.
    #[must_use]
    pub const fn is_regular(self) -> bool {
        matches!(self, Self::Regular(_))
    }

    /// The regular rank, if this is a regular order.
    #[must_use]
    pub const fn rank(self) -> Option<u32> {
        match self {
            Self::Regular(rank) => Some(rank),
            Self::Urgent(_) | Self::Absent => None,
        }
    }

    /// The urgent slot, if this is an urgent order.
    #[must_use]
    pub const fn slot(self) -> Option<UrgentSlot> {
        match self {
            Self::Urgent(slot) => Some(slot),
            Self::Regular(_) | Self::Absent => None,
        }
    }
}

impl From<Option<f64>> for Order {
    fn from(raw: Option<f64>) -> Self {
        Self::from_stored(raw)
    }
}

impl From<Order> for Option<f64> {
    fn from(order: Order) -> Self {
        order.to_stored()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Urgent(slot) => write!(f, "{slot}"),
            Self::Regular(rank) => write!(f, "{rank}"),
            Self::Absent => write!(f, "unordered"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_index_round_trips() {
        for index in 1..=9 {
            let slot = UrgentSlot::from_index(index).expect("valid index");
            assert_eq!(slot.index(), index);
        }
        assert_eq!(UrgentSlot::from_index(0), None);
        assert_eq!(UrgentSlot::from_index(10), None);
    }

    #[test]
    fn down_walks_toward_oldest() {
        assert_eq!(UrgentSlot::Slot9.down(), Some(UrgentSlot::Slot8));
        assert_eq!(UrgentSlot::Slot2.down(), Some(UrgentSlot::Slot1));
        assert_eq!(UrgentSlot::OLDEST.down(), None);
    }

    #[test]
    fn stored_round_trip_for_valid_orders() {
        let orders = [
            Order::Urgent(UrgentSlot::Slot1),
            Order::Urgent(UrgentSlot::Slot9),
            Order::Regular(1),
            Order::Regular(42),
            Order::Absent,
        ];
        for order in orders {
            assert_eq!(Order::from_stored(order.to_stored()), order);
        }
    }

    #[test]
    fn from_stored_snaps_off_slot_urgent_values() {
        assert_eq!(
            Order::from_stored(Some(0.349)),
            Order::Urgent(UrgentSlot::Slot3)
        );
        assert_eq!(
            Order::from_stored(Some(0.05)),
            Order::Urgent(UrgentSlot::Slot1)
        );
        assert_eq!(
            Order::from_stored(Some(0.97)),
            Order::Urgent(UrgentSlot::Slot9)
        );
    }

    #[test]
    fn from_stored_rounds_fractional_ranks_up() {
        assert_eq!(Order::from_stored(Some(2.3)), Order::Regular(3));
        assert_eq!(Order::from_stored(Some(1.0)), Order::Regular(1));
    }

    #[test]
    fn from_stored_rejects_unusable_values() {
        assert_eq!(Order::from_stored(None), Order::Absent);
        assert_eq!(Order::from_stored(Some(0.0)), Order::Absent);
        assert_eq!(Order::from_stored(Some(-3.0)), Order::Absent);
        assert_eq!(Order::from_stored(Some(f64::NAN)), Order::Absent);
        assert_eq!(Order::from_stored(Some(f64::INFINITY)), Order::Absent);
    }

    #[test]
    fn orders_sort_urgent_then_regular_then_absent() {
        let mut orders = vec![
            Order::Absent,
            Order::Regular(2),
            Order::Urgent(UrgentSlot::Slot9),
            Order::Regular(1),
            Order::Urgent(UrgentSlot::Slot1),
        ];
        orders.sort();
        assert_eq!(
            orders,
            vec![
                Order::Urgent(UrgentSlot::Slot1),
                Order::Urgent(UrgentSlot::Slot9),
                Order::Regular(1),
                Order::Regular(2),
                Order::Absent,
            ]
        );
    }

    #[test]
    fn serde_uses_stored_encoding() {
        let json = serde_json::to_string(&Order::Urgent(UrgentSlot::Slot5)).expect("serialize");
        assert_eq!(json, "0.5");
        let json = serde_json::to_string(&Order::Regular(3)).expect("serialize");
        assert_eq!(json, "3.0");
        let json = serde_json::to_string(&Order::Absent).expect("serialize");
        assert_eq!(json, "null");

        let order: Order = serde_json::from_str("0.5").expect("deserialize");
        assert_eq!(order, Order::Urgent(UrgentSlot::Slot5));
        let order: Order = serde_json::from_str("null").expect("deserialize");
        assert_eq!(order, Order::Absent);
    }
}
