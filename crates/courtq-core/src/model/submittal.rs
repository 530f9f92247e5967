//! Submittal identifiers, responsible-party group keys, and the snapshot
//! types the engines consume and produce.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::order::Order;

/// Separator the upstream tracker uses when several people share
/// responsibility for one submittal ("Alice Smith, Bob Jones").
const ASSIGNEE_SEPARATOR: char = ',';

/// Opaque stable identifier for a submittal, assigned upstream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmittalId(String);

impl SubmittalId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmittalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubmittalId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SubmittalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The ball-in-court key a submittal is grouped under.
///
/// Multiple responsible parties are concatenated into one key upstream; such
/// multi-assignee groups still reorder manually but are excluded from ladder
/// promotion and cross-group compression (a business rule, not a limitation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when the key names more than one responsible party.
    #[must_use]
    pub fn is_multi_assignee(&self) -> bool {
        self.0.contains(ASSIGNEE_SEPARATOR)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for GroupKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// One group member as the engines see it: identifier plus current order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedRecord {
    pub id: SubmittalId,
    pub order: Order,
}

impl OrderedRecord {
    #[must_use]
    pub fn new(id: impl Into<SubmittalId>, order: Order) -> Self {
        Self {
            id: id.into(),
            order,
        }
    }

    /// Build a record straight from the store's nullable float encoding.
    #[must_use]
    pub fn from_stored(id: impl Into<SubmittalId>, raw: Option<f64>) -> Self {
        Self::new(id, Order::from_stored(raw))
    }
}

/// A consistent read of one group's members, taken by the caller before an
/// engine call and held stable until its mutations are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub group: GroupKey,
    pub records: Vec<OrderedRecord>,
}

impl GroupSnapshot {
    #[must_use]
    pub fn new(group: impl Into<GroupKey>, records: Vec<OrderedRecord>) -> Self {
        Self {
            group: group.into(),
            records,
        }
    }

    /// Look up a member by id.
    #[must_use]
    pub fn get(&self, id: &SubmittalId) -> Option<&OrderedRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// One entry of an engine's output: set `id`'s order to `new_order`.
///
/// Serializes `new_order` in the store's nullable float encoding, so a
/// mutation list can be handed to the persistence layer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMutation {
    pub id: SubmittalId,
    pub new_order: Order,
}

impl OrderMutation {
    #[must_use]
    pub fn new(id: impl Into<SubmittalId>, new_order: Order) -> Self {
        Self {
            id: id.into(),
            new_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::order::UrgentSlot;

    #[test]
    fn single_assignee_key_is_not_multi() {
        assert!(!GroupKey::from("Alice Smith").is_multi_assignee());
    }

    #[test]
    fn concatenated_key_is_multi() {
        assert!(GroupKey::from("Alice Smith, Bob Jones").is_multi_assignee());
    }

    #[test]
    fn snapshot_lookup_finds_member() {
        let snapshot = GroupSnapshot::new(
            "Alice",
            vec![
                OrderedRecord::new("sub-1", Order::Regular(1)),
                OrderedRecord::new("sub-2", Order::Absent),
            ],
        );
        assert_eq!(
            snapshot.get(&SubmittalId::from("sub-2")).map(|r| r.order),
            Some(Order::Absent)
        );
        assert_eq!(snapshot.get(&SubmittalId::from("sub-9")), None);
    }

    #[test]
    fn mutation_serializes_with_stored_encoding() {
        let json = serde_json::to_string(&OrderMutation::new(
            "sub-1",
            Order::Urgent(UrgentSlot::Slot9),
        ))
        .expect("serialize");
        assert_eq!(json, r#"{"id":"sub-1","new_order":0.9}"#);

        let json = serde_json::to_string(&OrderMutation::new("sub-2", Order::Absent))
            .expect("serialize");
        assert_eq!(json, r#"{"id":"sub-2","new_order":null}"#);
    }
}
