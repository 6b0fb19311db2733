//! # Line Item Identifiers
//!
//! Every line item in a cart gets an id so a single pizza can be removed even
//! when two identical pizzas sit side by side.
//!
//! ## Id Schemes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SequentialIds (default)          UuidIds                               │
//! │  ──────────────────────           ───────                               │
//! │  item-1, item-2, item-3 ...       550e8400-e29b-41d4-a716-...           │
//! │  deterministic, test friendly     unique across registers               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

/// Opaque identifier of a cart line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct LineItemId(String);

impl LineItemId {
    pub fn new(id: impl Into<String>) -> Self {
        LineItemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineItemId {
    fn from(id: &str) -> Self {
        LineItemId::new(id)
    }
}

/// Source of fresh line item ids.
///
/// Implementations must never hand out the same id twice for the lifetime of
/// a cart.
pub trait IdGenerator: fmt::Debug + Send {
    fn next_id(&mut self) -> LineItemId;
}

/// Monotonic in-process counter: `item-1`, `item-2`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    issued: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> LineItemId {
        self.issued += 1;
        LineItemId(format!("item-{}", self.issued))
    }
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> LineItemId {
        LineItemId(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_ids_are_deterministic() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id().as_str(), "item-1");
        assert_eq!(ids.next_id().as_str(), "item-2");
        assert_eq!(ids.next_id().to_string(), "item-3");
    }

    #[test]
    fn test_uuid_ids_do_not_collide() {
        let mut ids = UuidIds;
        let issued: HashSet<LineItemId> = (0..500).map(|_| ids.next_id()).collect();
        assert_eq!(issued.len(), 500);
    }

    #[test]
    fn test_line_item_id_serializes_as_plain_string() {
        let id = LineItemId::from("item-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"item-7\"");
    }
}
