//! The dashboard state tree: one opaque JSON value per slice key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::domain::SliceKey;

/// Field of the core slice naming the configured blockchain.
pub const CORE_BLOCKCHAIN_ID_FIELD: &str = "blockchainId";

/// Mapping from slice key to slice state.
///
/// A tree returned by a composed reduction holds every key of the registry.
/// Trees with missing keys only exist as working states during a reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateTree {
    slices: BTreeMap<SliceKey, Value>,
}

impl StateTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: SliceKey) -> Option<&Value> {
        self.slices.get(&key)
    }

    pub fn insert(&mut self, key: SliceKey, value: Value) -> Option<Value> {
        self.slices.insert(key, value)
    }

    pub fn contains(&self, key: SliceKey) -> bool {
        self.slices.contains_key(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = SliceKey> + '_ {
        self.slices.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Builder-style insert used when assembling working states.
    pub fn with(mut self, key: SliceKey, value: Value) -> Self {
        self.slices.insert(key, value);
        self
    }

    /// Copies `key` from `source` when present.
    pub fn carry_over(&mut self, source: &StateTree, key: SliceKey) {
        if let Some(value) = source.get(key) {
            self.slices.insert(key, value.clone());
        }
    }

    /// Raw `blockchainId` of the core slice. `None` when there is no core
    /// slice or the slice lacks the field; such a slice never matches any id.
    pub fn core_blockchain_id(&self) -> Option<&Value> {
        self.get(SliceKey::Core)?.get(CORE_BLOCKCHAIN_ID_FIELD)
    }

    /// Subset of the tree restricted to `keys`, serialized for persistence.
    pub fn snapshot(&self, keys: &[SliceKey]) -> Value {
        let subset: BTreeMap<SliceKey, &Value> = keys
            .iter()
            .filter_map(|key| self.get(*key).map(|value| (*key, value)))
            .collect();
        serde_json::to_value(subset).unwrap_or(Value::Null)
    }

    /// Rebuilds a partial tree from a persisted snapshot, keeping only `keys`.
    /// Unknown or unlisted entries are ignored.
    pub fn from_snapshot(snapshot: &Value, keys: &[SliceKey]) -> Self {
        let mut tree = Self::new();
        let Value::Object(entries) = snapshot else {
            return tree;
        };
        for (name, value) in entries {
            let Ok(key) = name.parse::<SliceKey>() else {
                tracing::debug!(slice = %name, "ignoring unknown slice in persisted snapshot");
                continue;
            };
            if keys.contains(&key) {
                tree.insert(key, value.clone());
            }
        }
        tree
    }
}

impl FromIterator<(SliceKey, Value)> for StateTree {
    fn from_iter<T: IntoIterator<Item = (SliceKey, Value)>>(iter: T) -> Self {
        Self {
            slices: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_as_object_keyed_by_slice_name() {
        let tree = StateTree::new()
            .with(SliceKey::TransactionFeed, json!([]))
            .with(SliceKey::Core, json!({ "blockchainId": 0 }));
        assert_eq!(
            serde_json::to_value(&tree).expect("encode"),
            json!({ "core": { "blockchainId": 0 }, "transactionFeed": [] })
        );
    }

    #[test]
    fn core_blockchain_id_requires_the_field() {
        let missing = StateTree::new().with(SliceKey::Core, json!({}));
        assert_eq!(missing.core_blockchain_id(), None);

        let null = StateTree::new().with(SliceKey::Core, json!({ "blockchainId": null }));
        assert_eq!(null.core_blockchain_id(), Some(&json!(null)));
    }

    #[test]
    fn snapshot_keeps_only_requested_slices() {
        let tree = StateTree::new()
            .with(SliceKey::Core, json!({ "blockchainId": "x" }))
            .with(SliceKey::Account, json!({ "items": {} }));
        let snapshot = tree.snapshot(&[SliceKey::Core]);
        assert_eq!(snapshot, json!({ "core": { "blockchainId": "x" } }));

        let restored = StateTree::from_snapshot(
            &json!({ "core": { "blockchainId": "x" }, "account": {}, "bogus": 1 }),
            &[SliceKey::Core],
        );
        assert_eq!(restored.keys().collect::<Vec<_>>(), vec![SliceKey::Core]);
    }
}
