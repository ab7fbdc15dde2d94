//! Keyed item lists (accounts, assets, transactions, ...). Every list slice
//! shares this reducer, parameterized by its action type stem.

use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{domain::SliceKey, protocol::Action};

use super::{decode_or_default, encode};
use crate::registry::{Contribution, SharedSliceReducer, SliceReducer};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceState {
    pub items: BTreeMap<String, Value>,
    /// Item ids in the order they were first received.
    pub ids: Vec<String>,
}

impl ResourceState {
    fn upsert(&mut self, item: &Value) {
        let Some(id) = item_id(item) else {
            tracing::debug!("ignoring resource item without an id");
            return;
        };
        if self.items.insert(id.clone(), item.clone()).is_none() {
            self.ids.push(id);
        }
    }

    fn delete(&mut self, id: &str) {
        if self.items.remove(id).is_some() {
            self.ids.retain(|existing| existing != id);
        }
    }
}

fn item_id(item: &Value) -> Option<String> {
    match item.get("id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Reduces `RECEIVED_<TYPE>_ITEMS`, `CREATED_<TYPE>` and `DELETE_<TYPE>`.
#[derive(Debug, Clone)]
pub struct ResourceReducer {
    key: SliceKey,
    received: String,
    created: String,
    deleted: String,
}

impl ResourceReducer {
    pub fn new(key: SliceKey, type_stem: &str) -> Self {
        Self {
            key,
            received: format!("RECEIVED_{type_stem}_ITEMS"),
            created: format!("CREATED_{type_stem}"),
            deleted: format!("DELETE_{type_stem}"),
        }
    }

    pub fn contribution(key: SliceKey, type_stem: &str) -> Contribution {
        Contribution::Single(key, Arc::new(Self::new(key, type_stem)))
    }

    pub fn entry(key: SliceKey, type_stem: &str) -> (SliceKey, SharedSliceReducer) {
        (key, Arc::new(Self::new(key, type_stem)))
    }
}

impl SliceReducer for ResourceReducer {
    fn reduce(&self, previous: Option<&Value>, action: &Action) -> Value {
        let mut state: ResourceState = decode_or_default(self.key, previous);

        if action.kind == self.received {
            if let Some(items) = action.param_field("items").and_then(Value::as_array) {
                items.iter().for_each(|item| state.upsert(item));
            }
        } else if action.kind == self.created {
            if let Some(item) = &action.param {
                state.upsert(item);
            }
        } else if action.kind == self.deleted {
            if let Some(id) = action.param.as_ref().and_then(item_id) {
                state.delete(&id);
            }
        }

        encode(&state)
    }
}
