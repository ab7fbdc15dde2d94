//! Form slice: in-flight field values keyed by form name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::{domain::SliceKey, protocol::Action};

use super::{decode_or_default, encode};
use crate::registry::Contribution;

pub const CHANGE: &str = "@@redux-form/CHANGE";
pub const RESET: &str = "@@redux-form/RESET";
pub const DESTROY: &str = "@@redux-form/DESTROY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormEntry {
    pub values: Map<String, Value>,
}

pub type FormState = BTreeMap<String, FormEntry>;

pub fn reduce(previous: Option<&Value>, action: &Action) -> Value {
    let mut state: FormState = decode_or_default(SliceKey::Form, previous);
    let form = action
        .param_field("form")
        .and_then(Value::as_str)
        .map(str::to_string);

    match (action.kind.as_str(), form) {
        (CHANGE, Some(form)) => {
            if let Some(field) = action.param_field("field").and_then(Value::as_str) {
                let value = action.param_field("value").cloned().unwrap_or(Value::Null);
                state
                    .entry(form)
                    .or_default()
                    .values
                    .insert(field.to_string(), value);
            }
        }
        (RESET, Some(form)) => {
            if let Some(entry) = state.get_mut(&form) {
                entry.values.clear();
            }
        }
        (DESTROY, Some(form)) => {
            state.remove(&form);
        }
        _ => {}
    }

    encode(&state)
}

pub fn contribution() -> Contribution {
    Contribution::single(SliceKey::Form, reduce)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn change_reset_and_destroy_a_form() {
        let state = reduce(
            None,
            &Action::with_param(CHANGE, json!({ "form": "newAccount", "field": "alias", "value": "alice" })),
        );
        assert_eq!(state["newAccount"]["values"]["alias"], json!("alice"));

        let state = reduce(Some(&state), &Action::with_param(RESET, json!({ "form": "newAccount" })));
        assert_eq!(state["newAccount"]["values"], json!({}));

        let state = reduce(Some(&state), &Action::with_param(DESTROY, json!({ "form": "newAccount" })));
        assert_eq!(state, json!({}));
    }
}
