//! App chrome: flash messages and dropdown state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{domain::SliceKey, protocol::Action};

use super::{decode_or_default, encode};
use crate::registry::Contribution;

pub const SHOW_FLASH: &str = "SHOW_FLASH";
pub const DISMISS_FLASH: &str = "DISMISS_FLASH";
pub const TOGGLE_DROPDOWN: &str = "TOGGLE_DROPDOWN";
pub const CLOSE_DROPDOWNS: &str = "CLOSE_DROPDOWNS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub message: String,
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub flash_messages: BTreeMap<u64, FlashMessage>,
    pub next_flash_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_dropdown: Option<String>,
}

pub fn reduce(previous: Option<&Value>, action: &Action) -> Value {
    let mut state: AppState = decode_or_default(SliceKey::App, previous);

    match action.kind.as_str() {
        SHOW_FLASH => {
            if let Some(message) = action.param_field("message").and_then(Value::as_str) {
                let kind = action
                    .param_field("kind")
                    .and_then(Value::as_str)
                    .unwrap_or("info");
                let id = state.next_flash_id;
                state.next_flash_id += 1;
                state.flash_messages.insert(
                    id,
                    FlashMessage {
                        message: message.to_string(),
                        kind: kind.to_string(),
                    },
                );
            }
        }
        DISMISS_FLASH => {
            if let Some(id) = action.param_field("id").and_then(Value::as_u64) {
                state.flash_messages.remove(&id);
            }
        }
        TOGGLE_DROPDOWN => {
            let id = action
                .param_field("id")
                .and_then(Value::as_str)
                .map(str::to_string);
            state.open_dropdown = if state.open_dropdown == id { None } else { id };
        }
        CLOSE_DROPDOWNS => state.open_dropdown = None,
        _ => {}
    }

    encode(&state)
}

pub fn contribution() -> Contribution {
    Contribution::single(SliceKey::App, reduce)
}
