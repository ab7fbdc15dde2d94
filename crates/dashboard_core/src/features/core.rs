//! Core slice: connection and configuration facts about the Chain Core the
//! dashboard talks to.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{
    domain::{is_truthy, BlockchainId, SliceKey},
    protocol::{Action, UPDATE_CORE_INFO},
};

use super::{decode_or_default, encode};
use crate::registry::Contribution;

pub const SET_CLIENT_TOKEN: &str = "SET_CLIENT_TOKEN";
pub const USER_LOG_IN: &str = "USER_LOG_IN";
pub const CORE_DISCONNECTED: &str = "CORE_DISCONNECTED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoreState {
    pub configured: bool,
    pub blockchain_id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
    pub valid_token: bool,
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Default for CoreState {
    fn default() -> Self {
        Self {
            configured: false,
            blockchain_id: BlockchainId::Unset.to_value(),
            core_url: None,
            client_token: None,
            valid_token: false,
            connected: false,
            version: None,
        }
    }
}

fn string_param(action: &Action, field: &str) -> Option<String> {
    action
        .param_field(field)
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub fn reduce(previous: Option<&Value>, action: &Action) -> Value {
    let mut state: CoreState = decode_or_default(SliceKey::Core, previous);

    match action.kind.as_str() {
        UPDATE_CORE_INFO => {
            state.configured = is_truthy(action.param_field("is_configured"));
            state.blockchain_id =
                BlockchainId::from_value(action.param_field("blockchain_id")).to_value();
            if let Some(version) = string_param(action, "version") {
                state.version = Some(version);
            }
            if let Some(core_url) = string_param(action, "core_url") {
                state.core_url = Some(core_url);
            }
            state.connected = true;
        }
        SET_CLIENT_TOKEN => {
            state.client_token = string_param(action, "token");
            state.valid_token = false;
        }
        USER_LOG_IN => state.valid_token = true,
        CORE_DISCONNECTED => state.connected = false,
        _ => {}
    }

    encode(&state)
}

pub fn contribution() -> Contribution {
    Contribution::single(SliceKey::Core, reduce)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn starts_unconfigured_with_zero_blockchain_id() {
        let state = reduce(None, &Action::init());
        assert_eq!(state["configured"], json!(false));
        assert_eq!(state["blockchainId"], json!(0));
    }

    #[test]
    fn core_info_records_configuration() {
        let action = Action::with_param(
            UPDATE_CORE_INFO,
            json!({ "is_configured": true, "blockchain_id": "chain-1", "version": "1.2.0" }),
        );
        let state = reduce(None, &action);
        assert_eq!(state["configured"], json!(true));
        assert_eq!(state["blockchainId"], json!("chain-1"));
        assert_eq!(state["version"], json!("1.2.0"));
        assert_eq!(state["connected"], json!(true));
    }

    #[test]
    fn truthy_blockchain_ids_are_stored_verbatim() {
        for blockchain_id in [json!("0"), json!(true), json!(42.0)] {
            let action = Action::with_param(
                UPDATE_CORE_INFO,
                json!({ "is_configured": true, "blockchain_id": blockchain_id }),
            );
            assert_eq!(reduce(None, &action)["blockchainId"], blockchain_id);
        }

        let absent = Action::with_param(UPDATE_CORE_INFO, json!({ "is_configured": false }));
        assert_eq!(reduce(None, &absent)["blockchainId"], json!(0));
    }

    #[test]
    fn client_token_needs_a_login_to_become_valid() {
        let state = reduce(
            None,
            &Action::with_param(SET_CLIENT_TOKEN, json!({ "token": "abc" })),
        );
        assert_eq!(state["clientToken"], json!("abc"));
        assert_eq!(state["validToken"], json!(false));

        let state = reduce(Some(&state), &Action::new(USER_LOG_IN));
        assert_eq!(state["validToken"], json!(true));
    }
}
