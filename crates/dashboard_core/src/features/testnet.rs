use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{
    domain::{BlockchainId, SliceKey},
    protocol::Action,
};

use super::{decode_or_default, encode};
use crate::registry::Contribution;

pub const RECEIVED_TESTNET_INFO: &str = "RECEIVED_TESTNET_INFO";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestnetState {
    pub blockchain_id: Value,
    pub next_reset: Option<String>,
}

impl Default for TestnetState {
    fn default() -> Self {
        Self {
            blockchain_id: BlockchainId::Unset.to_value(),
            next_reset: None,
        }
    }
}

pub fn reduce(previous: Option<&Value>, action: &Action) -> Value {
    let mut state: TestnetState = decode_or_default(SliceKey::Testnet, previous);
    if action.is(RECEIVED_TESTNET_INFO) {
        state.blockchain_id =
            BlockchainId::from_value(action.param_field("blockchain_id")).to_value();
        state.next_reset = action
            .param_field("next_reset")
            .and_then(Value::as_str)
            .map(str::to_string);
    }
    encode(&state)
}

pub fn contribution() -> Contribution {
    Contribution::single(SliceKey::Testnet, reduce)
}
