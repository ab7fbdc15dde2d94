//! Routing slice: the last location reported by the router.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{domain::SliceKey, protocol::Action};

use super::{decode_or_default, encode};
use crate::registry::Contribution;

pub const LOCATION_CHANGE: &str = "@@router/LOCATION_CHANGE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutingState {
    pub location_before_transitions: Option<Value>,
}

pub fn reduce(previous: Option<&Value>, action: &Action) -> Value {
    let mut state: RoutingState = decode_or_default(SliceKey::Routing, previous);
    if action.is(LOCATION_CHANGE) {
        state.location_before_transitions = action.param.clone();
    }
    encode(&state)
}

pub fn contribution() -> Contribution {
    Contribution::single(SliceKey::Routing, reduce)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn records_latest_location() {
        let state = reduce(None, &Action::init());
        assert_eq!(state, json!({ "locationBeforeTransitions": null }));

        let state = reduce(
            Some(&state),
            &Action::with_param(LOCATION_CHANGE, json!({ "pathname": "/accounts" })),
        );
        assert_eq!(state["locationBeforeTransitions"]["pathname"], json!("/accounts"));
    }
}
