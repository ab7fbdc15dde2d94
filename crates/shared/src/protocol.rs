use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{is_truthy, BlockchainId},
    error::ActionError,
};

pub const UPDATE_CORE_INFO: &str = "UPDATE_CORE_INFO";
pub const USER_LOG_OUT: &str = "USER_LOG_OUT";
/// Dispatched once when a store boots, before any user action.
pub const INIT: &str = "@@INIT";

/// A dispatched action. Only the `type` discriminator is interpreted by the
/// root reducer; `param` is opaque except for `UPDATE_CORE_INFO`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<Value>,
}

impl Action {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            param: None,
        }
    }

    pub fn with_param(kind: impl Into<String>, param: Value) -> Self {
        Self {
            kind: kind.into(),
            param: Some(param),
        }
    }

    pub fn init() -> Self {
        Self::new(INIT)
    }

    pub fn log_out() -> Self {
        Self::new(USER_LOG_OUT)
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    pub fn param_field(&self, field: &str) -> Option<&Value> {
        self.param.as_ref().and_then(|param| param.get(field))
    }
}

/// Parsed view of an `UPDATE_CORE_INFO` param.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreInfoParam {
    pub is_configured: bool,
    pub blockchain_id: BlockchainId,
}

impl CoreInfoParam {
    pub fn from_action(action: &Action) -> Result<Self, ActionError> {
        let param = action.param.as_ref().ok_or(ActionError::MissingParam {
            action_type: UPDATE_CORE_INFO,
        })?;
        let Value::Object(fields) = param else {
            return Err(ActionError::MalformedParam {
                action_type: UPDATE_CORE_INFO,
                found: param.to_string(),
            });
        };

        Ok(Self {
            is_configured: is_truthy(fields.get("is_configured")),
            blockchain_id: BlockchainId::from_value(fields.get("blockchain_id")),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn action_uses_type_and_param_on_the_wire() {
        let action: Action = serde_json::from_value(json!({
            "type": "UPDATE_CORE_INFO",
            "param": { "is_configured": true }
        }))
        .expect("decode");
        assert!(action.is(UPDATE_CORE_INFO));

        let encoded = serde_json::to_value(Action::log_out()).expect("encode");
        assert_eq!(encoded, json!({ "type": "USER_LOG_OUT" }));
    }

    #[test]
    fn core_info_param_requires_payload() {
        let err = CoreInfoParam::from_action(&Action::new(UPDATE_CORE_INFO)).expect_err("missing");
        assert_eq!(
            err,
            ActionError::MissingParam {
                action_type: UPDATE_CORE_INFO
            }
        );

        let err = CoreInfoParam::from_action(&Action::with_param(UPDATE_CORE_INFO, json!("x")))
            .expect_err("malformed");
        assert!(matches!(err, ActionError::MalformedParam { .. }));
    }

    #[test]
    fn core_info_param_defaults_to_unconfigured_and_unset() {
        let param = CoreInfoParam::from_action(&Action::with_param(UPDATE_CORE_INFO, json!({})))
            .expect("param");
        assert!(!param.is_configured);
        assert_eq!(param.blockchain_id, BlockchainId::Unset);
    }
}
