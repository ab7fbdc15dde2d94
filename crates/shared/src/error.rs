use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{action_type} requires a param payload")]
    MissingParam { action_type: &'static str },
    #[error("{action_type} param must be an object, got {found}")]
    MalformedParam {
        action_type: &'static str,
        found: String,
    },
    #[error("unknown state slice '{0}'")]
    UnknownSlice(String),
}
