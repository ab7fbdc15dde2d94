use shared::{domain::SliceKey, error::ActionError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("slice '{0}' is contributed more than once")]
    DuplicateSlice(SliceKey),
    #[error("slice '{0}' has no reducer")]
    MissingSlice(SliceKey),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("malformed action: {0}")]
    Action(#[from] ActionError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("failed to clear persisted storage; logout aborted: {source}")]
    ClearStorage { source: anyhow::Error },
}
