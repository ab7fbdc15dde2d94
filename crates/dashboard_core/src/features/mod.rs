//! Feature reducers that make up the dashboard registry.

pub mod access_tokens;
pub mod app;
pub mod core;
pub mod form;
pub mod resources;
pub mod routing;
pub mod testnet;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::domain::SliceKey;

use crate::{
    error::RegistryError,
    registry::ReducerRegistry,
};

use self::resources::ResourceReducer;

/// The dashboard's registry: every feature contribution merged into one table.
pub fn dashboard_registry() -> Result<Arc<ReducerRegistry>, RegistryError> {
    let registry = ReducerRegistry::builder()
        .contribute(access_tokens::contribution())
        .contribute(ResourceReducer::contribution(SliceKey::Account, "ACCOUNT"))
        .contribute(app::contribution())
        .contribute(ResourceReducer::contribution(SliceKey::Asset, "ASSET"))
        .contribute(ResourceReducer::contribution(SliceKey::Balance, "BALANCE"))
        .contribute(core::contribution())
        .contribute(form::contribution())
        .contribute(ResourceReducer::contribution(SliceKey::Mockhsm, "MOCKHSM"))
        .contribute(routing::contribution())
        .contribute(testnet::contribution())
        .contribute(ResourceReducer::contribution(SliceKey::Transaction, "TRANSACTION"))
        .contribute(ResourceReducer::contribution(
            SliceKey::TransactionFeed,
            "TRANSACTION_FEED",
        ))
        .contribute(ResourceReducer::contribution(SliceKey::Unspent, "UNSPENT"))
        .build()?;
    Ok(Arc::new(registry))
}

/// Decodes a slice, falling back to its default when absent or unreadable.
pub(crate) fn decode_or_default<T>(key: SliceKey, previous: Option<&Value>) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(previous) = previous else {
        return T::default();
    };
    match T::deserialize(previous) {
        Ok(state) => state,
        Err(err) => {
            tracing::warn!(slice = %key, "slice state has unexpected shape, starting over: {err}");
            T::default()
        }
    }
}

pub(crate) fn encode<T: Serialize>(state: &T) -> Value {
    serde_json::to_value(state).unwrap_or(Value::Null)
}
