//! Reducer Registry: the fixed table from slice key to slice reducer, and the
//! composed reduction over it.

use std::{collections::BTreeMap, fmt, sync::Arc};

use serde_json::Value;
use shared::{domain::SliceKey, protocol::Action};

use crate::{error::RegistryError, state::StateTree};

/// Pure reduction of one slice. `previous` is `None` when the slice is absent
/// from the working state; the reducer then starts from its default.
pub trait SliceReducer: Send + Sync {
    fn reduce(&self, previous: Option<&Value>, action: &Action) -> Value;
}

impl<F> SliceReducer for F
where
    F: Fn(Option<&Value>, &Action) -> Value + Send + Sync,
{
    fn reduce(&self, previous: Option<&Value>, action: &Action) -> Value {
        self(previous, action)
    }
}

pub type SharedSliceReducer = Arc<dyn SliceReducer>;

/// What one feature module adds to the registry.
pub enum Contribution {
    Single(SliceKey, SharedSliceReducer),
    Group(Vec<(SliceKey, SharedSliceReducer)>),
}

impl Contribution {
    pub fn single(key: SliceKey, reducer: impl SliceReducer + 'static) -> Self {
        Self::Single(key, Arc::new(reducer))
    }

    fn into_entries(self) -> Vec<(SliceKey, SharedSliceReducer)> {
        match self {
            Self::Single(key, reducer) => vec![(key, reducer)],
            Self::Group(entries) => entries,
        }
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<(SliceKey, SharedSliceReducer)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contribute(mut self, contribution: Contribution) -> Self {
        self.entries.extend(contribution.into_entries());
        self
    }

    pub fn build(self) -> Result<ReducerRegistry, RegistryError> {
        let mut table = BTreeMap::new();
        for (key, reducer) in self.entries {
            if table.insert(key, reducer).is_some() {
                return Err(RegistryError::DuplicateSlice(key));
            }
        }
        if let Some(missing) = SliceKey::ALL.into_iter().find(|key| !table.contains_key(key)) {
            return Err(RegistryError::MissingSlice(missing));
        }
        Ok(ReducerRegistry { table })
    }
}

/// Immutable, complete table of slice reducers.
pub struct ReducerRegistry {
    table: BTreeMap<SliceKey, SharedSliceReducer>,
}

impl ReducerRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn keys(&self) -> impl Iterator<Item = SliceKey> + '_ {
        self.table.keys().copied()
    }

    /// Composed reduction: every entry reduces its own slice of `working`
    /// against the same action. The result always holds every registry key.
    pub fn reduce_all(&self, working: Option<&StateTree>, action: &Action) -> StateTree {
        self.table
            .iter()
            .map(|(key, reducer)| {
                let previous = working.and_then(|tree| tree.get(*key));
                (*key, reducer.reduce(previous, action))
            })
            .collect()
    }
}

impl fmt::Debug for ReducerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerRegistry")
            .field("slices", &self.table.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
