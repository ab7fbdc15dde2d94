//! Dashboard store: owns the current state tree and runs every dispatched
//! action through the root reducer, one at a time.

use std::sync::Arc;

use shared::{
    domain::SliceKey,
    protocol::{Action, USER_LOG_OUT},
};
use tracing::{error, info, warn};

use crate::{
    effects::{Navigator, StateStorage, ROOT_PATH},
    error::StoreError,
    state::StateTree,
    transition::RootReducer,
};

/// Slices written to persisted storage after each dispatch and restored on boot.
pub const PERSISTED_SLICES: [SliceKey; 1] = [SliceKey::Core];

/// Runs logout in order: clear persisted storage, reset the state tree,
/// then hard-redirect to the dashboard root.
pub struct LogoutCoordinator {
    storage: Arc<dyn StateStorage>,
    navigator: Arc<dyn Navigator>,
}

impl LogoutCoordinator {
    pub fn new(storage: Arc<dyn StateStorage>, navigator: Arc<dyn Navigator>) -> Self {
        Self { storage, navigator }
    }

    /// A failed clear aborts the logout before the state is touched.
    pub async fn run(
        &self,
        reducer: &RootReducer,
        current: &StateTree,
        action: &Action,
    ) -> Result<StateTree, StoreError> {
        if let Err(source) = self.storage.clear().await {
            error!("failed to clear persisted storage during logout: {source:#}");
            return Err(StoreError::ClearStorage { source });
        }

        let reset = reducer.transition(Some(current), action)?;

        info!(path = ROOT_PATH, "redirecting after logout");
        self.navigator.hard_redirect(ROOT_PATH);
        Ok(reset)
    }
}

pub struct DashboardStore {
    reducer: RootReducer,
    state: StateTree,
    storage: Arc<dyn StateStorage>,
    logout: LogoutCoordinator,
    persist_state: bool,
    logged_out: bool,
}

impl DashboardStore {
    /// Builds the initial tree from `@@INIT`, seeded with the persisted
    /// slices when `persist_state` is set and a snapshot exists.
    pub async fn boot(
        reducer: RootReducer,
        storage: Arc<dyn StateStorage>,
        navigator: Arc<dyn Navigator>,
        persist_state: bool,
    ) -> Result<Self, StoreError> {
        let restored = if persist_state {
            match storage.load_snapshot().await {
                Ok(snapshot) => snapshot.map(|s| StateTree::from_snapshot(&s, &PERSISTED_SLICES)),
                Err(err) => {
                    warn!("ignoring unreadable persisted state: {err:#}");
                    None
                }
            }
        } else {
            None
        };
        if let Some(tree) = &restored {
            info!(slices = tree.len(), "restoring persisted dashboard state");
        }

        let state = reducer.transition(restored.as_ref(), &Action::init())?;
        Ok(Self {
            logout: LogoutCoordinator::new(storage.clone(), navigator),
            reducer,
            state,
            storage,
            persist_state,
            logged_out: false,
        })
    }

    pub fn state(&self) -> &StateTree {
        &self.state
    }

    /// True once a logout ran. Actions may still arrive before the redirect
    /// lands; they reduce against the blank tree and are never persisted.
    pub fn is_logged_out(&self) -> bool {
        self.logged_out
    }

    pub async fn dispatch(&mut self, action: Action) -> Result<&StateTree, StoreError> {
        if action.is(USER_LOG_OUT) {
            self.state = self.logout.run(&self.reducer, &self.state, &action).await?;
            self.logged_out = true;
            return Ok(&self.state);
        }

        self.state = self.reducer.transition(Some(&self.state), &action)?;

        if self.persist_state && !self.logged_out {
            let snapshot = self.state.snapshot(&PERSISTED_SLICES);
            if let Err(err) = self.storage.save_snapshot(&snapshot).await {
                warn!(action = %action.kind, "failed to persist dashboard state: {err:#}");
            }
        }
        Ok(&self.state)
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
