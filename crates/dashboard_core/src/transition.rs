//! Root transition: picks the working state for an action, then delegates to
//! the composed reduction of the registry.

use std::sync::Arc;

use shared::{
    domain::SliceKey,
    protocol::{Action, CoreInfoParam, UPDATE_CORE_INFO, USER_LOG_OUT},
};
use tracing::{debug, info};

use crate::{error::TransitionError, registry::ReducerRegistry, state::StateTree};

/// Slices that survive an unconfigured-core reset unconditionally.
pub const RESET_SURVIVORS: [SliceKey; 2] = [SliceKey::Routing, SliceKey::Form];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionClass {
    /// `UPDATE_CORE_INFO` reporting an unconfigured core.
    UnconfigureReset(CoreInfoParam),
    /// `USER_LOG_OUT`: nothing survives.
    LogoutReset,
    NormalDelegate,
}

impl TransitionClass {
    /// Classifies `action`. Unconfigure is checked before logout.
    pub fn of(action: &Action) -> Result<Self, TransitionError> {
        if action.is(UPDATE_CORE_INFO) {
            let param = CoreInfoParam::from_action(action)?;
            if !param.is_configured {
                return Ok(Self::UnconfigureReset(param));
            }
        } else if action.is(USER_LOG_OUT) {
            return Ok(Self::LogoutReset);
        }
        Ok(Self::NormalDelegate)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::UnconfigureReset(_) => "unconfigure_reset",
            Self::LogoutReset => "logout_reset",
            Self::NormalDelegate => "normal_delegate",
        }
    }
}

/// The dashboard's root reducer. Holds no state between calls.
#[derive(Debug, Clone)]
pub struct RootReducer {
    registry: Arc<ReducerRegistry>,
}

impl RootReducer {
    pub fn new(registry: Arc<ReducerRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ReducerRegistry {
        &self.registry
    }

    pub fn transition(
        &self,
        previous: Option<&StateTree>,
        action: &Action,
    ) -> Result<StateTree, TransitionError> {
        let class = TransitionClass::of(action)?;
        debug!(action = %action.kind, class = class.name(), "reducing action");

        let reset;
        let working = match class {
            TransitionClass::UnconfigureReset(param) => {
                reset = unconfigured_working_state(previous, &param);
                info!(
                    blockchain_id = %param.blockchain_id,
                    core_preserved = reset.contains(SliceKey::Core),
                    "core reported unconfigured; resetting dashboard state"
                );
                Some(&reset)
            }
            TransitionClass::LogoutReset => {
                info!("user logged out; resetting dashboard state");
                None
            }
            TransitionClass::NormalDelegate => previous,
        };

        Ok(self.registry.reduce_all(working, action))
    }
}

/// Working state for an unconfigured-core reset. Routing and form always
/// survive; core survives only while it names the reported blockchain.
pub fn unconfigured_working_state(previous: Option<&StateTree>, param: &CoreInfoParam) -> StateTree {
    let mut working = StateTree::new();
    let Some(previous) = previous else {
        return working;
    };

    for key in RESET_SURVIVORS {
        working.carry_over(previous, key);
    }
    if previous
        .core_blockchain_id()
        .is_some_and(|stored| param.blockchain_id.matches(stored))
    {
        working.carry_over(previous, SliceKey::Core);
    }
    working
}

#[cfg(test)]
#[path = "tests/transition_tests.rs"]
mod tests;
