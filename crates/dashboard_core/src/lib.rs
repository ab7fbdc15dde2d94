//! State reduction core of the dashboard: the reducer registry, the root
//! transition with its reset rules, and the store that drives side effects
//! around it.

pub mod effects;
pub mod error;
pub mod features;
pub mod registry;
pub mod state;
pub mod store;
pub mod transition;

pub use effects::{Navigator, StateStorage, ROOT_PATH};
pub use error::{RegistryError, StoreError, TransitionError};
pub use registry::{Contribution, ReducerRegistry, RegistryBuilder, SliceReducer};
pub use state::StateTree;
pub use store::{DashboardStore, LogoutCoordinator, PERSISTED_SLICES};
pub use transition::{RootReducer, TransitionClass};
