//! Headless workspace core (state/action/effect).

pub mod action;
pub mod analysis;
pub mod effect;
pub mod persistence;
pub mod services;
pub mod store;
pub mod workspace;

pub use action::Action;
pub use analysis::{AnalysisCache, AnalysisInput, CheckOutcome, CheckResult, Deferred};
pub use effect::Effect;
pub use persistence::{PersistenceGateway, ShareError};
pub use store::{DispatchResult, Store};
pub use workspace::{
    ActiveFile, FileRegistry, RegistryError, Revision, WorkspaceController, WorkspaceSnapshot,
};
