//! View routing
//!
//! - registry: tab id -> panel
//! - loader: on-demand, cached panel acquisition
//! - state: active tab + selection transitions
//! - composer: resolves the single visible panel each frame

pub mod composer;
pub mod loader;
pub mod registry;
pub mod state;

pub use composer::{compose, resolve_target, ViewDescriptor};
pub use loader::{Acquire, LazyLoader, LoadStatus, PanelLoadError, PanelLoadState, PanelSource};
pub use registry::{aliases, resolve, resolve_str, PanelRef};
pub use state::TabStateMachine;
