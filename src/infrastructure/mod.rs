//! Infrastructure layer - the Tokio worker that runs panel loads and bootstrap

pub mod runtime;

pub use runtime::{PanelRequester, RuntimeBridge, RuntimeCommand, RuntimeEvent};
