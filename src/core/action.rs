//! Actions that panels and input handlers return to the app

use super::{BlockRef, TransactionRef};

/// Actions returned by panels and commands to communicate state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Switch tabs. Carries the raw identifier as emitted by navigation.
    ChangeTab(String),

    /// Select a block (drill-down on the explorer tabs)
    SelectBlock(BlockRef),

    /// Select a transaction
    SelectTransaction(TransactionRef),

    /// Leave the block details view
    Back,

    /// Retry a panel whose code failed to load
    RetryPanel,

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Request quit
    Quit,
}

impl Action {
    /// Whether this action is one of the four router transitions
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Action::ChangeTab(_) | Action::SelectBlock(_) | Action::SelectTransaction(_) | Action::Back
        )
    }
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
