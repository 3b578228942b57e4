//! Panel contract consumed by the view composer

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

use super::{Action, BlockRef, TransactionRef};

/// Callback handed to a panel; the returned action is fed back to the router
pub type Callback<T> = fn(T) -> Action;

/// What the composer hands a panel for one frame.
///
/// Callbacks are optional: a standalone tab gets none, and invoking a missing
/// one yields [`Action::None`].
#[derive(Debug, Clone, Default)]
pub struct PanelProps {
    /// Block the panel is about (block details only)
    pub block: Option<BlockRef>,
    /// Currently selected transaction, for highlighting
    pub transaction: Option<TransactionRef>,
    pub on_block_select: Option<Callback<BlockRef>>,
    pub on_transaction_select: Option<Callback<TransactionRef>>,
    pub on_back: Option<fn() -> Action>,
}

impl PanelProps {
    pub fn block_select(&self, block: BlockRef) -> Action {
        self.on_block_select
            .map(|cb| cb(block))
            .unwrap_or(Action::None)
    }

    pub fn transaction_select(&self, tx: TransactionRef) -> Action {
        self.on_transaction_select
            .map(|cb| cb(tx))
            .unwrap_or(Action::None)
    }

    pub fn back(&self) -> Action {
        self.on_back.map(|cb| cb()).unwrap_or(Action::None)
    }

    pub fn has_callbacks(&self) -> bool {
        self.on_block_select.is_some()
            || self.on_transaction_select.is_some()
            || self.on_back.is_some()
    }
}

/// Error a panel reports from its own rendering
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelRenderError {
    #[error("panel needs a selected block")]
    MissingBlock,
    #[error("{0}")]
    Other(String),
}

/// A lazily acquired unit of UI corresponding to one tab's content
pub trait Panel: Send {
    /// Draw into `area`. Errors are caught by the suspension boundary.
    fn render(&self, frame: &mut Frame, area: Rect, props: &PanelProps)
        -> Result<(), PanelRenderError>;

    /// Handle keyboard input while the panel has focus
    fn handle_key(&mut self, _key: KeyEvent, _props: &PanelProps) -> Action {
        Action::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_callbacks_are_tolerated() {
        let props = PanelProps::default();
        assert!(!props.has_callbacks());
        assert_eq!(props.block_select(BlockRef::new(1, "0x1")), Action::None);
        assert_eq!(props.transaction_select(TransactionRef::new("0x2")), Action::None);
        assert_eq!(props.back(), Action::None);
    }

    #[test]
    fn test_supplied_callbacks_produce_actions() {
        let props = PanelProps {
            on_block_select: Some(Action::SelectBlock),
            on_back: Some(|| Action::Back),
            ..PanelProps::default()
        };
        assert_eq!(
            props.block_select(BlockRef::new(3, "0x3")),
            Action::SelectBlock(BlockRef::new(3, "0x3"))
        );
        assert_eq!(props.back(), Action::Back);
        assert_eq!(props.transaction_select(TransactionRef::new("0x4")), Action::None);
    }
}
