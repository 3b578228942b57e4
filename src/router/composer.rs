//! View composer: (active tab, selection) -> what to draw

use crate::core::{Action, PanelProps};
use crate::router::{registry, LazyLoader, PanelLoadError, PanelLoadState, PanelRef, TabStateMachine};

/// Result of one composition pass
#[derive(Debug, Clone)]
pub enum ViewDescriptor {
    /// Panel code is not resident yet; draw the loading fallback
    Loading { panel: PanelRef },
    /// Panel code could not be acquired; draw the error fallback
    Failed {
        panel: PanelRef,
        error: PanelLoadError,
    },
    /// Draw the panel itself
    Content { panel: PanelRef, props: PanelProps },
}

impl ViewDescriptor {
    pub fn panel(&self) -> PanelRef {
        match self {
            ViewDescriptor::Loading { panel }
            | ViewDescriptor::Failed { panel, .. }
            | ViewDescriptor::Content { panel, .. } => *panel,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewDescriptor::Loading { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ViewDescriptor::Failed { .. })
    }

    pub fn props(&self) -> Option<&PanelProps> {
        match self {
            ViewDescriptor::Content { props, .. } => Some(props),
            _ => None,
        }
    }
}

/// Decide which panel is visible and which callbacks it gets.
///
/// Pure; does not touch the loader.
pub fn resolve_target(state: &TabStateMachine) -> (PanelRef, PanelProps) {
    let selection = state.selection();
    let mut props = PanelProps {
        transaction: selection.transaction().cloned(),
        ..PanelProps::default()
    };

    if state.active_tab().is_block_explorer() {
        if let Some(block) = selection.block() {
            props.block = Some(block.clone());
            props.on_back = Some(|| Action::Back);
            props.on_transaction_select = Some(Action::SelectTransaction);
            return (PanelRef::BlockDetails, props);
        }
    }

    let panel = registry::resolve(state.active_tab());
    match panel {
        PanelRef::BlockExplorer => {
            props.on_block_select = Some(Action::SelectBlock);
        }
        PanelRef::Dashboard | PanelRef::Transactions | PanelRef::Traceability => {
            props.on_transaction_select = Some(Action::SelectTransaction);
        }
        PanelRef::Search => {
            props.on_block_select = Some(Action::SelectBlock);
            props.on_transaction_select = Some(Action::SelectTransaction);
        }
        _ => {}
    }
    (panel, props)
}

/// Resolve the visible panel and acquire it if needed.
///
/// Called on every frame; nothing is cached between calls besides the
/// loader's own per-panel state.
pub fn compose(state: &TabStateMachine, loader: &mut LazyLoader) -> ViewDescriptor {
    let (panel, props) = resolve_target(state);
    match loader.acquire(panel) {
        PanelLoadState::Ready(_) => ViewDescriptor::Content { panel, props },
        PanelLoadState::Failed(error) => ViewDescriptor::Failed {
            panel,
            error: error.clone(),
        },
        PanelLoadState::NotRequested | PanelLoadState::Pending => ViewDescriptor::Loading { panel },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BlockRef, TabId, TransactionRef};

    #[test]
    fn test_explorer_with_block_resolves_to_details() {
        let mut state = TabStateMachine::new(TabId::Blocks);
        state.select_block(BlockRef::new(12, "0x0c"));
        let (panel, props) = resolve_target(&state);
        assert_eq!(panel, PanelRef::BlockDetails);
        assert_eq!(props.block, Some(BlockRef::new(12, "0x0c")));
        assert_eq!(props.back(), Action::Back);
        assert_eq!(
            props.transaction_select(TransactionRef::new("0x1")),
            Action::SelectTransaction(TransactionRef::new("0x1"))
        );
        assert!(props.on_block_select.is_none());
    }

    #[test]
    fn test_selected_block_is_ignored_off_explorer() {
        let mut state = TabStateMachine::new(TabId::Analytics);
        state.select_block(BlockRef::new(12, "0x0c"));
        let (panel, props) = resolve_target(&state);
        assert_eq!(panel, PanelRef::Analytics);
        assert!(!props.has_callbacks());
        assert!(props.block.is_none());
    }

    #[test]
    fn test_explorer_list_gets_block_select_only() {
        let state = TabStateMachine::new(TabId::Explorer);
        let (panel, props) = resolve_target(&state);
        assert_eq!(panel, PanelRef::BlockExplorer);
        assert!(props.on_block_select.is_some());
        assert!(props.on_transaction_select.is_none());
        assert!(props.on_back.is_none());
    }

    #[test]
    fn test_callbacks_per_panel() {
        // (tab, block select, transaction select)
        let cases = [
            (TabId::Dashboard, false, true),
            (TabId::Transactions, false, true),
            (TabId::Traceability, false, true),
            (TabId::Search, true, true),
            (TabId::Explorer, true, false),
            (TabId::Items, false, false),
            (TabId::Sparql, false, false),
            (TabId::Analytics, false, false),
        ];
        for (tab, block, tx) in cases {
            let (_, props) = resolve_target(&TabStateMachine::new(tab));
            assert_eq!(props.on_block_select.is_some(), block, "{tab}");
            assert_eq!(props.on_transaction_select.is_some(), tx, "{tab}");
            assert!(props.on_back.is_none(), "{tab}");
        }
    }

    #[test]
    fn test_selected_transaction_is_passed_for_highlighting() {
        let mut state = TabStateMachine::new(TabId::Transactions);
        state.select_transaction(TransactionRef::new("0xbeef"));
        let (_, props) = resolve_target(&state);
        assert_eq!(props.transaction, Some(TransactionRef::new("0xbeef")));
    }
}
