//! Tab state machine
//!
//! The active tab and the selection are two separate slots. They are only
//! combined when the composer resolves the visible panel.

use crate::core::{Action, BlockRef, Selection, TabId, TransactionRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabStateMachine {
    active: TabId,
    selection: Selection,
}

impl Default for TabStateMachine {
    fn default() -> Self {
        Self::new(TabId::Dashboard)
    }
}

impl TabStateMachine {
    pub fn new(initial: TabId) -> Self {
        Self {
            active: initial,
            selection: Selection::new(),
        }
    }

    pub fn active_tab(&self) -> TabId {
        self.active
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Switch tabs. Selection never survives an explicit tab change.
    pub fn change_tab(&mut self, tab: TabId) {
        tracing::debug!(from = %self.active, to = %tab, "tab change");
        self.active = tab;
        self.selection.clear();
    }

    /// Switch tabs from a raw identifier (unknown → dashboard)
    pub fn change_tab_raw(&mut self, raw: &str) -> TabId {
        let tab = TabId::coerce(raw);
        self.change_tab(tab);
        tab
    }

    /// Select a block. On the explorer tabs this drills down into details;
    /// the active tab is left as is either way.
    pub fn select_block(&mut self, block: BlockRef) {
        tracing::debug!(tab = %self.active, block = block.number, "block selected");
        self.selection.select_block(block);
    }

    pub fn select_transaction(&mut self, tx: TransactionRef) {
        tracing::debug!(tab = %self.active, tx = %tx.hash, "transaction selected");
        self.selection.select_transaction(tx);
    }

    /// Return from block details to the list; the transaction is kept
    pub fn back_from_block_details(&mut self) {
        self.selection.clear_block();
    }

    pub fn is_drilled_down(&self) -> bool {
        self.active.is_block_explorer() && self.selection.block().is_some()
    }

    /// Apply a router action. Returns false for actions the router does not own.
    pub fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::ChangeTab(raw) => {
                self.change_tab_raw(raw);
            }
            Action::SelectBlock(block) => self.select_block(block.clone()),
            Action::SelectTransaction(tx) => self.select_transaction(tx.clone()),
            Action::Back => self.back_from_block_details(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(number: u64) -> BlockRef {
        BlockRef::new(number, format!("0x{number:064x}"))
    }

    #[test]
    fn test_initial_state_is_dashboard() {
        let machine = TabStateMachine::default();
        assert_eq!(machine.active_tab(), TabId::Dashboard);
        assert!(machine.selection().is_empty());
    }

    #[test]
    fn test_change_tab_clears_selection_from_any_state() {
        for tab in TabId::ALL {
            let mut machine = TabStateMachine::new(TabId::Blocks);
            machine.select_block(block(9));
            machine.select_transaction(TransactionRef::new("0x09"));
            machine.change_tab(tab);
            assert_eq!(machine.active_tab(), tab);
            assert!(machine.selection().block().is_none());
            assert!(machine.selection().transaction().is_none());
        }
    }

    #[test]
    fn test_reselecting_the_same_tab_still_clears() {
        let mut machine = TabStateMachine::new(TabId::Explorer);
        machine.select_block(block(1));
        machine.change_tab(TabId::Explorer);
        assert!(machine.selection().is_empty());
    }

    #[test]
    fn test_drill_down_keeps_the_tab() {
        let mut machine = TabStateMachine::new(TabId::Explorer);
        machine.select_block(block(5));
        assert_eq!(machine.active_tab(), TabId::Explorer);
        assert!(machine.is_drilled_down());

        machine.back_from_block_details();
        assert_eq!(machine.active_tab(), TabId::Explorer);
        assert!(!machine.is_drilled_down());
    }

    #[test]
    fn test_back_keeps_transaction() {
        let mut machine = TabStateMachine::new(TabId::Blocks);
        machine.select_block(block(5));
        machine.select_transaction(TransactionRef::new("0xfeed").in_block(5));
        machine.back_from_block_details();
        assert!(machine.selection().block().is_none());
        assert_eq!(
            machine.selection().transaction().map(|tx| tx.hash.as_str()),
            Some("0xfeed")
        );
    }

    #[test]
    fn test_block_selection_outside_explorer_is_not_a_drill_down() {
        let mut machine = TabStateMachine::new(TabId::Transactions);
        machine.select_block(block(2));
        assert!(!machine.is_drilled_down());
        assert!(machine.selection().block().is_some());
    }

    #[test]
    fn test_apply_raw_tab_change() {
        let mut machine = TabStateMachine::default();
        assert!(machine.apply(&Action::ChangeTab("sparql".to_string())));
        assert_eq!(machine.active_tab(), TabId::Sparql);
        assert!(machine.apply(&Action::ChangeTab("bogus".to_string())));
        assert_eq!(machine.active_tab(), TabId::Dashboard);
        assert!(!machine.apply(&Action::Quit));
    }
}
