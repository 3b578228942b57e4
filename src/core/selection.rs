//! Cross-panel selection state

use std::fmt;

/// A ledger block picked in the block explorer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockRef {
    pub number: u64,
    pub hash: String,
}

impl BlockRef {
    pub fn new(number: u64, hash: impl Into<String>) -> Self {
        Self {
            number,
            hash: hash.into(),
        }
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.number)
    }
}

/// A transaction picked from any list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionRef {
    pub hash: String,
    pub block_number: Option<u64>,
}

impl TransactionRef {
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            block_number: None,
        }
    }

    pub fn in_block(mut self, number: u64) -> Self {
        self.block_number = Some(number);
        self
    }
}

impl fmt::Display for TransactionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hash)
    }
}

/// Currently selected block and transaction.
///
/// The two slots are independent: selecting one never touches the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    block: Option<BlockRef>,
    transaction: Option<TransactionRef>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self) -> Option<&BlockRef> {
        self.block.as_ref()
    }

    pub fn transaction(&self) -> Option<&TransactionRef> {
        self.transaction.as_ref()
    }

    pub fn select_block(&mut self, block: BlockRef) {
        self.block = Some(block);
    }

    pub fn select_transaction(&mut self, tx: TransactionRef) {
        self.transaction = Some(tx);
    }

    /// Drop the selected block, keeping the transaction
    pub fn clear_block(&mut self) {
        self.block = None;
    }

    /// Drop both slots at once
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.block.is_none() && self.transaction.is_none()
    }
}
