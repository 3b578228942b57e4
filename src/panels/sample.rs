//! Deterministic sample chain backing the built-in panels

use chrono::{DateTime, TimeZone, Utc};

use crate::core::{BlockRef, TransactionRef};

const GENESIS_NUMBER: u64 = 1_200_000;
const GENESIS_TIME: i64 = 1_735_689_600; // 2025-01-01T00:00:00Z
const BLOCK_TIME_SECS: i64 = 12;
const TXS_PER_BLOCK: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Success,
    Revert,
}

#[derive(Debug, Clone)]
pub struct BlockInfo {
    pub number: u64,
    pub hash: String,
    pub parent_hash: String,
    pub timestamp: DateTime<Utc>,
    pub tx_count: u32,
    pub gas_used: u64,
    pub miner: String,
}

impl BlockInfo {
    fn mock(number: u64) -> Self {
        let offset = (number - GENESIS_NUMBER) as i64;
        let timestamp = Utc
            .timestamp_opt(GENESIS_TIME + offset * BLOCK_TIME_SECS, 0)
            .single()
            .unwrap_or_default();
        Self {
            number,
            hash: block_hash(number),
            parent_hash: block_hash(number.saturating_sub(1)),
            timestamp,
            tx_count: TXS_PER_BLOCK as u32,
            gas_used: 12_000_000 + (number % 6) * 800_000,
            miner: format!("0x{:0>40x}", number % 1024 + 2024),
        }
    }

    pub fn to_ref(&self) -> BlockRef {
        BlockRef::new(self.number, self.hash.clone())
    }
}

#[derive(Debug, Clone)]
pub struct TxInfo {
    pub hash: String,
    pub from: String,
    pub to: String,
    pub value: f64,
    pub gas_used: u64,
    pub status: TxStatus,
    pub method: String,
    pub block_number: u64,
}

impl TxInfo {
    fn mock(seed: u64, block_number: u64) -> Self {
        let status = if seed % 7 == 0 {
            TxStatus::Revert
        } else {
            TxStatus::Success
        };
        let method = match seed % 5 {
            0 => "transfer",
            1 => "recordShipment",
            2 => "approve",
            3 => "registerItem",
            _ => "attest",
        };
        Self {
            hash: format!("0x{:0>64x}", seed * 1_000_007),
            from: format!("0x{:0>40x}", seed * 37 + 100),
            to: format!("0x{:0>40x}", seed * 91 + 300),
            value: (seed % 5) as f64 * 0.32 + 0.05,
            gas_used: 21_000 + (seed % 12) * 12_000,
            status,
            method: method.to_string(),
            block_number,
        }
    }

    pub fn to_ref(&self) -> TransactionRef {
        TransactionRef::new(self.hash.clone()).in_block(self.block_number)
    }
}

/// A fixed window of blocks with their transactions, newest last
#[derive(Debug, Clone)]
pub struct SampleChain {
    blocks: Vec<BlockInfo>,
    txs: Vec<TxInfo>,
}

impl Default for SampleChain {
    fn default() -> Self {
        Self::new(24)
    }
}

impl SampleChain {
    pub fn new(length: u64) -> Self {
        let mut blocks = Vec::with_capacity(length as usize);
        let mut txs = Vec::with_capacity((length * TXS_PER_BLOCK) as usize);
        for number in GENESIS_NUMBER..GENESIS_NUMBER + length {
            blocks.push(BlockInfo::mock(number));
            let first_seed = (number - GENESIS_NUMBER) * TXS_PER_BLOCK + 1;
            for seed in first_seed..first_seed + TXS_PER_BLOCK {
                txs.push(TxInfo::mock(seed, number));
            }
        }
        Self { blocks, txs }
    }

    pub fn blocks(&self) -> &[BlockInfo] {
        &self.blocks
    }

    pub fn txs(&self) -> &[TxInfo] {
        &self.txs
    }

    pub fn block(&self, number: u64) -> Option<&BlockInfo> {
        self.blocks.iter().find(|block| block.number == number)
    }

    pub fn txs_in_block(&self, number: u64) -> impl Iterator<Item = &TxInfo> {
        self.txs.iter().filter(move |tx| tx.block_number == number)
    }

    pub fn latest_blocks(&self, count: usize) -> impl Iterator<Item = &BlockInfo> {
        self.blocks.iter().rev().take(count)
    }

    pub fn latest_txs(&self, count: usize) -> impl Iterator<Item = &TxInfo> {
        self.txs.iter().rev().take(count)
    }

    pub fn head(&self) -> Option<&BlockInfo> {
        self.blocks.last()
    }
}

fn block_hash(number: u64) -> String {
    format!("0x{:0>64x}", number.wrapping_mul(0x9e37_79b9_7f4a_7c15))
}

pub fn short_hash(value: &str) -> String {
    if value.len() <= 14 {
        return value.to_string();
    }
    let start: String = value.chars().take(10).collect();
    let end: String = value
        .chars()
        .rev()
        .take(4)
        .collect::<String>()
        .chars()
        .rev()
        .collect();
    format!("{}..{}", start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_is_contiguous() {
        let chain = SampleChain::new(5);
        let numbers: Vec<u64> = chain.blocks().iter().map(|b| b.number).collect();
        assert_eq!(numbers, (GENESIS_NUMBER..GENESIS_NUMBER + 5).collect::<Vec<_>>());
        for pair in chain.blocks().windows(2) {
            assert_eq!(pair[1].parent_hash, pair[0].hash);
            assert!(pair[1].timestamp > pair[0].timestamp);
        }
    }

    #[test]
    fn test_txs_belong_to_their_block() {
        let chain = SampleChain::new(3);
        let head = chain.head().map(|b| b.number).unwrap_or_default();
        assert_eq!(chain.txs_in_block(head).count(), TXS_PER_BLOCK as usize);
        assert_eq!(chain.txs().len(), 3 * TXS_PER_BLOCK as usize);
    }

    #[test]
    fn test_short_hash() {
        assert_eq!(short_hash("0x1234"), "0x1234");
        let long = format!("0x{}", "ab".repeat(32));
        assert_eq!(short_hash(&long), "0xabababab..abab");
    }
}
