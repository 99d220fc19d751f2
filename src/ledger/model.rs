use log::debug;

use super::{Block, GENESIS_PREV_HASH};
use crate::error::{LedgerError, Result};
use crate::transaction::Transaction;

/// The canonical, append-only chain of blocks.
///
/// Constructed once at service start; blocks are appended exclusively by the
/// mining engine through `append_block`.
#[derive(Debug)]
pub struct Ledger {
    pub chain: Vec<Block>,
    pub difficulty: u32,
    validator: String,
}

impl Ledger {
    /// Initialize the chain, synthesizing the genesis block.
    pub fn new(validator: &str, difficulty: u32) -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            difficulty,
            validator: validator.to_string(),
        };
        ledger.chain.push(Block::genesis(validator));
        ledger
    }

    /// The most recent block. Errors only on an empty chain, which cannot
    /// happen through the public constructor.
    pub fn tail(&self) -> Result<&Block> {
        self.chain.last().ok_or(LedgerError::InvalidChainState)
    }

    /// Build the next block off the current tail, append it and return it.
    pub fn append_block(&mut self, transactions: Vec<Transaction>) -> Result<&Block> {
        let (index, previous_hash) = {
            let tail = self.tail()?;
            (tail.index + 1, tail.hash.clone())
        };
        let block = Block::new(index, previous_hash, transactions, &self.validator);
        debug!(
            "LEDGER - appended block #{} ({} txs)",
            block.index,
            block.transactions.len()
        );
        self.chain.push(block);
        self.tail()
    }

    /// Validate the entire chain: genesis shape, linkage, index monotonicity
    /// and hash integrity.
    pub fn is_valid_chain(&self) -> bool {
        let Some(genesis) = self.chain.first() else {
            return false;
        };
        if genesis.index != 0
            || genesis.previous_hash != GENESIS_PREV_HASH
            || !genesis.is_valid()
        {
            return false;
        }

        for i in 1..self.chain.len() {
            let current = &self.chain[i];
            let prev = &self.chain[i - 1];

            if current.index != i as u64 {
                return false;
            }
            if current.previous_hash != prev.hash {
                return false;
            }
            if !current.is_valid() {
                return false;
            }
        }

        true
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Total number of transactions across all blocks.
    pub fn total_transactions(&self) -> usize {
        self.chain.iter().map(|b| b.transactions.len()).sum()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }
}
