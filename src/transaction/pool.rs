use log::debug;

use super::Transaction;
use crate::error::{LedgerError, Result};

/// FIFO queue of transactions accepted but not yet mined into a block.
///
/// Order is kept for audit readability only; inclusion does not depend on it.
#[derive(Debug, Default)]
pub struct PendingPool {
    queue: Vec<Transaction>,
}

impl PendingPool {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Validate and enqueue an externally submitted transaction.
    ///
    /// Rejections never partially mutate the pool. Reward transactions are
    /// created internally by the mine step and never pass through here,
    /// which is why a missing `from_address` is a validation error.
    pub fn submit(&mut self, tx: Transaction) -> Result<()> {
        if tx.from_address.as_deref().is_none_or(|a| a.trim().is_empty()) {
            return Err(LedgerError::MissingField("fromAddress"));
        }
        if tx.to_address.trim().is_empty() {
            return Err(LedgerError::MissingField("toAddress"));
        }
        if !(tx.amount > 0.0) {
            // also rejects NaN
            return Err(LedgerError::NonPositiveAmount);
        }
        debug!("POOL - queued tx {} (pool size {})", tx.id, self.queue.len() + 1);
        self.queue.push(tx);
        Ok(())
    }

    /// Enqueue without validation. Used for the tagged point-of-sale path,
    /// which is always accepted.
    pub fn submit_unchecked(&mut self, tx: Transaction) {
        debug!("POOL - queued tx {} (pool size {})", tx.id, self.queue.len() + 1);
        self.queue.push(tx);
    }

    /// Atomically capture the pool contents for mining and leave behind a
    /// single fresh reward transaction crediting the miner for this round.
    ///
    /// Callers hold the pool lock for the duration, so a racing `submit`
    /// lands either in the returned snapshot or in the replacement queue,
    /// never in both and never nowhere.
    pub fn drain_and_reward(&mut self, miner_address: &str, reward_amount: f64) -> Vec<Transaction> {
        let reward = Transaction::reward(miner_address, reward_amount);
        let snapshot = std::mem::replace(&mut self.queue, vec![reward]);
        debug!(
            "POOL - drained {} txs for mining, reward queued for next round",
            snapshot.len()
        );
        snapshot
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Read-only view of the queued transactions.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.queue.iter()
    }
}
