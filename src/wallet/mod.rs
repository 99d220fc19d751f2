//! Balance and history derivation by replaying the chain.
//!
//! All functions are pure reads over the ledger. Cost is O(total
//! transactions) per call, which is fine at this scale; a larger chain
//! would want an incrementally maintained index.

use crate::ledger::Ledger;
use crate::transaction::Transaction;

/// Net balance of an address: credits minus debits across every block,
/// in chain order. No overdraft check exists anywhere in the system, so
/// balances may legitimately go negative.
pub fn balance_of(ledger: &Ledger, address: &str) -> f64 {
    let mut balance = 0.0;
    for block in &ledger.chain {
        for tx in &block.transactions {
            if tx.from_address.as_deref() == Some(address) {
                balance -= tx.amount;
            }
            if tx.to_address == address {
                balance += tx.amount;
            }
        }
    }
    balance
}

/// Every transaction touching the address, annotated with its containing
/// block's index, in chain order.
pub fn transactions_for(ledger: &Ledger, address: &str) -> Vec<(Transaction, u64)> {
    let mut out = Vec::new();
    for block in &ledger.chain {
        for tx in &block.transactions {
            if tx.from_address.as_deref() == Some(address) || tx.to_address == address {
                out.push((tx.clone(), block.index));
            }
        }
    }
    out
}

/// Total mined rewards credited to the address (coinbase transactions only).
pub fn rewards_of(ledger: &Ledger, address: &str) -> f64 {
    ledger
        .chain
        .iter()
        .flat_map(|b| &b.transactions)
        .filter(|tx| tx.is_reward() && tx.to_address == address)
        .map(|tx| tx.amount)
        .sum()
}
