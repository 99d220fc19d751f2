use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::GENESIS_PREV_HASH;
use crate::transaction::Transaction;

/// A single block in the chain holding the transactions captured at mine time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub index: u64,
    /// Milliseconds since epoch (UTC).
    pub timestamp: i64,
    pub transactions: Vec<Transaction>,
    pub previous_hash: String,
    pub hash: String, // Cached hash of the block
    pub validator: String,
    /// Opaque placeholder; nothing in the system verifies it.
    pub signature: String,
}

impl Block {
    /// Create the genesis block (first block in the chain).
    pub fn genesis(validator: &str) -> Self {
        Self::new(0, GENESIS_PREV_HASH.to_string(), Vec::new(), validator)
    }

    pub fn new(
        index: u64,
        previous_hash: String,
        transactions: Vec<Transaction>,
        validator: &str,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp: Utc::now().timestamp_millis(),
            transactions,
            previous_hash,
            hash: String::new(),
            validator: validator.to_string(),
            signature: String::new(),
        };
        block.hash = block.compute_hash();
        block.signature = format!("sig:{}:{}", block.validator, &block.hash[..16]);
        block
    }

    /// Compute the SHA-256 hash of this block from its fields (excluding
    /// `hash`, `validator` and `signature`). Transactions are serialized
    /// deterministically as JSON and included in the preimage, so any
    /// independent recomputation over the same fields verifies the block.
    pub fn compute_hash(&self) -> String {
        let txs_json = serde_json::to_string(&self.transactions).expect("serialize txs");
        let preimage = format!(
            "{}:{}:{}:{}",
            self.index, self.timestamp, txs_json, self.previous_hash
        );
        let mut hasher = Sha256::new();
        hasher.update(preimage.as_bytes());
        let digest = hasher.finalize();
        hex::encode(digest)
    }

    /// Validate that the cached `hash` matches the block's content.
    /// (Does NOT validate chain linkage.)
    pub fn is_valid(&self) -> bool {
        self.hash == self.compute_hash()
    }
}

#[cfg(test)]
mod tests {
    use super::Block;
    use crate::transaction::Transaction;

    #[test]
    fn genesis_has_valid_hash() {
        let b = Block::genesis("node-1");
        assert_eq!(b.index, 0);
        assert_eq!(b.previous_hash, "0");
        assert_eq!(b.hash, b.compute_hash());
        assert!(!b.hash.is_empty());
    }

    #[test]
    fn hash_is_lowercase_hex() {
        let b = Block::genesis("node-1");
        assert_eq!(b.hash.len(), 64);
        assert!(b.hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn invalid_when_mutated() {
        let tx = Transaction::transfer("alice", "bob", 10.0);
        let mut b = Block::new(1, "prev".into(), vec![tx], "node-1");
        assert!(b.is_valid());

        // Tampering: append a transaction after sealing.
        b.transactions.push(Transaction::transfer("mallory", "eve", 1.0));
        assert!(!b.is_valid());
    }

    #[test]
    fn signature_is_derived_placeholder() {
        let b = Block::genesis("node-1");
        assert!(b.signature.starts_with("sig:node-1:"));
    }
}
