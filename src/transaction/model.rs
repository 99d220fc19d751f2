use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A value transfer recorded on the chain.
///
/// `from_address == None` marks a reward (coinbase) transaction created by
/// the miner; every externally submitted transaction carries an origin.
/// The `id` is the sole deduplication key — timestamps may collide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub from_address: Option<String>,
    pub to_address: String,
    pub amount: f64,
    /// Milliseconds since epoch (UTC).
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<serde_json::Value>,
}

impl Transaction {
    fn build(
        from_address: Option<String>,
        to_address: String,
        amount: f64,
        sale_id: Option<String>,
        items: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from_address,
            to_address,
            amount,
            timestamp: Utc::now().timestamp_millis(),
            sale_id,
            items,
        }
    }

    /// A generic transfer between two addresses.
    pub fn transfer(from_address: &str, to_address: &str, amount: f64) -> Self {
        Self::build(
            Some(from_address.to_string()),
            to_address.to_string(),
            amount,
            None,
            None,
        )
    }

    /// A point-of-sale transaction tagged with its sale metadata.
    pub fn sale(
        sale_id: &str,
        to_address: &str,
        amount: f64,
        items: Option<serde_json::Value>,
    ) -> Self {
        Self::build(
            Some(crate::ledger::POS_ORIGIN_ADDRESS.to_string()),
            to_address.to_string(),
            amount,
            Some(sale_id.to_string()),
            items,
        )
    }

    /// The coinbase transaction crediting the miner for a mined block.
    pub fn reward(miner_address: &str, amount: f64) -> Self {
        Self::build(None, miner_address.to_string(), amount, None, None)
    }

    pub fn is_reward(&self) -> bool {
        self.from_address.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::Transaction;

    #[test]
    fn ids_are_unique_even_with_equal_timestamps() {
        let a = Transaction::transfer("alice", "bob", 5.0);
        let mut b = Transaction::transfer("alice", "bob", 5.0);
        b.timestamp = a.timestamp;
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn reward_has_no_origin() {
        let tx = Transaction::reward("miner", 1.0);
        assert!(tx.is_reward());
        assert_eq!(tx.to_address, "miner");
    }

    #[test]
    fn sale_is_tagged() {
        let tx = Transaction::sale("sale-42", "shop", 12.5, None);
        assert_eq!(tx.sale_id.as_deref(), Some("sale-42"));
        assert!(!tx.is_reward());
    }

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let tx = Transaction::transfer("alice", "bob", 5.0);
        let json = serde_json::to_value(&tx).expect("serialize tx");
        assert!(json.get("fromAddress").is_some());
        assert!(json.get("toAddress").is_some());
        assert!(json.get("saleId").is_none()); // skipped when absent
    }
}
