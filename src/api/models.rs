use std::sync::{Arc, Mutex};

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::ledger::{Block, DEFAULT_DIFFICULTY, Ledger};
use crate::mining::{MiningConfig, MiningEngine};
use crate::transaction::{PendingPool, Transaction};

/// Shared application state: the chain, the pending pool and the engine
/// driving both mining strategies. Constructed once at service start;
/// the constructor synthesizes the genesis block.
pub struct AppState {
    pub ledger: Arc<Mutex<Ledger>>,
    pub pool: Arc<Mutex<PendingPool>>,
    pub engine: MiningEngine,
}

impl AppState {
    pub fn new(config: MiningConfig) -> Self {
        let ledger = Arc::new(Mutex::new(Ledger::new(&config.validator, DEFAULT_DIFFICULTY)));
        let pool = Arc::new(Mutex::new(PendingPool::new()));
        let engine = MiningEngine::new(Arc::clone(&ledger), Arc::clone(&pool), config);
        Self {
            ledger,
            pool,
            engine,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MiningConfig::default())
    }
}

/* ---------- Health / Status API Models ---------- */

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub chain_length: usize,
    pub pending_transactions: usize,
    pub is_mining: bool,
    pub is_discrete_mining: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub running: bool,
    pub chain_length: usize,
    pub total_transactions: usize,
    pub pending_transactions: usize,
    pub last_block: Option<Block>,
}

/* ---------- Mining API Models ---------- */

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningStatusResponse {
    pub is_mining: bool,
    pub is_discrete_mining: bool,
    pub current_block: u64,
    pub difficulty: u32,
    /// Illustrative figure only; no real work-search runs.
    pub hashrate: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningToggleResponse {
    pub is_mining: bool,
    pub is_discrete_mining: bool,
}

/* ---------- Transaction API Models ---------- */

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransferRequest {
    pub from_address: Option<String>,
    pub to_address: Option<String>,
    pub amount: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosSaleRequest {
    pub sale_id: String,
    pub amount: f64,
    #[serde(default)]
    pub items: Option<serde_json::Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTxResponse {
    pub id: String,
    pub pending: usize,
}

/* ---------- Wallet API Models ---------- */

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub block_index: u64,
    pub transaction: Transaction,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    pub address: String,
    pub balance: f64,
    pub transactions: Vec<TransactionRecord>,
    pub staked_amount: f64,
    pub rewards: f64,
}

/* ---------- Errors ---------- */

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

/// Map a ledger error to its HTTP response. Validation errors carry
/// field-level detail; the chain-empty invariant violation is a 500.
pub fn error_response(err: &LedgerError) -> HttpResponse {
    let body = ErrorResponse {
        error: err.to_string(),
        field: match err {
            LedgerError::MissingField(field) => Some(field),
            _ => None,
        },
    };
    if err.is_validation() {
        HttpResponse::BadRequest().json(body)
    } else {
        HttpResponse::InternalServerError().json(body)
    }
}
