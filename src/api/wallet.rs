use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, TransactionRecord, WalletResponse};
use crate::wallet::{balance_of, rewards_of, transactions_for};

/// Wallet info derived by replaying the chain. There is no staking in this
/// system, so the staked amount is always zero rather than a random figure.
#[get("/wallet/{address}/")]
pub async fn get_wallet(state: web::Data<AppState>, path: web::Path<(String,)>) -> impl Responder {
    let address = path.into_inner().0;

    let (balance, transactions, rewards) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        let transactions = transactions_for(&ledger, &address)
            .into_iter()
            .map(|(transaction, block_index)| TransactionRecord {
                block_index,
                transaction,
            })
            .collect();
        (
            balance_of(&ledger, &address),
            transactions,
            rewards_of(&ledger, &address),
        )
    };

    HttpResponse::Ok().json(WalletResponse {
        address,
        balance,
        transactions,
        staked_amount: 0.0,
        rewards,
    })
}
