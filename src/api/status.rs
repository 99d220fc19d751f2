use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, StatusResponse};

/// Chain summary: length, aggregate transaction count and the tail block.
#[get("/status/")]
pub async fn get_status(state: web::Data<AppState>) -> impl Responder {
    let (chain_length, total_transactions, last_block) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        (
            ledger.len(),
            ledger.total_transactions(),
            ledger.tail().ok().cloned(),
        )
    };
    let pending_transactions = state.pool.lock().expect("mutex poisoned").len();

    HttpResponse::Ok().json(StatusResponse {
        running: true,
        chain_length,
        total_transactions,
        pending_transactions,
        last_block,
    })
}
