use actix_web::{HttpResponse, Responder, post, web};
use log::{info, warn};

use super::models::{AppState, NewTransferRequest, PosSaleRequest, SubmitTxResponse, error_response};
use crate::error::LedgerError;
use crate::transaction::Transaction;

/// Submit a generic transfer into the pending pool.
#[post("/transactions/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTransferRequest>,
) -> impl Responder {
    let Some(from_address) = body.from_address.as_deref() else {
        warn!("POST /transactions/ - rejected: missing fromAddress");
        return error_response(&LedgerError::MissingField("fromAddress"));
    };
    let Some(to_address) = body.to_address.as_deref() else {
        warn!("POST /transactions/ - rejected: missing toAddress");
        return error_response(&LedgerError::MissingField("toAddress"));
    };
    let Some(amount) = body.amount else {
        warn!("POST /transactions/ - rejected: missing amount");
        return error_response(&LedgerError::MissingField("amount"));
    };

    let tx = Transaction::transfer(from_address, to_address, amount);
    let tx_id = tx.id.clone();

    let result = {
        let mut pool = state.pool.lock().expect("mutex poisoned");
        match pool.submit(tx) {
            Ok(()) => Ok(pool.len()),
            Err(err) => Err(err),
        }
    };

    match result {
        Ok(pending) => {
            info!("POST /transactions/ - tx {tx_id} queued (pool size {pending})");
            HttpResponse::Ok().json(SubmitTxResponse {
                id: tx_id,
                pending,
            })
        }
        Err(err) => {
            warn!("POST /transactions/ - rejected: {err}");
            error_response(&err)
        }
    }
}

/// Queue a tagged point-of-sale transaction. Always accepted; when discrete
/// mining is running, an out-of-band confirmation is scheduled so the sale
/// lands in a block ahead of the next sweep.
#[post("/pos/transaction/")]
pub async fn post_pos_transaction(
    state: web::Data<AppState>,
    body: web::Json<PosSaleRequest>,
) -> impl Responder {
    let tx = Transaction::sale(
        &body.sale_id,
        state.engine.validator(),
        body.amount,
        body.items.clone(),
    );
    let tx_id = tx.id.clone();

    let pending = {
        let mut pool = state.pool.lock().expect("mutex poisoned");
        pool.submit_unchecked(tx);
        pool.len()
    };

    state.engine.schedule_pos_confirmation();

    info!(
        "POST /pos/transaction/ - sale {} queued as tx {tx_id} (pool size {pending})",
        body.sale_id
    );
    HttpResponse::Ok().json(SubmitTxResponse {
        id: tx_id,
        pending,
    })
}
