use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, HealthResponse};

#[get("/health/")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let chain_length = state.ledger.lock().expect("mutex poisoned").len();
    let pending_transactions = state.pool.lock().expect("mutex poisoned").len();

    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        chain_length,
        pending_transactions,
        is_mining: state.engine.is_mining(),
        is_discrete_mining: state.engine.is_discrete_mining(),
    })
}
