use actix_web::{HttpResponse, Responder, get, post, web};
use rand::Rng;

use super::models::{AppState, MiningStatusResponse, MiningToggleResponse};

fn toggle_response(state: &AppState) -> HttpResponse {
    HttpResponse::Ok().json(MiningToggleResponse {
        is_mining: state.engine.is_mining(),
        is_discrete_mining: state.engine.is_discrete_mining(),
    })
}

#[get("/mining/status/")]
pub async fn mining_status(state: web::Data<AppState>) -> impl Responder {
    let (current_block, difficulty) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        let index = ledger.tail().map(|b| b.index).unwrap_or(0);
        (index, ledger.difficulty())
    };
    let is_mining = state.engine.is_mining();

    // Decorative figure; there is no real work-search to measure.
    let hashrate = if is_mining || state.engine.is_discrete_mining() {
        rand::thread_rng().gen_range(80.0..160.0)
    } else {
        0.0
    };

    HttpResponse::Ok().json(MiningStatusResponse {
        is_mining,
        is_discrete_mining: state.engine.is_discrete_mining(),
        current_block,
        difficulty,
        hashrate,
    })
}

#[post("/mining/start/")]
pub async fn start_mining(state: web::Data<AppState>) -> impl Responder {
    state.engine.start_continuous();
    toggle_response(&state)
}

#[post("/mining/stop/")]
pub async fn stop_mining(state: web::Data<AppState>) -> impl Responder {
    state.engine.stop_continuous();
    toggle_response(&state)
}

#[post("/mining/discrete/start/")]
pub async fn start_discrete_mining(state: web::Data<AppState>) -> impl Responder {
    state.engine.start_discrete();
    toggle_response(&state)
}

#[post("/mining/discrete/stop/")]
pub async fn stop_discrete_mining(state: web::Data<AppState>) -> impl Responder {
    state.engine.stop_discrete();
    toggle_response(&state)
}
