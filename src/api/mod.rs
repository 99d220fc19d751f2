mod health;
mod mining;
pub mod models;
mod status;
mod tx;
mod wallet;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(status::get_status)
            .service(mining::mining_status)
            .service(mining::start_mining)
            .service(mining::stop_mining)
            .service(mining::start_discrete_mining)
            .service(mining::stop_discrete_mining)
            .service(tx::post_transaction)
            .service(tx::post_pos_transaction)
            .service(wallet::get_wallet),
    );
}
