mod api;
mod error;
mod ledger;
mod mining;
mod transaction;
mod wallet;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use std::env;

use api::AppState;
use mining::MiningConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);
    let validator = env::var("VALIDATOR_ID").unwrap_or_else(|_| "pos-node".to_string());

    println!("⛓️ Starting POS ledger at http://{host}:{port} (validator: {validator})");

    let state = web::Data::new(AppState::new(MiningConfig {
        validator,
        ..MiningConfig::default()
    }));
    let app_state = state.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    // Service stop: clear both mining flags and cancel their timers.
    state.engine.shutdown();
    Ok(())
}
