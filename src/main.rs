mod handlers;
mod models;
mod routes;
mod services;
mod utils;

use axum::serve;
use routes::{init_tracing, make_app};
use std::error::Error;
use tokio::net::TcpListener;
use tracing::info;
use utils::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = Config::init()?;
    info!("Configuration loaded successfully");
    let app = make_app(&config)?;

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);

    serve(listener, app).await?;
    Ok(())
}
