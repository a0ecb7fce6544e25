pub mod favorites;
pub mod news;

use axum::{response::IntoResponse, routing::get, Json, Router};
use http::StatusCode;
use serde_json::json;
use std::{error::Error, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt, Registry};

use crate::{
    routes::{favorites::favorite_routes, news::news_routes},
    services::{news_api::NewsApiClient, news_service::NewsService},
    utils::{config::Config, state::AppState},
};

pub fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let level = match log_level.as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let filter = filter::Targets::new()
        .with_target("tower_http::trace::on_response", Level::TRACE)
        .with_target("tower_http::trace::on_request", Level::TRACE)
        .with_target("tower_http::trace::make_span", Level::DEBUG)
        .with_target("axum::rejection", Level::TRACE)
        .with_target(env!("CARGO_PKG_NAME"), level)
        .with_default(Level::INFO);

    let tracing_layer = tracing_subscriber::fmt::layer();

    Registry::default().with(tracing_layer).with(filter).init();
}

pub fn make_app(config: &Config) -> Result<Router, Box<dyn Error>> {
    info!("Initializing application...");

    let news_api = NewsApiClient::from_config(config)?;
    info!(base_url = %config.news_api_base_url, "External clients initialized successfully");

    let news_service = NewsService::new(Arc::new(news_api), config.cache_ttl);
    let app = build_router(AppState::new(news_service));
    info!("Application initialized successfully");

    Ok(app)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .nest("/api/news", news_routes())
        .nest("/api/favorites", favorite_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"message": "ok"}))).into_response()
}
