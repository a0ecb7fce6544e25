use axum::{routing::get, Router};

use crate::{
    handlers::news::{
        create_news, delete_news, get_all_news, get_news_by_id, get_public_news, search_news,
        update_news,
    },
    utils::state::AppState,
};

pub fn news_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_news).post(create_news))
        .route("/public", get(get_public_news))
        .route("/search", get(search_news))
        .route(
            "/{id}",
            get(get_news_by_id).put(update_news).delete(delete_news),
        )
}
