use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::favorites::{
        add_favorite, delete_favorite, get_favorite, get_user_favorites, update_favorite_note,
    },
    utils::state::AppState,
};

pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(add_favorite))
        .route("/user/{telegram_user_id}", get(get_user_favorites))
        .route(
            "/{id}",
            get(get_favorite)
                .put(update_favorite_note)
                .delete(delete_favorite),
        )
}
