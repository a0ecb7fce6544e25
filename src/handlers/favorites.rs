use crate::{
    models::{
        error::Error,
        favorite::{AddFavorite, UpdateFavoriteNote},
    },
    utils::state::AppState,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use http::{header, StatusCode};
use tracing::info;
use uuid::Uuid;

fn not_found(id: Uuid) -> Error {
    Error::new(StatusCode::NOT_FOUND, &format!("Favorite {id} not found"))
}

pub async fn get_user_favorites(
    Path(telegram_user_id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let favorites = state.favorites.by_user(&telegram_user_id).await;
    (StatusCode::OK, Json(favorites))
}

pub async fn get_favorite(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let item = state.favorites.get(id).await.ok_or_else(|| not_found(id))?;
    Ok((StatusCode::OK, Json(item)))
}

pub async fn add_favorite(
    State(state): State<AppState>,
    Json(payload): Json<AddFavorite>,
) -> impl IntoResponse {
    let item = state.favorites.add(payload).await;
    info!(id = %item.id, user = %item.telegram_user_id, "Favorite added");
    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/favorites/{}", item.id))],
        Json(item),
    )
}

pub async fn update_favorite_note(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateFavoriteNote>,
) -> Result<StatusCode, Error> {
    if state.favorites.update_note(id, payload.note).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

pub async fn delete_favorite(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, Error> {
    if state.favorites.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
