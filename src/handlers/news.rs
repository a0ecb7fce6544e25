use crate::{
    models::{error::Error, news::NewsItemPayload},
    services::news_api::SearchQuery,
    utils::state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use http::{header, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

const DEFAULT_COUNTRY: &str = "ua";
const DEFAULT_CATEGORY: &str = "technology";
const DEFAULT_PAGE_SIZE: i64 = 5;
const DEFAULT_SORT_BY: &str = "publishedAt";

fn not_found(id: i32) -> Error {
    Error::new(StatusCode::NOT_FOUND, &format!("News item {id} not found"))
}

pub async fn get_all_news(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.news.all().await))
}

pub async fn get_news_by_id(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let item = state.news.get(id).await.ok_or_else(|| not_found(id))?;
    Ok((StatusCode::OK, Json(item)))
}

pub async fn create_news(
    State(state): State<AppState>,
    Json(payload): Json<NewsItemPayload>,
) -> impl IntoResponse {
    let item = state.news.add(payload).await;
    info!(id = item.id, "News item saved");
    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/news/{}", item.id))],
        Json(item),
    )
}

pub async fn update_news(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(payload): Json<NewsItemPayload>,
) -> Result<StatusCode, Error> {
    if state.news.update(id, payload).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

pub async fn delete_news(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<StatusCode, Error> {
    if state.news.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicNewsQuery {
    country: Option<String>,
    category: Option<String>,
    page_size: Option<i64>,
}

pub async fn get_public_news(
    State(state): State<AppState>,
    Query(params): Query<PublicNewsQuery>,
) -> Result<impl IntoResponse, Error> {
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if !(1..=100).contains(&page_size) {
        return Err(Error::bad_request("pageSize must be between 1 and 100"));
    }
    let country = params.country.unwrap_or_else(|| DEFAULT_COUNTRY.to_string());
    let category = params
        .category
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    info!(%country, %category, page_size, "Public news requested");
    let articles = state
        .news_service
        .top_headlines_with_fallback(&country, &category, page_size as u32)
        .await;

    Ok((StatusCode::OK, Json(json!({ "articles": articles }))))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    q: Option<String>,
    from: Option<String>,
    to: Option<String>,
    sort_by: Option<String>,
}

pub async fn search_news(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, Error> {
    let query = params
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| Error::bad_request("Query parameter 'q' is required"))?;

    let search = SearchQuery {
        query,
        from: params.from,
        to: params.to,
        sort_by: params
            .sort_by
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SORT_BY.to_string()),
    };

    let results = state.news_service.search(&search).await;
    if results.is_empty() {
        return Err(Error::new(StatusCode::NOT_FOUND, "No news found for this query"));
    }

    Ok((StatusCode::OK, Json(json!({ "articles": results }))))
}
