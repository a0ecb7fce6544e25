use std::sync::Arc;

use crate::services::{
    news_service::NewsService,
    store::{FavoriteStore, NewsStore},
};

#[derive(Clone)]
pub struct AppState {
    pub news_service: Arc<NewsService>,
    pub news: Arc<NewsStore>,
    pub favorites: Arc<FavoriteStore>,
}

impl AppState {
    pub fn new(news_service: NewsService) -> Self {
        Self {
            news_service: Arc::new(news_service),
            news: Arc::new(NewsStore::default()),
            favorites: Arc::new(FavoriteStore::default()),
        }
    }
}
