use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    favorite::{AddFavorite, FavoriteNewsItem},
    news::{NewsItem, NewsItemPayload},
};

/// Locally saved news items, keyed by a sequential id.
#[derive(Default)]
pub struct NewsStore {
    items: RwLock<Vec<NewsItem>>,
}

impl NewsStore {
    pub async fn all(&self) -> Vec<NewsItem> {
        self.items.read().await.clone()
    }

    pub async fn get(&self, id: i32) -> Option<NewsItem> {
        self.items.read().await.iter().find(|n| n.id == id).cloned()
    }

    /// Assigns the next id (one past the current maximum) and stamps `saved_at`.
    pub async fn add(&self, payload: NewsItemPayload) -> NewsItem {
        let mut items = self.items.write().await;
        let id = items.iter().map(|n| n.id).max().map_or(1, |max| max + 1);
        let item = NewsItem {
            id,
            title: payload.title,
            description: payload.description,
            url: payload.url,
            source: payload.source,
            published_at: payload.published_at,
            saved_at: Utc::now(),
        };
        items.push(item.clone());
        item
    }

    /// Replaces title, description and url. Returns false for an unknown id.
    pub async fn update(&self, id: i32, payload: NewsItemPayload) -> bool {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|n| n.id == id) {
            Some(item) => {
                item.title = payload.title;
                item.description = payload.description;
                item.url = payload.url;
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, id: i32) -> bool {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|n| n.id != id);
        items.len() != before
    }
}

#[derive(Default)]
pub struct FavoriteStore {
    items: RwLock<Vec<FavoriteNewsItem>>,
}

impl FavoriteStore {
    pub async fn by_user(&self, telegram_user_id: &str) -> Vec<FavoriteNewsItem> {
        self.items
            .read()
            .await
            .iter()
            .filter(|f| f.telegram_user_id == telegram_user_id)
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: Uuid) -> Option<FavoriteNewsItem> {
        self.items.read().await.iter().find(|f| f.id == id).cloned()
    }

    pub async fn add(&self, payload: AddFavorite) -> FavoriteNewsItem {
        let item = FavoriteNewsItem::new(payload);
        self.items.write().await.push(item.clone());
        item
    }

    pub async fn update_note(&self, id: Uuid, note: String) -> bool {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|f| f.id == id) {
            Some(item) => {
                item.note = note;
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|f| f.id != id);
        items.len() != before
    }
}
