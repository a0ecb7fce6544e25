use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteNewsItem {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub note: String,
    pub saved_at: DateTime<Utc>,
    pub telegram_user_id: String,
}

impl FavoriteNewsItem {
    pub fn new(payload: AddFavorite) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: payload.title,
            url: payload.url,
            note: String::new(),
            saved_at: Utc::now(),
            telegram_user_id: payload.telegram_user_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavorite {
    pub title: String,
    pub url: String,
    pub telegram_user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFavoriteNote {
    #[serde(default)]
    pub note: String,
}
