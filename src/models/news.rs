use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news item as this service stores and returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub published_at: Option<DateTime<Utc>>,
    pub saved_at: DateTime<Utc>,
}

impl NewsItem {
    /// Normalizes an upstream article. `source` carries the article's image url.
    pub fn from_article(article: &Article, saved_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            title: article.title.clone(),
            description: article.description.clone().unwrap_or_default(),
            url: article.url.clone(),
            source: article.url_to_image.clone().unwrap_or_default(),
            published_at: article.published_at,
            saved_at,
        }
    }
}

/// Request body for creating or updating a stored news item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsItemPayload {
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_results: i64,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl NewsApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: ArticleSource,
    pub author: Option<String>,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}
