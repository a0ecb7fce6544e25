//! Scripted `NewsSource` used by service and router tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use http::StatusCode;
use tokio::sync::Barrier;

use crate::{
    models::{
        error::FetchError,
        news::{Article, ArticleSource, NewsApiResponse},
    },
    services::news_api::{HeadlinesQuery, NewsSource, SearchQuery},
};

#[derive(Clone)]
pub enum Scripted {
    Envelope(NewsApiResponse),
    Fail,
}

impl Scripted {
    fn to_result(&self) -> Result<NewsApiResponse, FetchError> {
        match self {
            Scripted::Envelope(envelope) => Ok(envelope.clone()),
            Scripted::Fail => Err(FetchError::Status(StatusCode::BAD_GATEWAY)),
        }
    }
}

/// Answers headline requests per country; unscripted countries get an empty
/// "ok" envelope.
#[derive(Default)]
pub struct ScriptedSource {
    headlines: Mutex<HashMap<String, Scripted>>,
    search: Mutex<Option<Scripted>>,
    headline_calls: Mutex<Vec<HeadlinesQuery>>,
    search_calls: Mutex<Vec<SearchQuery>>,
    barrier: Option<Arc<Barrier>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds every headline fetch until `n` of them are in flight.
    pub fn with_barrier(mut self, n: usize) -> Self {
        self.barrier = Some(Arc::new(Barrier::new(n)));
        self
    }

    pub fn script(&self, country: &str, response: Scripted) {
        self.headlines
            .lock()
            .unwrap()
            .insert(country.to_string(), response);
    }

    pub fn script_search(&self, response: Scripted) {
        *self.search.lock().unwrap() = Some(response);
    }

    pub fn headline_calls(&self) -> Vec<HeadlinesQuery> {
        self.headline_calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> Vec<SearchQuery> {
        self.search_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NewsSource for ScriptedSource {
    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<NewsApiResponse, FetchError> {
        self.headline_calls.lock().unwrap().push(query.clone());
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        let scripted = self.headlines.lock().unwrap().get(&query.country).cloned();
        match scripted {
            Some(response) => response.to_result(),
            None => Ok(envelope("ok", &[])),
        }
    }

    async fn everything(&self, query: &SearchQuery) -> Result<NewsApiResponse, FetchError> {
        self.search_calls.lock().unwrap().push(query.clone());
        let scripted = self.search.lock().unwrap().clone();
        match scripted {
            Some(response) => response.to_result(),
            None => Ok(envelope("ok", &[])),
        }
    }
}

/// Builds an envelope of articles given as `(title, urlToImage)` pairs.
pub fn envelope(status: &str, articles: &[(&str, &str)]) -> NewsApiResponse {
    NewsApiResponse {
        status: status.to_string(),
        total_results: articles.len() as i64,
        articles: articles
            .iter()
            .map(|(title, image)| Article {
                source: ArticleSource {
                    id: None,
                    name: "Test Wire".to_string(),
                },
                author: None,
                title: title.to_string(),
                description: Some(format!("About {title}")),
                url: "http://x".to_string(),
                url_to_image: Some(image.to_string()),
                published_at: "2024-01-01T00:00:00Z".parse().ok(),
                content: None,
            })
            .collect(),
    }
}
