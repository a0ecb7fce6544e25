use async_trait::async_trait;
use http::header::USER_AGENT;
use reqwest::Client;
use tracing::debug;

use crate::{
    models::{error::FetchError, news::NewsApiResponse},
    utils::config::Config,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlinesQuery {
    pub country: String,
    pub category: String,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub sort_by: String,
}

/// Upstream source of news envelopes.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<NewsApiResponse, FetchError>;

    async fn everything(&self, query: &SearchQuery) -> Result<NewsApiResponse, FetchError>;
}

/// Client for a NewsAPI compatible service.
#[derive(Clone)]
pub struct NewsApiClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    user_agent: String,
}

impl NewsApiClient {
    pub fn new(
        http_client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Builds a client whose outbound calls give up after `config.request_timeout`.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::new(
            http_client,
            config.news_api_base_url.as_str(),
            config.news_api_key.as_str(),
            config.user_agent.as_str(),
        ))
    }

    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<NewsApiResponse, FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, ?params, "Fetching from news API");

        let res = self
            .http_client
            .get(&url)
            .query(params)
            .query(&[("apiKey", self.api_key.as_str())])
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = res.text().await?;
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        let envelope: NewsApiResponse = serde_json::from_str(&body)?;
        debug!(
            status = %envelope.status,
            total = envelope.total_results,
            count = envelope.articles.len(),
            "News API response parsed"
        );
        Ok(envelope)
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<NewsApiResponse, FetchError> {
        let page_size = query.page_size.to_string();
        self.fetch(
            "top-headlines",
            &[
                ("country", query.country.as_str()),
                ("category", query.category.as_str()),
                ("pageSize", page_size.as_str()),
            ],
        )
        .await
    }

    async fn everything(&self, query: &SearchQuery) -> Result<NewsApiResponse, FetchError> {
        let mut params = vec![("q", query.query.as_str()), ("sortBy", query.sort_by.as_str())];
        if let Some(from) = query.from.as_deref().filter(|d| !d.trim().is_empty()) {
            params.push(("from", from));
        }
        if let Some(to) = query.to.as_deref().filter(|d| !d.trim().is_empty()) {
            params.push(("to", to));
        }
        self.fetch("everything", &params).await
    }
}
