use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::{error, info, warn};

use crate::{
    models::{
        cache::{headlines_key, CacheEntry},
        news::{Article, NewsItem},
    },
    services::news_api::{HeadlinesQuery, NewsSource, SearchQuery},
};

pub const FALLBACK_COUNTRY: &str = "us";
pub const FALLBACK_CATEGORY: &str = "general";

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Cache-aside access to an upstream news source.
///
/// Concurrent misses on the same key are not coalesced: each one fetches and
/// the last store wins.
pub struct NewsService {
    source: Arc<dyn NewsSource>,
    cache: DashMap<String, CacheEntry<Vec<NewsItem>>>,
    ttl: Duration,
    clock: Clock,
}

impl NewsService {
    pub fn new(source: Arc<dyn NewsSource>, ttl: Duration) -> Self {
        Self {
            source,
            cache: DashMap::new(),
            ttl,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub async fn top_headlines(&self, country: &str, category: &str, page_size: u32) -> Vec<NewsItem> {
        let key = headlines_key(country, category, page_size);
        let now = (self.clock)();

        let cached = self
            .cache
            .get(&key)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.value.clone());
        if let Some(articles) = cached {
            info!(cache_key = %key, "Cache hit");
            return articles;
        }

        let query = HeadlinesQuery {
            country: country.to_string(),
            category: category.to_string(),
            page_size,
        };
        let envelope = match self.source.top_headlines(&query).await {
            Ok(envelope) => envelope,
            Err(err) => {
                error!(cache_key = %key, "Top headlines fetch failed: {}", err);
                return Vec::new();
            }
        };

        info!(
            cache_key = %key,
            status = %envelope.status,
            total = envelope.total_results,
            count = envelope.articles.len(),
            "Top headlines fetched"
        );

        let fetched_at = (self.clock)();
        let articles: Vec<NewsItem> = if envelope.is_ok() {
            envelope
                .articles
                .iter()
                .map(|article| NewsItem::from_article(article, fetched_at))
                .collect()
        } else {
            warn!(cache_key = %key, status = %envelope.status, "Upstream reported a non-ok status");
            Vec::new()
        };

        self.cache
            .insert(key, CacheEntry::new(articles.clone(), fetched_at));
        articles
    }

    /// Retries once with the fixed fallback region when the first query is empty.
    pub async fn top_headlines_with_fallback(
        &self,
        country: &str,
        category: &str,
        page_size: u32,
    ) -> Vec<NewsItem> {
        let articles = self.top_headlines(country, category, page_size).await;
        if !articles.is_empty() {
            return articles;
        }

        info!(
            country,
            category, "No headlines, falling back to {}/{}", FALLBACK_COUNTRY, FALLBACK_CATEGORY
        );
        let articles = self
            .top_headlines(FALLBACK_COUNTRY, FALLBACK_CATEGORY, page_size)
            .await;
        if articles.is_empty() {
            warn!("Fallback returned no headlines either");
        }
        articles
    }

    /// Searches everything upstream. Results are never cached.
    pub async fn search(&self, query: &SearchQuery) -> Vec<Article> {
        info!(q = %query.query, sort_by = %query.sort_by, "Searching news");
        match self.source.everything(query).await {
            Ok(envelope) => envelope.articles,
            Err(err) => {
                error!(q = %query.query, "News search failed: {}", err);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fake_source::{envelope, Scripted, ScriptedSource};
    use std::sync::atomic::{AtomicI64, Ordering};

    fn service(source: &Arc<ScriptedSource>) -> NewsService {
        NewsService::new(source.clone(), Duration::minutes(30))
    }

    /// Clock that starts at a fixed instant and is advanced by the test.
    fn manual_clock() -> (Clock, Arc<AtomicI64>) {
        let offset_minutes = Arc::new(AtomicI64::new(0));
        let start = Utc::now();
        let offset = offset_minutes.clone();
        let clock: Clock =
            Arc::new(move || start + Duration::minutes(offset.load(Ordering::SeqCst)));
        (clock, offset_minutes)
    }

    #[tokio::test]
    async fn identical_calls_within_ttl_fetch_once() {
        let source = Arc::new(ScriptedSource::new());
        source.script("ua", Scripted::Envelope(envelope("ok", &[("A", "http://img")])));
        let service = service(&source);

        let first = service.top_headlines("ua", "technology", 5).await;
        let second = service.top_headlines("ua", "technology", 5).await;

        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
        assert_eq!(source.headline_calls().len(), 1);
    }

    #[tokio::test]
    async fn expired_entry_is_fetched_again() {
        let source = Arc::new(ScriptedSource::new());
        source.script("ua", Scripted::Envelope(envelope("ok", &[("A", "http://img")])));
        let (clock, offset) = manual_clock();
        let service = service(&source).with_clock(clock);

        service.top_headlines("ua", "technology", 5).await;
        offset.store(29, Ordering::SeqCst);
        service.top_headlines("ua", "technology", 5).await;
        assert_eq!(source.headline_calls().len(), 1);

        offset.store(31, Ordering::SeqCst);
        service.top_headlines("ua", "technology", 5).await;
        assert_eq!(source.headline_calls().len(), 2);
    }

    #[tokio::test]
    async fn entry_exactly_ttl_old_is_stale() {
        let source = Arc::new(ScriptedSource::new());
        source.script("ua", Scripted::Envelope(envelope("ok", &[("A", "http://img")])));
        let (clock, offset) = manual_clock();
        let service = service(&source).with_clock(clock);

        service.top_headlines("ua", "technology", 5).await;
        offset.store(30, Ordering::SeqCst);
        service.top_headlines("ua", "technology", 5).await;

        assert_eq!(source.headline_calls().len(), 2);
    }

    #[tokio::test]
    async fn different_page_sizes_use_different_entries() {
        let source = Arc::new(ScriptedSource::new());
        source.script("ua", Scripted::Envelope(envelope("ok", &[("A", "http://img")])));
        let service = service(&source);

        service.top_headlines("ua", "technology", 5).await;
        service.top_headlines("ua", "technology", 10).await;

        assert_eq!(source.headline_calls().len(), 2);
    }

    #[tokio::test]
    async fn image_url_is_mapped_to_source() {
        let source = Arc::new(ScriptedSource::new());
        source.script("ua", Scripted::Envelope(envelope("ok", &[("A", "http://img")])));
        let service = service(&source);

        let items = service.top_headlines("ua", "technology", 5).await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "A");
        assert_eq!(items[0].url, "http://x");
        assert_eq!(items[0].source, "http://img");
        assert_eq!(
            items[0].published_at.unwrap().to_rfc3339(),
            "2024-01-01T00:00:00+00:00"
        );
    }

    #[tokio::test]
    async fn error_status_yields_empty_list_and_is_cached() {
        let source = Arc::new(ScriptedSource::new());
        source.script(
            "ua",
            Scripted::Envelope(envelope("error", &[("A", "http://img"), ("B", "http://img2")])),
        );
        let service = service(&source);

        assert!(service.top_headlines("ua", "technology", 5).await.is_empty());
        assert!(service.top_headlines("ua", "technology", 5).await.is_empty());
        assert_eq!(source.headline_calls().len(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_is_not_cached() {
        let source = Arc::new(ScriptedSource::new());
        source.script("ua", Scripted::Fail);
        let service = service(&source);

        assert!(service.top_headlines("ua", "technology", 5).await.is_empty());
        assert!(service.top_headlines("ua", "technology", 5).await.is_empty());
        assert_eq!(source.headline_calls().len(), 2);
    }

    #[tokio::test]
    async fn empty_region_falls_back_to_us_general() {
        let source = Arc::new(ScriptedSource::new());
        source.script("xx", Scripted::Envelope(envelope("ok", &[])));
        source.script("us", Scripted::Envelope(envelope("ok", &[("US", "http://us")])));
        let service = service(&source);

        let items = service.top_headlines_with_fallback("xx", "sports", 7).await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "US");
        let calls = source.headline_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[1],
            HeadlinesQuery {
                country: "us".into(),
                category: "general".into(),
                page_size: 7,
            }
        );
    }

    #[tokio::test]
    async fn non_empty_result_skips_fallback() {
        let source = Arc::new(ScriptedSource::new());
        source.script("ua", Scripted::Envelope(envelope("ok", &[("A", "http://img")])));
        let service = service(&source);

        service.top_headlines_with_fallback("ua", "technology", 5).await;

        assert_eq!(source.headline_calls().len(), 1);
    }

    #[tokio::test]
    async fn double_empty_returns_empty_list() {
        let source = Arc::new(ScriptedSource::new());
        source.script("xx", Scripted::Envelope(envelope("ok", &[])));
        source.script("us", Scripted::Fail);
        let service = service(&source);

        let items = service.top_headlines_with_fallback("xx", "general", 5).await;

        assert!(items.is_empty());
        assert_eq!(source.headline_calls().len(), 2);
    }

    #[tokio::test]
    async fn concurrent_misses_both_fetch() {
        let source = Arc::new(ScriptedSource::new().with_barrier(2));
        source.script("ua", Scripted::Envelope(envelope("ok", &[("A", "http://img")])));
        let (clock, _) = manual_clock();
        let service = service(&source).with_clock(clock);

        let (a, b) = tokio::join!(
            service.top_headlines("ua", "technology", 5),
            service.top_headlines("ua", "technology", 5)
        );

        assert_eq!(a, b);
        assert_eq!(source.headline_calls().len(), 2);
    }

    #[tokio::test]
    async fn search_is_never_cached() {
        let source = Arc::new(ScriptedSource::new());
        source.script_search(Scripted::Envelope(envelope("ok", &[("Found", "http://img")])));
        let service = service(&source);
        let query = SearchQuery {
            query: "rust".into(),
            from: None,
            to: None,
            sort_by: "publishedAt".into(),
        };

        let first = service.search(&query).await;
        service.search(&query).await;

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].title, "Found");
        assert_eq!(source.search_calls().len(), 2);
    }

    #[tokio::test]
    async fn search_failure_yields_empty_list() {
        let source = Arc::new(ScriptedSource::new());
        source.script_search(Scripted::Fail);
        let service = service(&source);
        let query = SearchQuery {
            query: "rust".into(),
            from: Some("2024-01-01".into()),
            to: None,
            sort_by: "relevancy".into(),
        };

        assert!(service.search(&query).await.is_empty());
        assert_eq!(source.search_calls(), vec![query]);
    }
}
