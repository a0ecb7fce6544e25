use chrono::{DateTime, Duration, Utc};

#[derive(Clone, Debug)]
pub struct CacheEntry<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, fetched_at: DateTime<Utc>) -> Self {
        Self { value, fetched_at }
    }

    /// Fresh while strictly younger than `ttl`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.fetched_at < ttl
    }
}

pub fn headlines_key(country: &str, category: &str, page_size: u32) -> String {
    format!("{country}_{category}_{page_size}")
}
