pub mod news_api;
pub mod news_service;
pub mod store;

#[cfg(test)]
pub mod fake_source;
