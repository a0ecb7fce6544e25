use std::{str::FromStr, time::Duration};

use chrono::TimeDelta;

use crate::models::error::ConfigError;

#[derive(Debug, Clone)]
pub struct Config {
    pub news_api_key: String,
    pub news_api_base_url: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub cache_ttl: TimeDelta,
    pub bind_addr: String,
}

impl Config {
    pub fn init() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let news_api_key = lookup("NEWS_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("NEWS_API_KEY"))?;

        Ok(Config {
            news_api_key,
            news_api_base_url: lookup("NEWS_API_BASE_URL")
                .unwrap_or_else(|| "https://newsapi.org/v2".to_string())
                .trim_end_matches('/')
                .to_string(),
            user_agent: lookup("NEWS_API_USER_AGENT")
                .unwrap_or_else(|| "NewsDesk/1.0".to_string()),
            request_timeout: Duration::from_secs(positive_or(
                &lookup,
                "REQUEST_TIMEOUT_SECONDS",
                10u64,
            )?),
            cache_ttl: cache_ttl(&lookup)?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:3000".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn positive_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + Default + ToString,
{
    let value = parse_or(lookup, name, default)?;
    if value <= T::default() {
        return Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn cache_ttl<F>(lookup: &F) -> Result<TimeDelta, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let minutes = positive_or(lookup, "CACHE_TTL_MINUTES", 30i64)?;
    TimeDelta::try_minutes(minutes).ok_or(ConfigError::Invalid {
        name: "CACHE_TTL_MINUTES",
        value: minutes.to_string(),
    })
}
