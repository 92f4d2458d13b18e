//! Centralized configuration (environment variables + defaults).

use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {} value '{}': {}, using default", key, raw, e);
            default
        }),
        None => default,
    }
}

/// Address the API server binds to.
pub fn listen_addr() -> String {
    var("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string())
}

/// Postgres URL for the KV store. When unset, the server keeps data in memory.
pub fn database_url() -> Option<String> {
    var("DATABASE_URL")
}

/// REST key for the place-search provider. Place search is disabled without it.
pub fn kakao_api_key() -> Option<String> {
    var("KAKAO_REST_API_KEY")
}

pub fn kakao_api_base_url() -> String {
    var("KAKAO_API_BASE_URL").unwrap_or_else(|| "https://dapi.kakao.com".to_string())
}

/// Base URL of the restaurant-listing endpoint polled by the search controller.
pub fn restaurants_api_url() -> String {
    var("RESTAURANTS_API_URL").unwrap_or_else(|| "http://localhost:8081".to_string())
}

pub fn search_poll_interval_ms() -> u64 {
    parse_or("SEARCH_POLL_INTERVAL_MS", 1000)
}

/// Total attempts, including the first one. At least 1.
pub fn search_poll_max_attempts() -> u32 {
    parse_or::<u32>("SEARCH_POLL_MAX_ATTEMPTS", 10).max(1)
}
