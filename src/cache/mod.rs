use redis::{Client, RedisError, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    /// Get a value from cache
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> redis::RedisResult<Option<T>> {
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await?;

        match value {
            Some(v) => {
                let deserialized = serde_json::from_str(&v).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::TypeError,
                        "Deserialization error",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache with a TTL.
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> redis::RedisResult<()> {
        let serialized = serde_json::to_string(value).map_err(|e| {
            redis::RedisError::from((
                redis::ErrorKind::TypeError,
                "Serialization error",
                e.to_string(),
            ))
        })?;

        redis::cmd("SET")
            .arg(key)
            .arg(serialized)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut self.connection.clone())
            .await
    }

    /// Delete multiple keys matching a pattern
    pub async fn delete_pattern(&self, pattern: &str) -> redis::RedisResult<()> {
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut self.connection.clone())
            .await?;

        if !keys.is_empty() {
            let _: () = redis::cmd("DEL")
                .arg(&keys)
                .query_async(&mut self.connection.clone())
                .await?;
        }

        Ok(())
    }

    /// Drop every cached portfolio listing and detail page.
    ///
    /// Failures are logged and swallowed: a stale entry expires on its own TTL.
    pub async fn invalidate_portfolios(&self) {
        if let Err(e) = self.delete_pattern(keys::PORTFOLIO_PATTERN).await {
            tracing::warn!("Cache invalidation failed: {e}");
        }
    }
}

/// Cache key generators
pub mod keys {
    /// Matches every portfolio key below.
    pub const PORTFOLIO_PATTERN: &str = "portfolios:*";

    /// Generate key for one page of the portfolio listing
    pub fn portfolio_list(page: u64, limit: u64) -> String {
        format!("portfolios:list:{page}:{limit}")
    }

    /// Generate key for a single portfolio page
    pub fn portfolio_detail(id: i64) -> String {
        format!("portfolios:detail:{id}")
    }
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub portfolio_list_ttl: Duration,
    pub portfolio_detail_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            portfolio_list_ttl: Duration::from_secs(300),   // 5 minutes
            portfolio_detail_ttl: Duration::from_secs(600), // 10 minutes
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            portfolio_list_ttl: parse_duration_secs("CACHE_TTL_PORTFOLIOS", 300),
            portfolio_detail_ttl: parse_duration_secs("CACHE_TTL_PORTFOLIO_DETAIL", 600),
        }
    }
}

fn parse_duration_secs(env_var: &str, default: u64) -> Duration {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}
