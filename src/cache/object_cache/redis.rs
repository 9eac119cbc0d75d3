use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("redis", RedisObjectCache);

/// Shared Redis cache, used when several server instances must see the same
/// sessions and pending password-reset codes.
pub struct RedisObjectCache {
    client: redis::Client,
    key_prefix: String,
    default_ttl: u64,
}

impl RedisObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let redis = &config.cache.redis;

        let client = redis::Client::open(redis.url.as_str())
            .map_err(|e| format!("Invalid Redis URL '{}': {e}", redis.url))?;

        // Probe synchronously so startup can fall back to the in-memory cache
        let pong = client
            .get_connection()
            .and_then(|mut conn| redis::cmd("PING").query::<String>(&mut conn))
            .map_err(|e| {
                error!("Redis at {} is unreachable: {}", redis.url, e);
                format!("Redis ping failed: {e}")
            })?;
        debug!(
            "Redis answered {} (prefix '{}', default TTL {}s)",
            pong, redis.key_prefix, config.cache.default_ttl
        );

        Ok(Self {
            client,
            key_prefix: redis.key_prefix.clone(),
            default_ttl: config.cache.default_ttl,
        })
    }

    async fn connection(&self) -> Option<MultiplexedConnection> {
        match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Redis connection failed: {}", e);
                None
            }
        }
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

/// Redis rejects `SETEX` with 0, so a zero TTL means "use the default"
fn effective_ttl(requested: u64, default_ttl: u64) -> u64 {
    match (requested, default_ttl) {
        (0, 0) => 1,
        (0, default) => default,
        (ttl, _) => ttl,
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let Some(mut conn) = self.connection().await else {
            return CacheResult::ExistsButNoValue;
        };

        match conn.get::<_, Option<String>>(self.namespaced(key)).await {
            Ok(Some(value)) => CacheResult::Found(value),
            Ok(None) => CacheResult::NotFound,
            Err(e) => {
                error!("Redis GET '{}' failed: {}", key, e);
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        let ttl = effective_ttl(ttl, self.default_ttl);
        if let Err(e) = conn
            .set_ex::<_, _, ()>(self.namespaced(&key), value, ttl)
            .await
        {
            error!("Redis SETEX '{}' failed: {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        match conn.del::<_, i32>(self.namespaced(key)).await {
            Ok(0) => debug!("Redis DEL '{}': nothing to remove", key),
            Ok(_) => {}
            Err(e) => error!("Redis DEL '{}' failed: {}", key, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effective_ttl;

    #[test]
    fn zero_ttl_falls_back_to_the_default() {
        assert_eq!(effective_ttl(0, 3600), 3600);
        assert_eq!(effective_ttl(300, 3600), 300);
        assert_eq!(effective_ttl(0, 0), 1);
    }
}
