//! Object cache layer.
//!
//! Backends register themselves at load time through
//! [`declare_object_cache_plugin!`](crate::declare_object_cache_plugin) and are
//! selected by name from `cache.type` during startup.

pub mod object_cache;
pub mod register;

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// The backend answered with an error, the key state is unknown
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// `ttl` in seconds, 0 uses the configured default
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
}

/// Registers a cache backend under `$name`.
///
/// `$ty` must provide `fn new() -> Result<Self, String>`.
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        <$ty>::new()
                            .map(|cache| Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                            .map_err($crate::errors::GradeSysError::cache_connection)
                    })
                }),
            );
        }
    };
}
