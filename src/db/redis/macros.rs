/// Returns a cached value for `$key`, or computes it with `$block` and caches it for `$ttl`
/// seconds.
///
/// A failed cache read is logged and treated as a miss; only errors from `$block`
/// propagate. The cache must provide `get_from_cache` and `set_in_background`.
///
/// ```rust,ignore
/// let candidates = cached!(cache, key, 900, self.fetch(query, max_results))?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        match $cache.get_from_cache(&$key).await {
            Ok(Some(cached)) => {
                tracing::debug!(key = %$key, "Cache hit");
                Ok(cached)
            }
            lookup => {
                if let Err(e) = lookup {
                    tracing::warn!(key = %$key, error = %e, "Cache read failed, treating as miss");
                }
                let value = $block.await?;
                $cache.set_in_background(&$key, &value, $ttl);
                Ok(value)
            }
        }
    }};
}
