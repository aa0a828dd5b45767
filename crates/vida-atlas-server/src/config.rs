use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Upper bound a client may request as page size.
    pub max_page_size: u64,
    /// How long a filter options snapshot stays valid.
    pub filters_cache_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_page_size: 100,
            filters_cache_ttl: Duration::from_secs(300),
        }
    }
}
