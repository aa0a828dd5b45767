#![forbid(unsafe_code)]
//! HTTP surface of the species catalog.
//!
//! Each request is handled independently; the only shared mutable state
//! is the filter options cache. Listing reads degrade to an empty page on
//! store failure, write paths surface their errors.

mod config;
mod filter_options;
mod http;

pub use config::ServerConfig;
pub use filter_options::{compute_filter_options, FilterOptionsCache};

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::sync::Mutex;
use vida_atlas_store::SpeciesStore;

pub const CRATE_NAME: &str = "vida-atlas-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SpeciesStore>,
    pub config: Arc<ServerConfig>,
    pub filters_cache: Arc<Mutex<FilterOptionsCache>>,
}

impl AppState {
    #[must_use]
    pub fn new(store: SpeciesStore, config: ServerConfig) -> Self {
        let filters_cache = FilterOptionsCache::new(config.filters_cache_ttl);
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
            filters_cache: Arc::new(Mutex::new(filters_cache)),
        }
    }
}

#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(http::health))
        .route(
            "/api/species",
            get(http::list_species).post(http::create_species),
        )
        .route("/api/species/filters", get(http::filter_options))
        .route("/api/admin/moderate", post(http::moderate_species))
        .fallback(http::not_found)
        .with_state(state)
}
