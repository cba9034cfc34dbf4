use std::sync::Arc;

use mood_recs::{
    config::Config,
    db::{
        create_pool, create_redis_client, run_migrations, Cache, FileProfileStore,
        PgProfileStore, ProfileStore,
    },
    routes::{create_router, AppState},
    services::{
        history::RandomSelector, providers::YouTubeProvider, query_mapper::QueryMapper,
        RecommendationEngine, RecommendationSettings,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mood_recs=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let (cache, cache_handle) = match &config.redis_url {
        Some(url) => {
            let (cache, handle) = Cache::new(create_redis_client(url)?).await;
            tracing::info!("Caching search results in Redis");
            (Some(cache), Some(handle))
        }
        None => (None, None),
    };

    let provider = Arc::new(YouTubeProvider::new(
        cache,
        config.youtube_api_key.clone(),
        config.youtube_api_url.clone(),
        config.search_cache_ttl_secs,
    ));

    let store: Arc<dyn ProfileStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            run_migrations(&pool).await?;
            tracing::info!("Using Postgres profile store");
            Arc::new(PgProfileStore::new(pool))
        }
        None => Arc::new(FileProfileStore::new(&config.profile_dir).await?),
    };

    let selector = match config.rng_seed {
        Some(seed) => RandomSelector::seeded(seed),
        None => RandomSelector::from_entropy(),
    };

    let engine = RecommendationEngine::new(
        provider,
        store,
        RecommendationSettings::from_config(&config),
    )
    .with_selector(Arc::new(selector))
    .with_query_mapper(QueryMapper::with_fallback(config.fallback_query.clone()));

    let app = create_router(Arc::new(AppState::new(engine)));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_handle {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
