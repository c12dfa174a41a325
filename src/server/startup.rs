use std::sync::Arc;

use apalis_redis::RedisStorage;
use axum::http::{header, HeaderValue, Method};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;

use crate::server::{
    config::Config,
    error::{config::ConfigError, Error},
    model::{
        app::AppState,
        session::RedisSessionCache,
        worker::{RegistrationMessage, REGISTRATION_QUEUE},
    },
    service::seed::SeedService,
    util::token::SessionTokenCodec,
    worker::handle_message,
};

/// Connect to the database, run migrations and the seed pass
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;
    SeedService::new(&db).run().await?;

    Ok(db)
}

/// Connect to Redis for the session cache
pub async fn connect_to_session_cache(config: &Config) -> Result<RedisSessionCache, Error> {
    use fred::prelude::*;

    let redis_config = Config::from_url(&config.redis_url)?;
    let pool = Pool::new(redis_config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    Ok(RedisSessionCache::new(pool))
}

/// Start the registration consumer on its own task
pub async fn start_workers(config: &Config) -> Result<RedisStorage<RegistrationMessage>, Error> {
    use apalis::prelude::*;

    let conn = apalis_redis::connect(config.redis_url.to_string()).await?;
    let storage = RedisStorage::new_with_config(
        conn,
        apalis_redis::Config::default().set_namespace(REGISTRATION_QUEUE),
    );
    let workers = config.workers;

    let storage_clone = storage.clone();

    let _ = tokio::spawn(async move {
        WorkerBuilder::new("finanapp-worker")
            .concurrency(workers)
            .backend(storage_clone)
            .build_fn(handle_message)
            .run()
            .await;
    });

    tracing::info!("Listening for messages on {}", REGISTRATION_QUEUE);

    Ok(storage)
}

/// CORS for the single configured front-end origin, with credentials
pub fn build_cors(config: &Config) -> Result<CorsLayer, Error> {
    let origin = HeaderValue::from_str(&config.allowed_origin)
        .map_err(|_| ConfigError::InvalidOrigin(config.allowed_origin.clone()))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

/// Shared handles built once at startup
pub async fn build_state(config: &Config) -> Result<AppState, Error> {
    let db = connect_to_database(config).await?;
    let session_cache = connect_to_session_cache(config).await?;

    Ok(AppState {
        db,
        session_cache: Arc::new(session_cache),
        token_codec: SessionTokenCodec::new(&config.jwt_secret),
    })
}
