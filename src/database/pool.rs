use crate::config::Config;
use crate::error::{Error, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};

pub async fn create_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| Error::Config("DATABASE_URL is not configured".to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| Error::Internal(format!("Failed to run migrations: {}", e)))
}

/// Connects and migrates when `DATABASE_URL` is set. Otherwise returns `None` only if
/// `ALLOW_IN_MEMORY_STORE` opts into non-persistent stores.
pub async fn connect_store(config: &Config) -> Result<Option<PgPool>> {
    if config.database_url.is_some() {
        let pool = create_pool(config).await?;
        run_migrations(&pool).await?;
        return Ok(Some(pool));
    }

    if !config.allow_in_memory_store {
        return Err(Error::Config(
            "DATABASE_URL is not configured; set ALLOW_IN_MEMORY_STORE=true to run without persistence"
                .to_string(),
        ));
    }

    tracing::warn!("DATABASE_URL is not set; sessions and submissions are kept in memory");
    Ok(None)
}
