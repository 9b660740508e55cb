use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::StoreConfig;
use crate::error::Result;

pub async fn create_pool(config: &StoreConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    Ok(pool)
}
