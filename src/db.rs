use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::AppConfig;

const CREATE_APPLICATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS applications (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    loan_amount INTEGER NOT NULL,
    tenure INTEGER,
    employment_status VARCHAR(255),
    reason TEXT,
    employment_address TEXT,
    purpose TEXT NOT NULL,
    status VARCHAR(20) NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")?;
    Ok(db)
}

/// Creates the `applications` table if it does not exist yet.
pub async fn ensure_schema(db: &PgPool) -> anyhow::Result<()> {
    sqlx::query(CREATE_APPLICATIONS)
        .execute(db)
        .await
        .context("create applications table")?;
    info!("database table \"applications\" ready");
    Ok(())
}
