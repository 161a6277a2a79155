use axum::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::decision::decide;
use super::repo_types::{Application, ApplicationRow, NewApplication, Statistics, Status};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("unknown application status {0:?}")]
    UnknownStatus(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for loan applications.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Records a new application and its decision; returns the decided row.
    async fn submit(&self, new: NewApplication) -> StoreResult<Application>;
    async fn statistics(&self) -> StoreResult<Statistics>;
    /// Every application, newest first.
    async fn list(&self) -> StoreResult<Vec<Application>>;
    async fn close(&self) {}
}

// Casts keep rows readable from tables created with `TIMESTAMP` and a nullable status.
const APPLICATION_COLUMNS: &str = "id, name, email, loan_amount, tenure, employment_status, \
     reason, employment_address, purpose, COALESCE(status, 'pending') AS status, \
     created_at::timestamptz AS created_at";

#[derive(Clone)]
pub struct PgApplicationStore {
    db: PgPool,
}

impl PgApplicationStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn into_application(row: ApplicationRow) -> StoreResult<Application> {
    Application::try_from(row).map_err(StoreError::UnknownStatus)
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn submit(&self, new: NewApplication) -> StoreResult<Application> {
        let mut tx = self.db.begin().await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO applications
                (name, email, loan_amount, tenure, employment_status, reason, employment_address, purpose, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(new.loan_amount)
        .bind(new.tenure)
        .bind(&new.employment_status)
        .bind(&new.reason)
        .bind(&new.employment_address)
        .bind(&new.purpose)
        .bind(Status::Pending.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let status = decide(new.loan_amount);
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "UPDATE applications SET status = $1 WHERE id = $2 RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(status.as_str())
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(id, %status, "application decided");
        into_application(row)
    }

    async fn statistics(&self) -> StoreResult<Statistics> {
        let (total_applications, approved, rejected, average_loan) =
            sqlx::query_as::<_, (i64, i64, i64, f64)>(
                r#"
                SELECT COUNT(*),
                       COUNT(*) FILTER (WHERE status = 'approved'),
                       COUNT(*) FILTER (WHERE status = 'rejected'),
                       COALESCE(AVG(loan_amount), 0)::float8
                  FROM applications
                "#,
            )
            .fetch_one(&self.db)
            .await?;

        Ok(Statistics {
            total_applications,
            approved,
            rejected,
            average_loan,
        })
    }

    async fn list(&self) -> StoreResult<Vec<Application>> {
        let rows = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(into_application).collect()
    }

    async fn close(&self) {
        self.db.close().await;
    }
}
