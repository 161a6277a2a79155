use std::sync::Mutex;

use axum::async_trait;
use time::OffsetDateTime;

use super::decision::decide;
use super::repo::{ApplicationStore, StoreResult};
use super::repo_types::{Application, NewApplication, Statistics, Status};

/// In-process stand-in for `PgApplicationStore` used by the handler tests.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Application>>,
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn submit(&self, new: NewApplication) -> StoreResult<Application> {
        let mut rows = self.rows.lock().unwrap();
        let mut app = Application {
            id: rows.len() as i32 + 1,
            name: new.name,
            email: new.email,
            loan_amount: new.loan_amount,
            tenure: new.tenure,
            employment_status: new.employment_status,
            reason: new.reason,
            employment_address: new.employment_address,
            purpose: new.purpose,
            status: Status::Pending,
            created_at: OffsetDateTime::now_utc(),
        };
        app.status = decide(app.loan_amount);
        rows.push(app.clone());
        Ok(app)
    }

    async fn statistics(&self) -> StoreResult<Statistics> {
        let rows = self.rows.lock().unwrap();
        let count = |s: Status| rows.iter().filter(|a| a.status == s).count() as i64;
        let average_loan = if rows.is_empty() {
            0.0
        } else {
            rows.iter().map(|a| a.loan_amount as f64).sum::<f64>() / rows.len() as f64
        };
        Ok(Statistics {
            total_applications: rows.len() as i64,
            approved: count(Status::Approved),
            rejected: count(Status::Rejected),
            average_loan,
        })
    }

    async fn list(&self) -> StoreResult<Vec<Application>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }
}
