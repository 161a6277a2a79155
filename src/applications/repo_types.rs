use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Lifecycle stage of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Approved,
    Rejected,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Status::Pending),
            "approved" => Ok(Status::Approved),
            "rejected" => Ok(Status::Rejected),
            other => Err(other.to_string()),
        }
    }
}

/// Row as stored in `applications`; status is still raw text here.
#[derive(Debug, FromRow)]
pub struct ApplicationRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub loan_amount: i32,
    pub tenure: Option<i32>,
    pub employment_status: Option<String>,
    pub reason: Option<String>,
    pub employment_address: Option<String>,
    pub purpose: String,
    pub status: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Application {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub loan_amount: i32,
    pub tenure: Option<i32>,
    pub employment_status: Option<String>,
    pub reason: Option<String>,
    pub employment_address: Option<String>,
    pub purpose: String,
    pub status: Status,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = String;

    fn try_from(r: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: r.status.parse()?,
            id: r.id,
            name: r.name,
            email: r.email,
            loan_amount: r.loan_amount,
            tenure: r.tenure,
            employment_status: r.employment_status,
            reason: r.reason,
            employment_address: r.employment_address,
            purpose: r.purpose,
            created_at: r.created_at,
        })
    }
}

/// Applicant-supplied fields of a new application.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub name: String,
    pub email: String,
    pub loan_amount: i32,
    pub tenure: Option<i32>,
    pub employment_status: Option<String>,
    pub reason: Option<String>,
    pub employment_address: Option<String>,
    pub purpose: String,
}

/// Aggregate counts over every stored application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_applications: i64,
    pub approved: i64,
    pub rejected: i64,
    pub average_loan: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn status_text_round_trips() {
        for s in [Status::Pending, Status::Approved, Status::Rejected] {
            assert_eq!(s.as_str().parse::<Status>(), Ok(s));
        }
        assert_eq!("APPROVED".parse::<Status>(), Err("APPROVED".to_string()));
    }

    #[test]
    fn row_with_unknown_status_is_refused() {
        let row = ApplicationRow {
            id: 1,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            loan_amount: 1000,
            tenure: None,
            employment_status: None,
            reason: None,
            employment_address: None,
            purpose: "car".into(),
            status: "escalated".into(),
            created_at: datetime!(2024-05-01 10:00 UTC),
        };
        assert_eq!(Application::try_from(row).unwrap_err(), "escalated");
    }

    #[test]
    fn application_serializes_with_column_names() {
        let app = Application {
            id: 7,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            loan_amount: 50_000,
            tenure: Some(12),
            employment_status: Some("employed".into()),
            reason: None,
            employment_address: None,
            purpose: "car".into(),
            status: Status::Approved,
            created_at: datetime!(2024-05-01 10:00 UTC),
        };
        let json = serde_json::to_value(&app).unwrap();
        assert_eq!(json["loan_amount"], 50_000);
        assert_eq!(json["employment_status"], "employed");
        assert_eq!(json["status"], "approved");
        assert_eq!(json["created_at"], "2024-05-01T10:00:00Z");
        assert!(json["reason"].is_null());
    }

    #[test]
    fn statistics_serialize_camel_case() {
        let stats = Statistics {
            total_applications: 2,
            approved: 1,
            rejected: 1,
            average_loan: 100_000.0,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["totalApplications"], 2);
        assert_eq!(json["averageLoan"], 100_000.0);
    }
}
