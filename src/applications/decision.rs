use super::repo_types::Status;

/// Largest loan amount that is still auto-approved.
pub const APPROVAL_LIMIT: i32 = 100_000;

/// Auto-decision for a requested amount: anything above the limit is rejected.
pub fn decide(loan_amount: i32) -> Status {
    if loan_amount > APPROVAL_LIMIT {
        Status::Rejected
    } else {
        Status::Approved
    }
}
