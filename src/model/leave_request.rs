use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Leave categories offered by the request form. The wire strings double as
/// the stored column values.
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    sqlx::Type,
    strum::Display,
    strum::EnumString,
    ToSchema,
)]
pub enum LeaveType {
    #[serde(rename = "Sick Leave")]
    #[sqlx(rename = "Sick Leave")]
    #[strum(serialize = "Sick Leave")]
    Sick,
    #[serde(rename = "Casual Leave")]
    #[sqlx(rename = "Casual Leave")]
    #[strum(serialize = "Casual Leave")]
    Casual,
    #[serde(rename = "Earned Leave")]
    #[sqlx(rename = "Earned Leave")]
    #[strum(serialize = "Earned Leave")]
    Earned,
    #[serde(rename = "Maternity Leave")]
    #[sqlx(rename = "Maternity Leave")]
    #[strum(serialize = "Maternity Leave")]
    Maternity,
    #[serde(rename = "Paternity Leave")]
    #[sqlx(rename = "Paternity Leave")]
    #[strum(serialize = "Paternity Leave")]
    Paternity,
    #[sqlx(rename = "Other")]
    Other,
}

/// Lifecycle states. A request always starts Pending; Approved and Rejected
/// are terminal.
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    sqlx::Type,
    strum::Display,
    strum::EnumString,
    ToSchema,
)]
pub enum LeaveStatus {
    #[sqlx(rename = "Pending")]
    Pending,
    #[sqlx(rename = "Approved")]
    Approved,
    #[sqlx(rename = "Rejected")]
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: u64,
    /// Owning user. Never changes after creation.
    #[schema(example = 42)]
    pub user_id: u64,
    #[schema(example = "2025-01-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-01-12", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "flu")]
    pub reason: String,
    pub leave_type: LeaveType,
    pub status: LeaveStatus,
    /// Assigned server-side at creation; the sole sort key for listings.
    #[schema(example = "2025-01-09T08:30:00Z", format = "date-time", value_type = String)]
    pub created_on: DateTime<Utc>,
    /// Opaque attachment payload reference, required.
    pub file: String,
}
