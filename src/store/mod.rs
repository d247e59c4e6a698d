//! Persistence boundary for leave requests. The engines only ever talk to
//! [`LeaveStore`]; the MySQL implementation backs the running service and
//! the in-memory one backs the engine unit tests.

pub mod memory;
pub mod mysql;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppError,
    model::leave_request::{LeaveRequest, LeaveStatus, LeaveType},
};

pub use mysql::MySqlLeaveStore;

/// Record contents for an insert; `id` is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub user_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub leave_type: LeaveType,
    pub status: LeaveStatus,
    pub created_on: DateTime<Utc>,
    pub file: String,
}

/// Editable fields of an existing request. Owner, status and created_on are
/// deliberately absent.
#[derive(Debug, Clone)]
pub struct LeavePatch {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub leave_type: LeaveType,
    pub file: String,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

/// Fully resolved query: scope restriction, caller filters, sort and slice.
/// `user_id` is the hard ownership scope; it is set by the query engine and
/// never taken from caller-supplied filter input.
#[derive(Debug, Clone)]
pub struct LeaveQuery {
    pub user_id: Option<u64>,
    pub reason_contains: Option<String>,
    pub status: Option<LeaveStatus>,
    pub sort: SortDir,
    pub offset: u64,
    pub limit: u64,
}

/// Abstract CRUD + filtered-query contract. Single-record operations are
/// atomic; there are no cross-record transactions. `query` returns the
/// match count before the offset/limit slice is applied.
pub trait LeaveStore {
    async fn insert(&self, rec: NewLeaveRequest) -> Result<LeaveRequest, AppError>;

    async fn get(&self, id: u64) -> Result<Option<LeaveRequest>, AppError>;

    async fn update(&self, id: u64, patch: LeavePatch) -> Result<Option<LeaveRequest>, AppError>;

    /// Overwrites the status column only. No concurrency guard: two racing
    /// callers are last-write-wins at this layer.
    async fn set_status(
        &self,
        id: u64,
        status: LeaveStatus,
    ) -> Result<Option<LeaveRequest>, AppError>;

    async fn delete(&self, id: u64) -> Result<bool, AppError>;

    async fn query(&self, q: &LeaveQuery) -> Result<(Vec<LeaveRequest>, i64), AppError>;
}
