use std::sync::{
    Mutex,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    error::AppError,
    model::leave_request::{LeaveRequest, LeaveStatus},
    store::{LeavePatch, LeaveQuery, LeaveStore, NewLeaveRequest, SortDir},
};

/// Vec-backed store with the same filter/sort/slice semantics as the MySQL
/// implementation. Used by the engine unit tests; never fails.
pub struct MemoryLeaveStore {
    records: Mutex<Vec<LeaveRequest>>,
    next_id: AtomicU64,
}

impl MemoryLeaveStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for MemoryLeaveStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LeaveStore for MemoryLeaveStore {
    async fn insert(&self, rec: NewLeaveRequest) -> Result<LeaveRequest, AppError> {
        let record = LeaveRequest {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id: rec.user_id,
            start_date: rec.start_date,
            end_date: rec.end_date,
            reason: rec.reason,
            leave_type: rec.leave_type,
            status: rec.status,
            created_on: rec.created_on,
            file: rec.file,
        };

        let mut records = self.records.lock().unwrap();
        records.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: u64) -> Result<Option<LeaveRequest>, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn update(&self, id: u64, patch: LeavePatch) -> Result<Option<LeaveRequest>, AppError> {
        let mut records = self.records.lock().unwrap();
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        record.start_date = patch.start_date;
        record.end_date = patch.end_date;
        record.reason = patch.reason;
        record.leave_type = patch.leave_type;
        record.file = patch.file;
        Ok(Some(record.clone()))
    }

    async fn set_status(
        &self,
        id: u64,
        status: LeaveStatus,
    ) -> Result<Option<LeaveRequest>, AppError> {
        let mut records = self.records.lock().unwrap();
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        record.status = status;
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: u64) -> Result<bool, AppError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn query(&self, q: &LeaveQuery) -> Result<(Vec<LeaveRequest>, i64), AppError> {
        let records = self.records.lock().unwrap();

        let mut matches: Vec<LeaveRequest> = records
            .iter()
            .filter(|r| q.user_id.is_none_or(|uid| r.user_id == uid))
            .filter(|r| {
                q.reason_contains
                    .as_ref()
                    .is_none_or(|needle| r.reason.to_lowercase().contains(&needle.to_lowercase()))
            })
            .filter(|r| q.status.is_none_or(|status| r.status == status))
            .cloned()
            .collect();

        match q.sort {
            SortDir::Asc => matches.sort_by(|a, b| a.created_on.cmp(&b.created_on)),
            SortDir::Desc => matches.sort_by(|a, b| b.created_on.cmp(&a.created_on)),
        }

        let total = matches.len() as i64;
        let page: Vec<LeaveRequest> = matches
            .into_iter()
            .skip(q.offset as usize)
            .take(q.limit as usize)
            .collect();

        Ok((page, total))
    }
}
