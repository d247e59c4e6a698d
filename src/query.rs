//! Bounded listing over the leave-request store. The ownership scope is
//! applied before any caller-supplied filter and cannot be overridden by
//! one; page/pageSize defaults are normalized here, at the boundary.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppError,
    model::leave_request::{LeaveRequest, LeaveStatus},
    store::{LeaveQuery, LeaveStore, SortDir},
};

pub const DEFAULT_PAGE_SIZE: i64 = 5;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Recognized listing parameters. Anything else in the query string is
/// ignored; out-of-range page/pageSize fall back to defaults instead of
/// erroring.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Case-insensitive substring match over the reason field
    #[param(example = "flu")]
    pub search_value: Option<String>,
    /// Restrict to a single status
    pub status_filter: Option<LeaveStatus>,
    /// Sort direction over createdOn, the sole sort key (default asc)
    pub sort_value: Option<SortDir>,
    /// 1-based page number
    #[param(example = 1)]
    pub page: Option<i64>,
    #[param(example = 5)]
    pub page_size: Option<i64>,
}

/// Hard ownership restriction, decided by access control, never by filters.
#[derive(Debug, Copy, Clone)]
pub enum Scope {
    User(u64),
    All,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeavePage {
    pub data: Vec<LeaveRequest>,
    /// Match count after filters, before pagination
    #[schema(example = 1)]
    pub total: i64,
    #[schema(example = 1)]
    pub page: i64,
    #[schema(example = 5)]
    pub page_size: i64,
}

pub async fn list<S: LeaveStore>(
    store: &S,
    scope: Scope,
    params: &ListParams,
) -> Result<LeavePage, AppError> {
    let page = params.page.filter(|p| *p > 0).unwrap_or(1);
    let page_size = params
        .page_size
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);

    let query = LeaveQuery {
        user_id: match scope {
            Scope::User(user_id) => Some(user_id),
            Scope::All => None,
        },
        reason_contains: params
            .search_value
            .clone()
            .filter(|needle| !needle.is_empty()),
        status: params.status_filter,
        sort: params.sort_value.unwrap_or(SortDir::Asc),
        // Saturating: an absurdly large page number degrades to a far
        // offset (empty slice), never an overflow.
        offset: page.saturating_sub(1).saturating_mul(page_size) as u64,
        limit: page_size as u64,
    };

    let (data, total) = store.query(&query).await?;

    Ok(LeavePage {
        data,
        total,
        page,
        page_size,
    })
}
