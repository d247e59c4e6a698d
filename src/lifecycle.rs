//! Leave-request state machine. Every request starts Pending; Approved and
//! Rejected are terminal. Validation runs in full before any store write.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppError,
    model::leave_request::{LeaveRequest, LeaveStatus, LeaveType},
    store::{LeavePatch, LeaveStore, NewLeaveRequest},
};

/// Request body for create and edit. `status` and `createdOn` are never
/// caller-supplied.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveInput {
    #[schema(example = 42)]
    pub user_id: u64,
    #[schema(example = "2025-01-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-01-12", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "flu")]
    pub reason: String,
    pub leave_type: LeaveType,
    #[schema(example = "data:application/pdf;base64,...")]
    pub file: String,
}

fn validate(input: &LeaveInput) -> Result<(), AppError> {
    let mut violations = Vec::new();

    if input.start_date > input.end_date {
        violations.push("startDate must not be after endDate".to_string());
    }
    if input.reason.trim().is_empty() {
        violations.push("reason must not be empty".to_string());
    }
    if input.file.trim().is_empty() {
        violations.push("file is required".to_string());
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}

/// Creates a Pending record. `created_on` is assigned here, server-side.
pub async fn create<S: LeaveStore>(store: &S, input: &LeaveInput) -> Result<LeaveRequest, AppError> {
    validate(input)?;

    store
        .insert(NewLeaveRequest {
            user_id: input.user_id,
            start_date: input.start_date,
            end_date: input.end_date,
            reason: input.reason.clone(),
            leave_type: input.leave_type,
            status: LeaveStatus::Pending,
            created_on: Utc::now(),
            file: input.file.clone(),
        })
        .await
}

/// Re-validates and overwrites the editable fields. Status, owner and
/// created_on are untouched; the Pending gate is access control's job.
pub async fn edit<S: LeaveStore>(
    store: &S,
    id: u64,
    input: &LeaveInput,
) -> Result<LeaveRequest, AppError> {
    validate(input)?;

    store
        .update(
            id,
            LeavePatch {
                start_date: input.start_date,
                end_date: input.end_date,
                reason: input.reason.clone(),
                leave_type: input.leave_type,
                file: input.file.clone(),
            },
        )
        .await?
        .ok_or(AppError::NotFound)
}

/// Applies Pending -> Approved or Pending -> Rejected. Anything else fails
/// and leaves the record unchanged.
pub async fn transition<S: LeaveStore>(
    store: &S,
    current: &LeaveRequest,
    target: LeaveStatus,
) -> Result<LeaveRequest, AppError> {
    if current.status != LeaveStatus::Pending || target == LeaveStatus::Pending {
        return Err(AppError::InvalidTransition {
            from: current.status,
            to: target,
        });
    }

    store
        .set_status(current.id, target)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn remove<S: LeaveStore>(store: &S, id: u64) -> Result<(), AppError> {
    if store.delete(id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryLeaveStore;
    use pretty_assertions::assert_eq;

    fn input(user_id: u64) -> LeaveInput {
        LeaveInput {
            user_id,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
            reason: "flu".into(),
            leave_type: LeaveType::Sick,
            file: "blob-ref".into(),
        }
    }

    #[actix_web::test]
    async fn create_then_get_round_trips_with_pending_status() {
        let store = MemoryLeaveStore::new();
        let created = create(&store, &input(1)).await.unwrap();

        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.user_id, 1);
        assert_eq!(fetched.start_date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        assert_eq!(fetched.end_date, NaiveDate::from_ymd_opt(2025, 1, 12).unwrap());
        assert_eq!(fetched.reason, "flu");
        assert_eq!(fetched.leave_type, LeaveType::Sick);
        assert_eq!(fetched.file, "blob-ref");
        assert_eq!(fetched.status, LeaveStatus::Pending);
    }

    #[actix_web::test]
    async fn create_reports_all_violations_together() {
        let store = MemoryLeaveStore::new();
        let mut bad = input(1);
        bad.start_date = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        bad.reason = "   ".into();
        bad.file = "".into();

        let err = create(&store, &bad).await.unwrap_err();
        match err {
            AppError::Validation(violations) => {
                assert_eq!(violations.len(), 3);
                assert!(violations[0].contains("startDate"));
                assert!(violations[1].contains("reason"));
                assert!(violations[2].contains("file"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        // No partial write happened.
        let (_, total) = store
            .query(&crate::store::LeaveQuery {
                user_id: None,
                reason_contains: None,
                status: None,
                sort: crate::store::SortDir::Asc,
                offset: 0,
                limit: 10,
            })
            .await
            .unwrap();
        assert_eq!(total, 0);
    }

    #[actix_web::test]
    async fn edit_preserves_status_and_created_on() {
        let store = MemoryLeaveStore::new();
        let created = create(&store, &input(1)).await.unwrap();

        let mut changed = input(1);
        changed.reason = "migraine".into();
        changed.leave_type = LeaveType::Casual;
        let updated = edit(&store, created.id, &changed).await.unwrap();

        assert_eq!(updated.reason, "migraine");
        assert_eq!(updated.leave_type, LeaveType::Casual);
        assert_eq!(updated.status, created.status);
        assert_eq!(updated.created_on, created.created_on);
        assert_eq!(updated.user_id, created.user_id);
    }

    #[actix_web::test]
    async fn edit_missing_record_is_not_found() {
        let store = MemoryLeaveStore::new();
        assert!(matches!(
            edit(&store, 999, &input(1)).await,
            Err(AppError::NotFound)
        ));
    }

    #[actix_web::test]
    async fn transition_approves_once_then_fails() {
        let store = MemoryLeaveStore::new();
        let created = create(&store, &input(1)).await.unwrap();

        let approved = transition(&store, &created, LeaveStatus::Approved)
            .await
            .unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);

        // Second attempt sees the terminal state and fails.
        let err = transition(&store, &approved, LeaveStatus::Approved)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidTransition {
                from: LeaveStatus::Approved,
                to: LeaveStatus::Approved,
            }
        ));
    }

    #[actix_web::test]
    async fn terminal_states_never_flip() {
        let store = MemoryLeaveStore::new();
        let created = create(&store, &input(1)).await.unwrap();
        let rejected = transition(&store, &created, LeaveStatus::Rejected)
            .await
            .unwrap();

        for target in [LeaveStatus::Approved, LeaveStatus::Pending] {
            assert!(matches!(
                transition(&store, &rejected, target).await,
                Err(AppError::InvalidTransition { .. })
            ));
        }
        assert_eq!(
            store.get(created.id).await.unwrap().unwrap().status,
            LeaveStatus::Rejected
        );
    }

    #[actix_web::test]
    async fn pending_to_pending_is_rejected() {
        let store = MemoryLeaveStore::new();
        let created = create(&store, &input(1)).await.unwrap();
        assert!(matches!(
            transition(&store, &created, LeaveStatus::Pending).await,
            Err(AppError::InvalidTransition { .. })
        ));
    }

    #[actix_web::test]
    async fn transition_touches_no_other_field() {
        let store = MemoryLeaveStore::new();
        let created = create(&store, &input(1)).await.unwrap();
        let approved = transition(&store, &created, LeaveStatus::Approved)
            .await
            .unwrap();

        assert_eq!(approved.reason, created.reason);
        assert_eq!(approved.start_date, created.start_date);
        assert_eq!(approved.end_date, created.end_date);
        assert_eq!(approved.created_on, created.created_on);
        assert_eq!(approved.user_id, created.user_id);
    }

    // The full review flow: employee A applies, employee B sees nothing,
    // the manager filters pending requests and approves, after which A can
    // no longer edit.
    #[actix_web::test]
    async fn review_flow_from_application_to_approval() {
        use crate::{
            access::{self, Action, DenyReason},
            auth::auth::AuthUser,
            model::role::Role,
            query::{self, ListParams, Scope},
        };

        let store = MemoryLeaveStore::new();
        let alice = AuthUser {
            user_id: 1,
            user_name: "Alice".into(),
            role: Role::Employee,
        };
        let manager = AuthUser {
            user_id: 9,
            user_name: "Mallory".into(),
            role: Role::Manager,
        };

        access::authorize(&alice, Action::CreateRequest { owner: 1 }).unwrap();
        let created = create(&store, &input(1)).await.unwrap();
        assert_eq!(created.status, LeaveStatus::Pending);

        // Employee B's scope shows nothing.
        let bobs = query::list(&store, Scope::User(2), &ListParams::default())
            .await
            .unwrap();
        assert_eq!(bobs.total, 0);

        // Manager review with a pending-status filter finds the one record.
        let pending = query::list(
            &store,
            Scope::All,
            &ListParams {
                status_filter: Some(LeaveStatus::Pending),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(pending.total, 1);

        access::authorize(&manager, Action::TransitionRequest(&created)).unwrap();
        let approved = transition(&store, &created, LeaveStatus::Approved)
            .await
            .unwrap();

        // Alice's edit is now denied with NotPending.
        let denial = access::authorize(&alice, Action::EditRequest(&approved)).unwrap_err();
        assert!(matches!(
            denial,
            crate::error::AppError::Denied(DenyReason::NotPending)
        ));
    }

    #[actix_web::test]
    async fn remove_deletes_or_reports_not_found() {
        let store = MemoryLeaveStore::new();
        let created = create(&store, &input(1)).await.unwrap();

        remove(&store, created.id).await.unwrap();
        assert!(store.get(created.id).await.unwrap().is_none());
        assert!(matches!(
            remove(&store, created.id).await,
            Err(AppError::NotFound)
        ));
    }
}
