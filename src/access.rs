//! Role and ownership checks applied after credential verification and
//! before any store access. Authorization failures are a separate error
//! class from credential failures and always carry a reason code.

use crate::{
    auth::auth::AuthUser,
    error::AppError,
    model::leave_request::{LeaveRequest, LeaveStatus},
};

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum DenyReason {
    NotOwner,
    NotPending,
    InsufficientRole,
}

/// One protected operation, together with the resource it touches.
pub enum Action<'a> {
    CreateRequest { owner: u64 },
    ViewRequest(&'a LeaveRequest),
    EditRequest(&'a LeaveRequest),
    DeleteRequest(&'a LeaveRequest),
    TransitionRequest(&'a LeaveRequest),
    ListRequestsFor { user_id: u64 },
    ListAllRequests,
    ListEmployees,
}

/// Gate an operation for the given verified identity.
///
/// Employees act on their own requests only, and may edit or delete them
/// only while Pending. Managers see everything and decide transitions, but
/// never author another user's request content.
pub fn authorize(user: &AuthUser, action: Action<'_>) -> Result<(), AppError> {
    match action {
        Action::CreateRequest { owner } => owned_by(user, owner),
        Action::ViewRequest(req) => {
            if user.role.is_manager() {
                Ok(())
            } else {
                owned_by(user, req.user_id)
            }
        }
        Action::EditRequest(req) | Action::DeleteRequest(req) => {
            owned_by(user, req.user_id)?;
            if req.status != LeaveStatus::Pending {
                return Err(AppError::Denied(DenyReason::NotPending));
            }
            Ok(())
        }
        Action::TransitionRequest(_) => manager_only(user),
        Action::ListRequestsFor { user_id } => {
            if user.role.is_manager() {
                Ok(())
            } else {
                owned_by(user, user_id)
            }
        }
        Action::ListAllRequests | Action::ListEmployees => manager_only(user),
    }
}

fn owned_by(user: &AuthUser, owner: u64) -> Result<(), AppError> {
    if user.user_id == owner {
        Ok(())
    } else {
        Err(AppError::Denied(DenyReason::NotOwner))
    }
}

fn manager_only(user: &AuthUser) -> Result<(), AppError> {
    if user.role.is_manager() {
        Ok(())
    } else {
        Err(AppError::Denied(DenyReason::InsufficientRole))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{leave_request::LeaveType, role::Role};
    use chrono::{NaiveDate, Utc};

    fn employee(id: u64) -> AuthUser {
        AuthUser {
            user_id: id,
            user_name: format!("user-{id}"),
            role: Role::Employee,
        }
    }

    fn manager(id: u64) -> AuthUser {
        AuthUser {
            user_id: id,
            user_name: format!("manager-{id}"),
            role: Role::Manager,
        }
    }

    fn request(owner: u64, status: LeaveStatus) -> LeaveRequest {
        LeaveRequest {
            id: 1,
            user_id: owner,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
            reason: "flu".into(),
            leave_type: LeaveType::Sick,
            status,
            created_on: Utc::now(),
            file: "blob-ref".into(),
        }
    }

    fn deny_reason(result: Result<(), AppError>) -> DenyReason {
        match result {
            Err(AppError::Denied(reason)) => reason,
            other => panic!("expected denial, got {other:?}"),
        }
    }

    #[test]
    fn employee_creates_for_self_only() {
        assert!(authorize(&employee(1), Action::CreateRequest { owner: 1 }).is_ok());
        assert_eq!(
            deny_reason(authorize(&employee(1), Action::CreateRequest { owner: 2 })),
            DenyReason::NotOwner
        );
    }

    #[test]
    fn manager_cannot_author_someone_elses_request() {
        assert_eq!(
            deny_reason(authorize(&manager(9), Action::CreateRequest { owner: 2 })),
            DenyReason::NotOwner
        );
        let req = request(2, LeaveStatus::Pending);
        assert_eq!(
            deny_reason(authorize(&manager(9), Action::EditRequest(&req))),
            DenyReason::NotOwner
        );
        assert_eq!(
            deny_reason(authorize(&manager(9), Action::DeleteRequest(&req))),
            DenyReason::NotOwner
        );
    }

    #[test]
    fn edit_and_delete_require_pending() {
        for status in [LeaveStatus::Approved, LeaveStatus::Rejected] {
            let req = request(1, status);
            assert_eq!(
                deny_reason(authorize(&employee(1), Action::EditRequest(&req))),
                DenyReason::NotPending
            );
            assert_eq!(
                deny_reason(authorize(&employee(1), Action::DeleteRequest(&req))),
                DenyReason::NotPending
            );
        }
        let pending = request(1, LeaveStatus::Pending);
        assert!(authorize(&employee(1), Action::EditRequest(&pending)).is_ok());
        assert!(authorize(&employee(1), Action::DeleteRequest(&pending)).is_ok());
    }

    #[test]
    fn only_managers_transition() {
        let req = request(1, LeaveStatus::Pending);
        assert!(authorize(&manager(9), Action::TransitionRequest(&req)).is_ok());
        assert_eq!(
            deny_reason(authorize(&employee(1), Action::TransitionRequest(&req))),
            DenyReason::InsufficientRole
        );
    }

    #[test]
    fn viewing_is_owner_or_manager() {
        let req = request(1, LeaveStatus::Approved);
        assert!(authorize(&employee(1), Action::ViewRequest(&req)).is_ok());
        assert!(authorize(&manager(9), Action::ViewRequest(&req)).is_ok());
        assert_eq!(
            deny_reason(authorize(&employee(2), Action::ViewRequest(&req))),
            DenyReason::NotOwner
        );
    }

    #[test]
    fn listing_scopes_are_enforced() {
        assert!(authorize(&employee(1), Action::ListRequestsFor { user_id: 1 }).is_ok());
        assert_eq!(
            deny_reason(authorize(&employee(1), Action::ListRequestsFor { user_id: 2 })),
            DenyReason::NotOwner
        );
        assert!(authorize(&manager(9), Action::ListRequestsFor { user_id: 2 }).is_ok());
        assert!(authorize(&manager(9), Action::ListAllRequests).is_ok());
        assert_eq!(
            deny_reason(authorize(&employee(1), Action::ListAllRequests)),
            DenyReason::InsufficientRole
        );
        assert_eq!(
            deny_reason(authorize(&employee(1), Action::ListEmployees)),
            DenyReason::InsufficientRole
        );
    }
}
