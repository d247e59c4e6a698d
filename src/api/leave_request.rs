use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::{
    access::{self, Action},
    auth::auth::AuthUser,
    error::AppError,
    lifecycle::{self, LeaveInput},
    model::leave_request::{LeaveRequest, LeaveStatus},
    query::{self, LeavePage, ListParams, Scope},
    store::{LeaveStore, MySqlLeaveStore},
};

async fn fetch(store: &MySqlLeaveStore, id: u64) -> Result<LeaveRequest, AppError> {
    store.get(id).await?.ok_or(AppError::NotFound)
}

/* =========================
Create leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = LeaveInput,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request created",
         body = Object,
         example = json!({ "message": "Leave Request Added Successfully" })
        ),
        (status = 400, description = "Invalid token or validation failure"),
        (status = 403, description = "Creating a request for another user")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthUser,
    store: web::Data<MySqlLeaveStore>,
    payload: web::Json<LeaveInput>,
) -> Result<HttpResponse, AppError> {
    access::authorize(&auth, Action::CreateRequest { owner: payload.user_id })?;

    let record = lifecycle::create(store.get_ref(), &payload).await?;

    tracing::info!(id = record.id, user_id = record.user_id, "Leave request created");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave Request Added Successfully",
        "leaveRequest": record
    })))
}

/* =========================
Get one request
========================= */
#[utoipa::path(
    get,
    path = "/api/leave/{id}",
    params(
        ("id" = u64, Path, description = "Leave request id")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 400, description = "Invalid token"),
        (status = 403, description = "Not the owner and not a manager"),
        (status = 404, description = "Leave Request Not Found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: AuthUser,
    store: web::Data<MySqlLeaveStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let record = fetch(store.get_ref(), path.into_inner()).await?;
    access::authorize(&auth, Action::ViewRequest(&record))?;

    Ok(HttpResponse::Ok().json(record))
}

/* =========================
List all requests (manager review)
========================= */
#[utoipa::path(
    get,
    path = "/api/leave",
    params(ListParams),
    responses(
        (status = 200, description = "Paginated leave list", body = LeavePage),
        (status = 400, description = "Invalid token"),
        (status = 403, description = "Manager only")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn list_all_leaves(
    auth: AuthUser,
    store: web::Data<MySqlLeaveStore>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    access::authorize(&auth, Action::ListAllRequests)?;

    let page = query::list(store.get_ref(), Scope::All, &params).await?;
    Ok(HttpResponse::Ok().json(page))
}

/* =========================
List one user's requests (self-service)
========================= */
#[utoipa::path(
    get,
    path = "/api/leave/user/{user_id}",
    params(
        ("user_id" = u64, Path, description = "Owning user id"),
        ListParams
    ),
    responses(
        (status = 200, description = "Paginated leave list scoped to the user", body = LeavePage),
        (status = 400, description = "Invalid token"),
        (status = 403, description = "Only the user themself or a manager")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn list_leaves_for_user(
    auth: AuthUser,
    store: web::Data<MySqlLeaveStore>,
    path: web::Path<u64>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    access::authorize(&auth, Action::ListRequestsFor { user_id })?;

    let page = query::list(store.get_ref(), Scope::User(user_id), &params).await?;
    Ok(HttpResponse::Ok().json(page))
}

/* =========================
Edit a pending request
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{id}",
    params(
        ("id" = u64, Path, description = "Leave request id")
    ),
    request_body = LeaveInput,
    responses(
        (status = 200, description = "Leave request updated", body = Object, example = json!({
            "message": "Leave Request Updated Successfully"
        })),
        (status = 400, description = "Invalid token or validation failure"),
        (status = 403, description = "Not the owner, or no longer Pending"),
        (status = 404, description = "Leave Request Not Found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn update_leave(
    auth: AuthUser,
    store: web::Data<MySqlLeaveStore>,
    path: web::Path<u64>,
    payload: web::Json<LeaveInput>,
) -> Result<HttpResponse, AppError> {
    let current = fetch(store.get_ref(), path.into_inner()).await?;
    access::authorize(&auth, Action::EditRequest(&current))?;

    let updated = lifecycle::edit(store.get_ref(), current.id, &payload).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave Request Updated Successfully",
        "leaveRequest": updated
    })))
}

/* =========================
Delete a pending request
========================= */
#[utoipa::path(
    delete,
    path = "/api/leave/{id}",
    params(
        ("id" = u64, Path, description = "Leave request id")
    ),
    responses(
        (status = 200, description = "Leave request deleted", body = Object, example = json!({
            "message": "Leave Request Deleted Successfully"
        })),
        (status = 400, description = "Invalid token"),
        (status = 403, description = "Not the owner, or no longer Pending"),
        (status = 404, description = "Leave Request Not Found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn delete_leave(
    auth: AuthUser,
    store: web::Data<MySqlLeaveStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let current = fetch(store.get_ref(), path.into_inner()).await?;
    access::authorize(&auth, Action::DeleteRequest(&current))?;

    lifecycle::remove(store.get_ref(), current.id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave Request Deleted Successfully"
    })))
}

/* =========================
Approve / reject (manager)
========================= */
async fn decide(
    auth: AuthUser,
    store: &MySqlLeaveStore,
    id: u64,
    target: LeaveStatus,
) -> Result<LeaveRequest, AppError> {
    let current = fetch(store, id).await?;
    access::authorize(&auth, Action::TransitionRequest(&current))?;

    let updated = lifecycle::transition(store, &current, target).await?;

    tracing::info!(id, manager_id = auth.user_id, status = %target, "Leave request decided");
    Ok(updated)
}

#[utoipa::path(
    put,
    path = "/api/leave/{id}/approve",
    params(
        ("id" = u64, Path, description = "Leave request id")
    ),
    responses(
        (status = 200, description = "Leave approved", body = Object, example = json!({
            "message": "Leave approved"
        })),
        (status = 400, description = "Invalid token or not Pending"),
        (status = 403, description = "Manager only"),
        (status = 404, description = "Leave Request Not Found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    store: web::Data<MySqlLeaveStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    decide(auth, store.get_ref(), path.into_inner(), LeaveStatus::Approved).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Leave approved" })))
}

#[utoipa::path(
    put,
    path = "/api/leave/{id}/reject",
    params(
        ("id" = u64, Path, description = "Leave request id")
    ),
    responses(
        (status = 200, description = "Leave rejected", body = Object, example = json!({
            "message": "Leave rejected"
        })),
        (status = 400, description = "Invalid token or not Pending"),
        (status = 403, description = "Manager only"),
        (status = 404, description = "Leave Request Not Found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    store: web::Data<MySqlLeaveStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    decide(auth, store.get_ref(), path.into_inner(), LeaveStatus::Rejected).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Leave rejected" })))
}
