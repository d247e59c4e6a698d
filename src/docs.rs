use crate::lifecycle::LeaveInput;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};
use crate::model::role::Role;
use crate::model::user::User;
use crate::models::{LoginReqDto, LoginResponse, RegisterReq};
use crate::query::{LeavePage, ListParams};
use crate::store::SortDir;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Management API",
        version = "1.0.0",
        description = r#"
## Leave Management System

Employees submit and track leave requests; managers review, approve or
reject them.

### Key Features
- **Self service** — apply for leave, edit or withdraw pending requests,
  browse your own history
- **Manager review** — search, filter and page through all requests,
  approve or reject pending ones
- **Employee directory** — list registered employees

### Security
Every endpoint except login/register requires **JWT Bearer authentication**
(1-hour tokens). Missing or invalid tokens are answered with HTTP 400 and a
readable message.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::register,

        crate::api::leave_request::list_all_leaves,
        crate::api::leave_request::list_leaves_for_user,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::update_leave,
        crate::api::leave_request::delete_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,

        crate::api::employee::list_employees
    ),
    components(
        schemas(
            LeaveInput,
            LeaveRequest,
            LeaveStatus,
            LeaveType,
            LeavePage,
            ListParams,
            SortDir,
            Role,
            User,
            LoginReqDto,
            LoginResponse,
            RegisterReq
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and registration"),
        (name = "Leave", description = "Leave request lifecycle and listing APIs"),
        (name = "Employee", description = "Employee directory APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
