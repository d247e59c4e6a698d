use actix_web::{HttpResponse, web};
use sqlx::MySqlPool;

use crate::{
    access::{self, Action},
    auth::auth::AuthUser,
    error::AppError,
    model::user::User,
};

/// Employee directory used by the manager review screen.
#[utoipa::path(
    get,
    path = "/api/employee",
    responses(
        (status = 200, description = "All users with the Employee role", body = [User]),
        (status = 400, description = "Invalid token"),
        (status = 403, description = "Manager only")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse, AppError> {
    access::authorize(&auth, Action::ListEmployees)?;

    let employees = sqlx::query_as::<_, User>(
        r#"
        SELECT id, user_name, email, mobile, password, role
        FROM users
        WHERE role = 'Employee'
        ORDER BY user_name
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(employees))
}
