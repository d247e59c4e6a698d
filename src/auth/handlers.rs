use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error, info, instrument};

use crate::{
    auth::{
        jwt::issue_token,
        password::{hash_password, verify_password},
    },
    config::Config,
    model::user::User,
    models::{LoginReqDto, LoginResponse, RegisterReq},
};

/// User registration handler
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "User registered successfully"),
        (status = 400, description = "Missing required fields"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Auth"
)]
pub async fn register(payload: web::Json<RegisterReq>, pool: web::Data<MySqlPool>) -> impl Responder {
    let user_name = payload.user_name.trim();
    let email = payload.email.trim();

    if user_name.is_empty() || email.is_empty() || payload.password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "message": "userName, email and password must not be empty"
        }));
    }

    let hashed = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Password hashing failed");
            return HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            }));
        }
    };

    let result = sqlx::query(
        r#"INSERT INTO users (user_name, email, mobile, password, role) VALUES (?, ?, ?, ?, ?)"#,
    )
    .bind(user_name)
    .bind(email)
    .bind(&payload.mobile)
    .bind(&hashed)
    .bind(payload.role)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => HttpResponse::Created().json(json!({ "message": "Success" })),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code() == Some("23000".into()) {
                    return HttpResponse::Conflict().json(json!({
                        "message": "Email already registered"
                    }));
                }
            }
            error!(error = %e, "Failed to register user");
            HttpResponse::InternalServerError().json(json!({
                "message": "Failed to register user"
            }))
        }
    }
}

/// Login handler: verifies credentials and issues a 1-hour bearer token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(pool, config, payload),
    fields(email = %payload.email)
)]
pub async fn login(
    payload: web::Json<LoginReqDto>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Email and password required"
        }));
    }

    debug!("Fetching user from database");

    let db_user = match sqlx::query_as::<_, User>(
        r#"
        SELECT id, user_name, email, mobile, password, role
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(payload.email.trim())
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            info!("Invalid credentials: user not found");
            return HttpResponse::Unauthorized().json(json!({ "message": "Invalid credentials" }));
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching user");
            return HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            }));
        }
    };

    if verify_password(&payload.password, &db_user.password).is_err() {
        info!("Invalid credentials: password mismatch");
        return HttpResponse::Unauthorized().json(json!({ "message": "Invalid credentials" }));
    }

    let token = match issue_token(
        db_user.id,
        db_user.user_name.clone(),
        db_user.role,
        &config.jwt_secret,
        config.access_token_ttl,
    ) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Token signing failed");
            return HttpResponse::InternalServerError().json(json!({
                "message": "Error generating token"
            }));
        }
    };

    debug!(user_id = db_user.id, "Login successful");

    HttpResponse::Ok().json(LoginResponse {
        user_name: db_user.user_name,
        role: db_user.role,
        token,
        id: db_user.id,
    })
}
