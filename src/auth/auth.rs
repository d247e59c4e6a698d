use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

use crate::{
    auth::jwt::{CredentialError, verify_token},
    config::Config,
    error::AppError,
    model::role::Role,
};

/// Verified caller identity, extracted from the Authorization header on
/// every protected route. One value per request; there is no ambient
/// current-user state anywhere.
pub struct AuthUser {
    pub user_id: u64,
    pub user_name: String,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(AppError::Credential(CredentialError::Missing).into())),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "Config missing",
                )));
            }
        };

        let claims = match verify_token(token, &config.jwt_secret) {
            Ok(c) => c,
            Err(e) => return ready(Err(AppError::Credential(e).into())),
        };

        ready(Ok(AuthUser {
            user_id: claims.user_id,
            user_name: claims.sub,
            role: claims.role,
        }))
    }
}
