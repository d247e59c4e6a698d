use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::role::Role;

/// Verified token contents threaded through every protected operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub sub: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "john.doe@company.com")]
    pub email: String,
    #[schema(example = "secret")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(example = "John Doe")]
    pub user_name: String,
    pub role: Role,
    pub token: String,
    #[schema(example = 42)]
    pub id: u64,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReq {
    #[schema(example = "John Doe")]
    pub user_name: String,
    #[schema(example = "john.doe@company.com")]
    pub email: String,
    #[schema(example = "+8801712345678")]
    pub mobile: String,
    pub password: String,
    pub role: Role,
}
