use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::role::Role;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "John Doe")]
    pub user_name: String,
    #[schema(example = "john.doe@company.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "+8801712345678")]
    pub mobile: String,
    /// Argon2 hash, never serialized back to clients
    #[serde(skip_serializing)]
    #[schema(write_only)]
    pub password: String,
    pub role: Role,
}
