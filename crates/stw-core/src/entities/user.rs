use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A row of the `users` table (`id, user_name, email`).
///
/// `user_name` may be absent or explicitly `null` in the backend response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SimpleUser {
    pub id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub email: String,
}

/// Body of the privileged `create-user-admin` operation.
///
/// Every field is forwarded verbatim. Nothing here is validated client-side;
/// the backend owns validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateUserPayload {
    pub email: String,
    pub password: String,
    pub user_name: String,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}
