use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The signed-in operator, projected from the authentication session.
///
/// Produced by `stw-auth`'s session adapter, consumed by `stw-api` (license
/// headers) and `stw-cli`. Contains only data fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentUser {
    /// Backend user ID (JWT `sub` claim).
    pub id: String,
    /// Resolved organization. `None` = no override and none on the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}
