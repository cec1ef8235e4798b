use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A row of the `teams` table (`id, name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Team {
    pub id: String,
    pub name: String,
}
