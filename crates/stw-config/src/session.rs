//! Session adapter configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Organization that takes priority over the session's own organization.
    #[serde(default)]
    pub organization_override: String,
}

impl SessionConfig {
    /// The override, treating an empty string as unset.
    pub fn organization_override(&self) -> Option<&str> {
        Some(self.organization_override.as_str()).filter(|org| !org.is_empty())
    }
}
