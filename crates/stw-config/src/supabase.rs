//! Supabase project configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SupabaseConfig {
    /// Project URL (e.g., `https://abcd.supabase.co`).
    #[serde(default)]
    pub url: String,

    /// Public anon key, sent as the `apikey` header on every request.
    #[serde(default)]
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Check if the Supabase config has the minimum required fields.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }

    /// Project URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// `<url>/rest/v1`
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.base_url())
    }

    /// `<url>/auth/v1`
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.base_url())
    }
}
