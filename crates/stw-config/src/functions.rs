//! Edge function (privileged operation) configuration.

use serde::{Deserialize, Serialize};

/// Functions base URL used when neither an override nor a Supabase URL is set.
///
/// This is the address `supabase start` serves edge functions on.
pub const DEFAULT_FUNCTIONS_URL: &str = "http://localhost:54321/functions/v1";

/// Name of the privileged user-creation function.
pub const CREATE_USER_FUNCTION: &str = "create-user-admin";

/// How the admin user-creation call reaches the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CreationTransportKind {
    /// Function-style invocation returning a `{ data, error }` envelope.
    #[default]
    Function,
    /// Plain HTTP POST; non-2xx statuses are failures.
    Http,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FunctionsConfig {
    /// Override for the functions base URL.
    #[serde(default)]
    pub base_url: String,

    /// Transport used for admin user creation.
    #[serde(default)]
    pub transport: CreationTransportKind,

    /// Full endpoint for the `http` transport. Empty = `<base>/create-user-admin`.
    #[serde(default)]
    pub create_user_endpoint: String,
}

impl FunctionsConfig {
    /// Resolve the functions base URL.
    ///
    /// Precedence: explicit `base_url`, then `<supabase_url>/functions/v1`,
    /// then [`DEFAULT_FUNCTIONS_URL`].
    pub fn resolved_base_url(&self, supabase_url: &str) -> String {
        if !self.base_url.is_empty() {
            return self.base_url.trim_end_matches('/').to_string();
        }
        let supabase_url = supabase_url.trim_end_matches('/');
        if supabase_url.is_empty() {
            DEFAULT_FUNCTIONS_URL.to_string()
        } else {
            format!("{supabase_url}/functions/v1")
        }
    }

    /// Resolve the endpoint the `http` transport posts to.
    pub fn resolved_create_user_endpoint(&self, supabase_url: &str) -> String {
        if self.create_user_endpoint.is_empty() {
            format!(
                "{}/{CREATE_USER_FUNCTION}",
                self.resolved_base_url(supabase_url)
            )
        } else {
            self.create_user_endpoint.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_documented_url() {
        let config = FunctionsConfig::default();
        assert_eq!(config.resolved_base_url(""), DEFAULT_FUNCTIONS_URL);
        assert_eq!(
            config.resolved_create_user_endpoint(""),
            "http://localhost:54321/functions/v1/create-user-admin"
        );
    }

    #[test]
    fn derives_from_supabase_url() {
        let config = FunctionsConfig::default();
        assert_eq!(
            config.resolved_base_url("https://abcd.supabase.co/"),
            "https://abcd.supabase.co/functions/v1"
        );
    }

    #[test]
    fn override_beats_supabase_url() {
        let config = FunctionsConfig {
            base_url: "https://fn.example.com/".into(),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_base_url("https://abcd.supabase.co"),
            "https://fn.example.com"
        );
    }

    #[test]
    fn explicit_endpoint_is_used_verbatim() {
        let config = FunctionsConfig {
            create_user_endpoint: "https://api.example.com/admin/users".into(),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_create_user_endpoint("https://abcd.supabase.co"),
            "https://api.example.com/admin/users"
        );
    }

    #[test]
    fn default_transport_is_function() {
        assert_eq!(
            FunctionsConfig::default().transport,
            CreationTransportKind::Function
        );
    }
}
