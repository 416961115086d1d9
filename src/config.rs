//! Application configuration.
//!
//! A browser bundle has no process environment or config files at runtime,
//! so configuration is resolved at compile time: defaults below, overridden
//! by `CHAT_*` environment variables present during the build.

/// Message API base URL.
const DEFAULT_API_URL: &str = "https://api.parlor.chat/messages";

/// OIDC authority hosting the authorize/token/logout endpoints.
const DEFAULT_AUTH_AUTHORITY: &str = "https://auth.parlor.chat";

/// OAuth client identifier registered with the provider.
const DEFAULT_AUTH_CLIENT_ID: &str = "parlor-web";

/// Scopes requested during sign-in.
const DEFAULT_AUTH_SCOPES: &str = "openid email profile";

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Message API base URL.
    pub api_url: String,
    /// Identity provider settings.
    pub auth: AuthConfig,
}

/// Identity provider settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Provider authority, e.g. a Cognito hosted-UI domain.
    pub authority: String,
    /// Public client identifier.
    pub client_id: String,
    /// Redirect target registered with the provider. The current origin is
    /// used when unset.
    pub redirect_uri: Option<String>,
    /// Where the provider sends the browser after logout. The current
    /// origin is used when unset.
    pub post_logout_redirect_uri: Option<String>,
    /// Space-separated scope list.
    pub scopes: String,
}

impl AppConfig {
    /// Resolve configuration from build-time environment overrides.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_url: option_env!("CHAT_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            auth: AuthConfig {
                authority: option_env!("CHAT_AUTH_AUTHORITY")
                    .unwrap_or(DEFAULT_AUTH_AUTHORITY)
                    .to_string(),
                client_id: option_env!("CHAT_AUTH_CLIENT_ID")
                    .unwrap_or(DEFAULT_AUTH_CLIENT_ID)
                    .to_string(),
                redirect_uri: option_env!("CHAT_AUTH_REDIRECT_URI").map(str::to_string),
                post_logout_redirect_uri: option_env!("CHAT_AUTH_LOGOUT_URI").map(str::to_string),
                scopes: option_env!("CHAT_AUTH_SCOPES")
                    .unwrap_or(DEFAULT_AUTH_SCOPES)
                    .to_string(),
            },
        }
    }
}

impl AuthConfig {
    /// Authorization endpoint under the authority.
    #[must_use]
    pub fn authorize_endpoint(&self) -> String {
        format!("{}/oauth2/authorize", self.authority.trim_end_matches('/'))
    }

    /// Token endpoint under the authority.
    #[must_use]
    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth2/token", self.authority.trim_end_matches('/'))
    }

    /// Logout endpoint under the authority.
    #[must_use]
    pub fn logout_endpoint(&self) -> String {
        format!("{}/logout", self.authority.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve() {
        let config = AppConfig::from_env();

        assert!(url::Url::parse(&config.api_url).is_ok());
        assert!(url::Url::parse(&config.auth.authority).is_ok());
        assert!(!config.auth.client_id.is_empty());
        assert!(config.auth.scopes.contains("openid"));
    }

    #[test]
    fn test_endpoints_join_cleanly() {
        let auth = AuthConfig {
            authority: "https://auth.example.com/".to_string(),
            client_id: "client".to_string(),
            redirect_uri: None,
            post_logout_redirect_uri: None,
            scopes: "openid".to_string(),
        };

        assert_eq!(
            auth.authorize_endpoint(),
            "https://auth.example.com/oauth2/authorize"
        );
        assert_eq!(auth.token_endpoint(), "https://auth.example.com/oauth2/token");
        assert_eq!(auth.logout_endpoint(), "https://auth.example.com/logout");
    }
}
