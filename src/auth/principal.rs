//! The authenticated user's identity claims.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identity claims of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable username identifier; message ownership is derived from it.
    pub username: String,
    /// Email claim, when the provider supplies one.
    pub email: Option<String>,
}

/// Claims read from the ID token payload.
///
/// Cognito-style providers carry the username under `cognito:username`;
/// generic providers use `username` or fall back to `email`/`sub`.
#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, rename = "cognito:username")]
    cognito_username: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

impl Principal {
    /// Decode the principal from a raw ID token.
    ///
    /// Only the payload segment is read; signature validation is delegated
    /// to the provider that issued the token.
    pub fn from_id_token(token: &str) -> Result<Self> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| Error::Auth("malformed ID token".into()))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|err| Error::Auth(format!("ID token payload is not base64url: {err}")))?;
        let claims: IdTokenClaims = serde_json::from_slice(&bytes)?;
        Ok(Self::from_claims(claims))
    }

    fn from_claims(claims: IdTokenClaims) -> Self {
        let username = claims
            .cognito_username
            .or(claims.username)
            .or_else(|| claims.email.clone())
            .unwrap_or(claims.sub);
        Self {
            username,
            email: claims.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_for(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn test_prefers_cognito_username() {
        let token = token_for(serde_json::json!({
            "sub": "abc-123",
            "cognito:username": "bob",
            "email": "bob@example.com"
        }));

        let principal = Principal::from_id_token(&token).unwrap();
        assert_eq!(principal.username, "bob");
        assert_eq!(principal.email.as_deref(), Some("bob@example.com"));
    }

    #[test]
    fn test_falls_back_to_username_then_email_then_sub() {
        let token = token_for(serde_json::json!({"sub": "s", "username": "alice"}));
        assert_eq!(Principal::from_id_token(&token).unwrap().username, "alice");

        let token = token_for(serde_json::json!({"sub": "s", "email": "a@b.c"}));
        assert_eq!(Principal::from_id_token(&token).unwrap().username, "a@b.c");

        let token = token_for(serde_json::json!({"sub": "s"}));
        assert_eq!(Principal::from_id_token(&token).unwrap().username, "s");
    }

    #[test]
    fn test_rejects_malformed_token() {
        assert!(Principal::from_id_token("not-a-jwt").is_err());
        assert!(Principal::from_id_token("a.!!!.c").is_err());
    }
}
