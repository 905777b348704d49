//! Session token handling and the signed-in user.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::error::ApiError;
use crate::requests::LoginResponse;

/// Local storage keys.
pub const TOKEN_KEY: &str = "token";
pub const SELECTED_CLIENT_KEY: &str = "selectedClientId";
pub const SELECTED_INTERFACE_KEY: &str = "selectedInterfaceId";

pub const XSRF_COOKIE: &str = "XSRF-TOKEN";
pub const XSRF_HEADER: &str = "X-XSRF-TOKEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub username: String,
    pub roles: Vec<String>,
}

impl SessionUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

impl From<&LoginResponse> for SessionUser {
    fn from(response: &LoginResponse) -> Self {
        Self {
            username: response.username.clone(),
            roles: response.roles.iter().map(|r| normalize_role(r)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Stored token is being validated at start-up.
    #[default]
    Checking,
    Anonymous,
    Authenticated(SessionUser),
}

impl AuthState {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.user().is_some_and(|u| u.has_role(role))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub authorities: Vec<String>,
    /// Seconds since the epoch.
    #[serde(default)]
    pub exp: Option<u64>,
}

impl TokenClaims {
    pub fn is_expired(&self, now_secs: u64) -> bool {
        self.exp.is_some_and(|exp| exp <= now_secs)
    }

    pub fn to_user(&self) -> SessionUser {
        let roles = self
            .roles
            .iter()
            .chain(self.authorities.iter())
            .map(|r| normalize_role(r))
            .fold(Vec::<String>::new(), |mut acc, role| {
                if !acc.contains(&role) {
                    acc.push(role);
                }
                acc
            });
        SessionUser {
            username: self.sub.clone(),
            roles,
        }
    }
}

/// Spring authorities come as `ROLE_ADMIN`; the console checks `ADMIN`.
pub fn normalize_role(role: &str) -> String {
    role.trim_start_matches("ROLE_").to_string()
}

/// Reads the claims of a JWT without verifying it. Verification is the
/// backend's job; the console only needs the username and roles.
pub fn decode_claims(token: &str) -> Result<TokenClaims, ApiError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| ApiError::Decode("token is not a JWT".to_string()))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ApiError::Decode(format!("token payload: {}", e)))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::Decode(format!("token claims: {}", e)))
}

/// Whether a failed session restore proves the stored token useless.
/// Transport and server errors keep it so the next start can try again.
pub fn discards_stored_token(err: &ApiError) -> bool {
    err.is_session_invalid() || matches!(err, ApiError::Decode(_))
}

/// Finds a cookie value in a `document.cookie` string. The value is
/// returned raw; URI decoding is left to the caller.
pub fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(claims: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
            URL_SAFE_NO_PAD.encode(claims)
        )
    }

    #[test]
    fn claims_yield_user_and_roles() {
        let jwt = token(r#"{"sub":"ops","authorities":["ROLE_ADMIN","ROLE_USER"],"exp":2000}"#);
        let claims = decode_claims(&jwt).unwrap();
        let user = claims.to_user();
        assert_eq!(user.username, "ops");
        assert!(user.has_role("ADMIN"));
        assert!(claims.is_expired(2000));
        assert!(!claims.is_expired(1999));
    }

    #[test]
    fn garbage_token_is_a_decode_error() {
        assert!(matches!(decode_claims("opaque"), Err(ApiError::Decode(_))));
        assert!(matches!(decode_claims("a.%%%.c"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn only_rejected_tokens_are_forgotten() {
        assert!(discards_stored_token(&ApiError::Unauthorized));
        assert!(discards_stored_token(&ApiError::Forbidden));
        assert!(discards_stored_token(&decode_claims("opaque").unwrap_err()));

        assert!(!discards_stored_token(&ApiError::Network("failed to fetch".into())));
        assert!(!discards_stored_token(&ApiError::from_response(503, "")));
    }

    #[test]
    fn xsrf_cookie_lookup() {
        let cookies = "theme=dark; XSRF-TOKEN=abc%3D%3D; other=1";
        assert_eq!(cookie_value(cookies, XSRF_COOKIE), Some("abc%3D%3D"));
        assert_eq!(cookie_value(cookies, "missing"), None);
    }

    #[test]
    fn anonymous_has_no_roles() {
        assert!(!AuthState::Anonymous.has_role("ADMIN"));
        let state = AuthState::Authenticated(SessionUser {
            username: "ops".into(),
            roles: vec!["ADMIN".into()],
        });
        assert!(state.has_role("ADMIN"));
        assert!(state.is_authenticated());
    }
}
