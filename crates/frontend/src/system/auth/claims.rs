//! Reading the JWT payload on the client.
//!
//! The signature is not checked here; the backend does that on every call.
//! The payload only tells the UI which views to offer and when the access
//! token runs out.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use contracts::system::auth::{Role, UserInfo};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ClaimsError {
    #[error("token is not a JWT")]
    Malformed,
    #[error("payload is not valid base64url: {0}")]
    Encoding(String),
    #[error("payload is not a JSON object: {0}")]
    Json(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenClaims {
    pub subject: Option<String>,
    pub username: Option<String>,
    pub roles: Vec<Role>,
    /// Unix seconds
    pub expires_at: Option<i64>,
}

impl TokenClaims {
    /// `leeway_secs` treats tokens about to expire as already expired.
    pub fn is_expired(&self, now_secs: i64, leeway_secs: i64) -> bool {
        match self.expires_at {
            Some(exp) => exp <= now_secs + leeway_secs,
            None => false,
        }
    }

    /// Minimal user record for when the login response carries none.
    pub fn to_user_info(&self) -> Option<UserInfo> {
        let username = self.username.clone().or_else(|| self.subject.clone())?;
        Some(UserInfo {
            id: self.subject.clone().unwrap_or_else(|| username.clone()),
            username,
            full_name: None,
            email: None,
            roles: self.roles.clone(),
        })
    }
}

pub fn decode_claims(token: &str) -> Result<TokenClaims, ClaimsError> {
    let mut segments = token.trim().split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_header), Some(payload), Some(_signature)) if !payload.is_empty() => payload,
        _ => return Err(ClaimsError::Malformed),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ClaimsError::Encoding(e.to_string()))?;
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|e| ClaimsError::Json(e.to_string()))?;
    if !value.is_object() {
        return Err(ClaimsError::Json("expected an object".to_string()));
    }

    Ok(TokenClaims {
        subject: string_claim(&value, "sub"),
        username: string_claim(&value, "username")
            .or_else(|| string_claim(&value, "preferred_username")),
        roles: Role::from_claims(raw_roles(&value).iter().map(String::as_str)),
        expires_at: value.get("exp").and_then(Value::as_i64),
    })
}

fn string_claim(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Every role-like string in the payload, in claim order.
fn raw_roles(value: &Value) -> Vec<String> {
    let mut raw = Vec::new();
    for key in ["roles", "role", "authorities"] {
        match value.get(key) {
            Some(Value::String(s)) => raw.extend(s.split(',').map(|r| r.trim().to_string())),
            Some(Value::Array(items)) => {
                for item in items {
                    match item {
                        Value::String(s) => raw.push(s.clone()),
                        Value::Object(obj) => {
                            if let Some(Value::String(s)) = obj.get("authority") {
                                raw.push(s.clone());
                            }
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
    if let Some(Value::String(scope)) = value.get("scope") {
        raw.extend(scope.split_whitespace().map(str::to_string));
    }
    raw
}

/// Combine what the backend said about the user with the token's claims.
///
/// Roles from the token win when the user record has none.
pub fn session_user(token: &str, user: Option<UserInfo>) -> Option<UserInfo> {
    let claims = decode_claims(token).ok();
    match (user, claims) {
        (Some(mut user), Some(claims)) => {
            if user.roles.is_empty() {
                user.roles = claims.roles;
            }
            Some(user)
        }
        (Some(user), None) => Some(user),
        (None, Some(claims)) => claims.to_user_info(),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE;

    fn token(payload: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn spring_style_authorities() {
        let t = token(
            r#"{"sub":"42","username":"wm","authorities":[{"authority":"ROLE_WAREHOUSE_MANAGER"},"ROLE_CLIENT"],"exp":1700000000}"#,
        );
        let claims = decode_claims(&t).unwrap();
        assert_eq!(claims.subject.as_deref(), Some("42"));
        assert_eq!(claims.username.as_deref(), Some("wm"));
        assert_eq!(claims.roles, vec![Role::WarehouseManager, Role::Client]);
        assert_eq!(claims.expires_at, Some(1_700_000_000));
    }

    #[test]
    fn single_role_string_and_scope() {
        let t = token(r#"{"sub":"7","preferred_username":"ops","role":"admin","scope":"openid customer"}"#);
        let claims = decode_claims(&t).unwrap();
        assert_eq!(claims.username.as_deref(), Some("ops"));
        assert_eq!(claims.roles, vec![Role::Admin, Role::Client]);
    }

    #[test]
    fn padded_payload_is_tolerated() {
        let payload = URL_SAFE.encode(r#"{"sub":"1","roles":["ADMIN"]}"#);
        let t = format!("h.{}.s", payload);
        assert_eq!(decode_claims(&t).unwrap().roles, vec![Role::Admin]);
    }

    #[test]
    fn malformed_tokens() {
        assert_eq!(decode_claims("abc"), Err(ClaimsError::Malformed));
        assert!(matches!(decode_claims("a.!!!.c"), Err(ClaimsError::Encoding(_))));
        let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("hello"));
        assert!(matches!(decode_claims(&not_json), Err(ClaimsError::Json(_))));
    }

    #[test]
    fn expiry_with_leeway() {
        let claims = TokenClaims {
            expires_at: Some(1000),
            ..TokenClaims::default()
        };
        assert!(!claims.is_expired(900, 30));
        assert!(claims.is_expired(980, 30));
        assert!(!TokenClaims::default().is_expired(i64::MAX - 100, 30));
    }

    #[test]
    fn session_user_fills_missing_roles() {
        let t = token(r#"{"sub":"5","username":"amy","roles":["ROLE_CLIENT"]}"#);
        let from_token = session_user(&t, None).unwrap();
        assert_eq!(from_token.username, "amy");
        assert_eq!(from_token.roles, vec![Role::Client]);

        let server = UserInfo {
            id: "5".into(),
            username: "amy".into(),
            full_name: Some("Amy Pond".into()),
            email: None,
            roles: vec![],
        };
        let merged = session_user(&t, Some(server)).unwrap();
        assert_eq!(merged.full_name.as_deref(), Some("Amy Pond"));
        assert_eq!(merged.roles, vec![Role::Client]);
    }
}
