//! Request DTOs for Web API.
//!
//! Missing and `null` fields deserialize to empty strings so the auth flow
//! sees them and applies its own rules.

use serde::{Deserialize, Deserializer};

/// Deserialize a string field, reading `null` as `""`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Signup request.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    /// Username.
    #[serde(deserialize_with = "null_as_empty")]
    pub username: String,
    /// Email address.
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    /// Plaintext password.
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
}

/// Login request.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Username.
    #[serde(deserialize_with = "null_as_empty")]
    pub username: String,
    /// Plaintext password.
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_missing_fields() {
        let req: SignupRequest = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert_eq!(req.username, "alice");
        assert!(req.email.is_empty());
        assert!(req.password.is_empty());
    }

    #[test]
    fn test_null_fields_become_empty() {
        let req: SignupRequest =
            serde_json::from_str(r#"{"username":"alice","email":null,"password":"pw"}"#).unwrap();
        assert_eq!(req.username, "alice");
        assert!(req.email.is_empty());
        assert_eq!(req.password, "pw");

        let req: LoginRequest =
            serde_json::from_str(r#"{"username":null,"password":null}"#).unwrap();
        assert!(req.username.is_empty());
        assert!(req.password.is_empty());
    }

    #[test]
    fn test_non_string_field_is_rejected() {
        let result = serde_json::from_str::<SignupRequest>(r#"{"username":42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_login_request_ignores_unknown_fields() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"username":"alice","password":"pw","remember":true}"#)
                .unwrap();
        assert_eq!(req.username, "alice");
        assert_eq!(req.password, "pw");
    }
}
