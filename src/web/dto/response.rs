//! Response DTOs for Web API.

use serde::Serialize;

use crate::db::PublicUser;

/// Success envelope shared by every auth endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    /// Always `true`.
    pub success: bool,
    /// The user the request acted on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUser>,
    /// Human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    /// Response carrying a user and a message.
    pub fn with_user(user: PublicUser, message: impl Into<String>) -> Self {
        Self {
            success: true,
            user: Some(user),
            message: Some(message.into()),
        }
    }

    /// Response carrying only a user.
    pub fn user(user: PublicUser) -> Self {
        Self {
            success: true,
            user: Some(user),
            message: None,
        }
    }

    /// Response carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            user: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> PublicUser {
        PublicUser {
            id: "u1".to_string(),
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_user_only_omits_message() {
        let json = serde_json::to_value(ApiResponse::user(alice())).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["username"], "alice");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_message_only_omits_user() {
        let json = serde_json::to_value(ApiResponse::message("Logged out successfully")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "Logged out successfully"})
        );
    }
}
