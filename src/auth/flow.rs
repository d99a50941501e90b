//! Authentication flow.
//!
//! [`AuthService`] implements signup, login, session lookup and logout on top
//! of a [`UserDirectory`], a [`CredentialHasher`] and a [`SessionTokenCodec`].
//! It holds no per-request state; every call runs its steps in sequence.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::directory::{DirectoryError, UniqueField, UserDirectory};
use super::password::{CredentialHasher, PasswordError};
use super::token::{IssueError, SessionTokenCodec};
use crate::db::{NewUser, PublicUser};

const MSG_FIELDS_REQUIRED: &str = "All fields are required!";
const MSG_EMAIL_TAKEN: &str = "User already exists.";
const MSG_USERNAME_TAKEN: &str = "Username is taken, try another name.";
const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials.";
const MSG_NO_TOKEN: &str = "No token provided.";
const MSG_INVALID_TOKEN: &str = "Invalid token";
const MSG_NO_USER: &str = "No user found.";

/// Message returned on successful signup.
pub const MSG_SIGNUP_OK: &str = "User created successfully.";
/// Message returned on successful login.
pub const MSG_LOGIN_OK: &str = "Logged in successfully.";
/// Message returned on logout.
pub const MSG_LOGOUT_OK: &str = "Logged out successfully";

/// Authentication failures.
///
/// Every variant except `Internal` carries the exact message shown to the
/// client. `Internal` carries the cause for logging only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Required input is missing.
    #[error("{0}")]
    Validation(String),

    /// Username or email is already registered.
    #[error("{0}")]
    Conflict(String),

    /// Unknown username or wrong password.
    #[error("Invalid credentials.")]
    InvalidCredentials,

    /// Missing or invalid session token.
    #[error("{0}")]
    Unauthorized(String),

    /// The session refers to a user that no longer exists.
    #[error("{0}")]
    NotFound(String),

    /// Unexpected fault in storage, hashing or token issuance.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Client-facing message for this error.
    pub fn message(&self) -> &str {
        match self {
            AuthError::Validation(msg)
            | AuthError::Conflict(msg)
            | AuthError::Unauthorized(msg)
            | AuthError::NotFound(msg) => msg,
            AuthError::InvalidCredentials => MSG_INVALID_CREDENTIALS,
            AuthError::Internal(_) => "Internal server error.",
        }
    }
}

impl From<DirectoryError> for AuthError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::Duplicate(field) => conflict_for(field),
            DirectoryError::Database(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        AuthError::Internal(e.to_string())
    }
}

impl From<IssueError> for AuthError {
    fn from(e: IssueError) -> Self {
        AuthError::Internal(e.to_string())
    }
}

fn conflict_for(field: UniqueField) -> AuthError {
    match field {
        UniqueField::Email => AuthError::Conflict(MSG_EMAIL_TAKEN.to_string()),
        UniqueField::Username => AuthError::Conflict(MSG_USERNAME_TAKEN.to_string()),
    }
}

/// An authenticated session: the user and the token that proves it.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: PublicUser,
    pub token: String,
}

/// Orchestrates the authentication operations.
#[derive(Clone)]
pub struct AuthService {
    directory: Arc<dyn UserDirectory>,
    hasher: CredentialHasher,
    tokens: SessionTokenCodec,
}

impl AuthService {
    /// Create a new AuthService.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        hasher: CredentialHasher,
        tokens: SessionTokenCodec,
    ) -> Self {
        Self {
            directory,
            hasher,
            tokens,
        }
    }

    /// The token codec in use.
    pub fn tokens(&self) -> &SessionTokenCodec {
        &self.tokens
    }

    /// Register a new user and open a session for them.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(MSG_FIELDS_REQUIRED.to_string()));
        }

        if self.directory.find_by_email(email).await?.is_some() {
            return Err(conflict_for(UniqueField::Email));
        }
        if self.directory.find_by_username(username).await?.is_some() {
            return Err(conflict_for(UniqueField::Username));
        }

        let password_hash = self.hasher.hash_async(password).await?;

        // A concurrent signup may have claimed the name since the checks above;
        // the store's unique constraint reports it as Duplicate.
        let user = self
            .directory
            .create(&NewUser::new(username, email, password_hash))
            .await?;

        let token = self.tokens.issue(&user.id)?;
        info!(user_id = %user.id, username = %user.username, "User signed up");

        Ok(Session {
            user: user.into_public(),
            token,
        })
    }

    /// Verify credentials and open a session.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let Some(user) = self.directory.find_by_username(username).await? else {
            debug!("Login rejected: unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify_async(password, &user.password).await? {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.id)?;
        info!(user_id = %user.id, "User logged in");

        Ok(Session {
            user: user.into_public(),
            token,
        })
    }

    /// Resolve a session token to its user.
    pub async fn fetch_user(&self, token: Option<&str>) -> Result<PublicUser, AuthError> {
        let token = token.ok_or_else(|| AuthError::Unauthorized(MSG_NO_TOKEN.to_string()))?;

        let user_id = self.tokens.validate(token).map_err(|e| {
            debug!("Rejecting session token: {}", e);
            AuthError::Unauthorized(MSG_INVALID_TOKEN.to_string())
        })?;

        self.directory
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AuthError::NotFound(MSG_NO_USER.to_string()))
    }

    /// End a session.
    ///
    /// Tokens are stateless, so this only records who left. It never fails.
    pub fn logout(&self, token: Option<&str>) {
        match token.map(|t| self.tokens.validate(t)) {
            Some(Ok(user_id)) => debug!(user_id = %user_id, "User logged out"),
            _ => debug!("Logout without a valid session"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::UserRepository;
    use crate::Database;

    async fn setup() -> AuthService {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool().clone());
        AuthService::new(
            Arc::new(repo),
            CredentialHasher::new(4),
            SessionTokenCodec::new("flow-test-secret"),
        )
    }

    #[tokio::test]
    async fn test_signup_success() {
        let auth = setup().await;

        let session = auth
            .signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap();

        assert_eq!(session.user.username, "alice");
        assert_eq!(session.user.email, "alice@x.com");
        assert_eq!(auth.tokens().validate(&session.token).unwrap(), session.user.id);
    }

    #[tokio::test]
    async fn test_signup_stores_hash_not_plaintext() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool().clone());
        let auth = AuthService::new(
            Arc::new(repo.clone()),
            CredentialHasher::new(4),
            SessionTokenCodec::new("flow-test-secret"),
        );

        auth.signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap();

        let stored = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_ne!(stored.password, "secret123");
        assert!(CredentialHasher::new(4).verify("secret123", &stored.password));
    }

    #[tokio::test]
    async fn test_signup_missing_fields() {
        let auth = setup().await;

        for (u, e, p) in [
            ("", "a@x.com", "pw"),
            ("alice", "", "pw"),
            ("alice", "a@x.com", ""),
            ("", "", ""),
        ] {
            let err = auth.signup(u, e, p).await.unwrap_err();
            assert_eq!(err, AuthError::Validation("All fields are required!".into()));
        }
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let auth = setup().await;
        auth.signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap();

        let err = auth
            .signup("bob", "alice@x.com", "other")
            .await
            .unwrap_err();
        assert_eq!(err.message(), "User already exists.");
        assert!(matches!(err, AuthError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_signup_duplicate_username() {
        let auth = setup().await;
        auth.signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap();

        let err = auth
            .signup("alice", "bob@x.com", "other")
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Username is taken, try another name.");
    }

    #[tokio::test]
    async fn test_signup_email_checked_before_username() {
        let auth = setup().await;
        auth.signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap();

        let err = auth
            .signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap_err();
        assert_eq!(err.message(), "User already exists.");
    }

    #[tokio::test]
    async fn test_concurrent_signups_one_wins() {
        let auth = setup().await;

        let (a, b) = tokio::join!(
            auth.signup("alice", "alice@x.com", "pw1"),
            auth.signup("alice", "alice@x.com", "pw2"),
        );

        let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(successes, 1);
        let failure = a.err().or(b.err()).unwrap();
        assert!(matches!(failure, AuthError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_login_success() {
        let auth = setup().await;
        let signed_up = auth
            .signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap();

        let session = auth.login("alice", "secret123").await.unwrap();
        assert_eq!(session.user, signed_up.user);
        assert_eq!(auth.tokens().validate(&session.token).unwrap(), signed_up.user.id);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let auth = setup().await;
        auth.signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap();

        let wrong_password = auth.login("alice", "wrong").await.unwrap_err();
        let unknown_user = auth.login("mallory", "secret123").await.unwrap_err();
        let empty = auth.login("", "").await.unwrap_err();

        assert_eq!(wrong_password, AuthError::InvalidCredentials);
        assert_eq!(unknown_user, AuthError::InvalidCredentials);
        assert_eq!(empty, AuthError::InvalidCredentials);
        assert_eq!(wrong_password.message(), "Invalid credentials.");
    }

    #[tokio::test]
    async fn test_fetch_user() {
        let auth = setup().await;
        let session = auth
            .signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap();

        let user = auth.fetch_user(Some(&session.token)).await.unwrap();
        assert_eq!(user, session.user);
    }

    #[tokio::test]
    async fn test_fetch_user_without_token() {
        let auth = setup().await;

        let err = auth.fetch_user(None).await.unwrap_err();
        assert_eq!(err, AuthError::Unauthorized("No token provided.".into()));
    }

    #[tokio::test]
    async fn test_fetch_user_invalid_tokens() {
        let auth = setup().await;
        let session = auth
            .signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap();

        let foreign = SessionTokenCodec::new("other-secret")
            .issue(&session.user.id)
            .unwrap();
        let expired = auth
            .tokens()
            .issue_at(&session.user.id, 1_000_000)
            .unwrap();

        for token in ["garbage", foreign.as_str(), expired.as_str()] {
            let err = auth.fetch_user(Some(token)).await.unwrap_err();
            assert_eq!(err, AuthError::Unauthorized("Invalid token".into()));
        }
    }

    #[tokio::test]
    async fn test_fetch_user_deleted_user() {
        let auth = setup().await;
        let token = auth.tokens().issue("no-such-id").unwrap();

        let err = auth.fetch_user(Some(&token)).await.unwrap_err();
        assert_eq!(err, AuthError::NotFound("No user found.".into()));
    }

    #[tokio::test]
    async fn test_logout_never_fails() {
        let auth = setup().await;
        let session = auth
            .signup("alice", "alice@x.com", "secret123")
            .await
            .unwrap();

        auth.logout(Some(&session.token));
        auth.logout(Some("garbage"));
        auth.logout(None);
    }

    #[test]
    fn test_internal_message_is_generic() {
        let err: AuthError = DirectoryError::Database("disk I/O error".into()).into();
        assert_eq!(err.message(), "Internal server error.");
        assert!(err.to_string().contains("disk I/O error"));
    }

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let err: AuthError = DirectoryError::Duplicate(UniqueField::Username).into();
        assert_eq!(err.message(), "Username is taken, try another name.");
    }
}
