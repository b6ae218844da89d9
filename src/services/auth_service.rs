//! Domain service for authentication.
//!
//! Issues access tokens on login and turns presented tokens back into the
//! identity they were issued for.

use serde::Serialize;
use thiserror::Error;

use crate::auth::Claims;
use crate::models::UserSummary;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<crate::auth::password::PasswordError> for AuthError {
    fn from(err: crate::auth::password::PasswordError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub user: UserSummary,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and issues an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown email and for a
    /// wrong password alike.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Decodes a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for bad signatures, malformed
    /// tokens and expired tokens.
    fn verify_token(&self, token: &str) -> Result<Claims, AuthError>;
}
