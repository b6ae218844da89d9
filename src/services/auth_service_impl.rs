use async_trait::async_trait;
use tracing::{debug, warn};

use crate::auth::jwt::{self, Claims, JwtConfig};
use crate::db::Store;
use crate::models::UserSummary;
use crate::services::auth_service::{AuthError, AuthService, LoginResult};

pub struct StoreAuthService {
    store: Store,
    jwt: JwtConfig,
}

impl StoreAuthService {
    #[must_use]
    pub const fn new(store: Store, jwt: JwtConfig) -> Self {
        Self { store, jwt }
    }
}

#[async_trait]
impl AuthService for StoreAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let Some(user) = self.store.verify_credentials(email, password).await? else {
            warn!(email = %email, "Failed login attempt");
            return Err(AuthError::InvalidCredentials);
        };

        let token = jwt::issue_token(&user, &self.jwt)?;
        debug!(user_id = %user.id, "Issued access token");

        Ok(LoginResult {
            token,
            user: UserSummary::from(&user),
        })
    }

    fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        jwt::validate_token(token, &self.jwt).map_err(|e| {
            debug!(error = %e, "Rejected access token");
            AuthError::InvalidToken
        })
    }
}
