use crate::auth::password::{PasswordError, verify_password_blocking};
use crate::models::UserRecord;

#[must_use]
pub fn find_by_email<'a>(users: &'a [UserRecord], email: &str) -> Option<&'a UserRecord> {
    users.iter().find(|u| u.email == email)
}

/// Checks `password` against the stored hash of `user`.
///
/// Argon2 verification runs on the blocking pool. A stored hash that cannot be
/// parsed is an error, not a mismatch.
pub async fn verify_password(user: &UserRecord, password: &str) -> Result<bool, PasswordError> {
    verify_password_blocking(password.to_string(), user.password.clone()).await
}
