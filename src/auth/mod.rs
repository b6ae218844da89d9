//! Credential primitives: password hashing and signed access tokens.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtConfig};
