//! User model - registered accounts with a fixed role.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::role::UserRole;

/// User entity. The role is assigned at registration and never mutated.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_code: String,
    pub created_utc: DateTime<Utc>,
}

impl User {
    /// Create a new user with a hashed password.
    pub fn new(username: String, email: String, password_hash: String, role: UserRole) -> Self {
        Self {
            username,
            email,
            password_hash,
            role_code: role.as_str().to_string(),
            created_utc: Utc::now(),
        }
    }

    /// Parse the stored role code. The column only ever holds values written
    /// through [`UserRole::as_str`], so a parse failure is a data corruption.
    pub fn role(&self) -> Result<UserRole, anyhow::Error> {
        self.role_code
            .parse()
            .map_err(|e: String| anyhow::anyhow!("corrupt role code for {}: {}", self.username, e))
    }
}
