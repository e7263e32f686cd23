//! Auth service: registration and login.

use std::sync::Arc;

use secrecy::ExposeSecret;
use service_core::error::AppError;

use crate::config::Config;
use crate::dtos::auth::{LoginRequest, SignupRequest};
use crate::models::{User, UserRole};
use crate::utils::password::{hash_password, verify_password, Password, PasswordHashString};

use super::jwt::{JwtService, TokenResponse};
use super::repository::DeliveryRepository;

#[derive(Clone)]
pub struct AuthService {
    repository: Arc<dyn DeliveryRepository>,
    jwt: JwtService,
    config: Config,
}

impl AuthService {
    pub fn new(repository: Arc<dyn DeliveryRepository>, jwt: JwtService, config: Config) -> Self {
        Self {
            repository,
            jwt,
            config,
        }
    }

    /// Register a new account. Staff roles (manager/master) are gated behind
    /// the admin signup token; without it only customer/owner are allowed.
    pub async fn signup(&self, request: SignupRequest) -> Result<String, AppError> {
        let role: UserRole = request
            .role
            .as_deref()
            .unwrap_or("customer")
            .parse()
            .map_err(|e: String| AppError::BadRequest(anyhow::anyhow!(e)))?;

        if role.is_privileged() {
            let expected = self.config.security.admin_signup_token.expose_secret();
            if request.admin_token.as_deref() != Some(expected.as_str()) {
                return Err(AppError::Forbidden(anyhow::anyhow!(
                    "admin token required to register a {} account",
                    role
                )));
            }
        }

        if self
            .repository
            .find_user(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "username {} is already taken",
                request.username
            )));
        }
        if self
            .repository
            .find_user_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "email {} is already registered",
                request.email
            )));
        }

        let hash = hash_password(&Password::new(request.password))?;
        let user = User::new(request.username, request.email, hash.into_string(), role);
        self.repository.insert_user(&user).await?;

        tracing::info!(username = %user.username, role = %user.role_code, "User registered");
        Ok(user.username)
    }

    /// Verify credentials and issue an access token.
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, AppError> {
        let user = self
            .repository
            .find_user(&request.username)
            .await?
            .ok_or_else(|| AppError::AuthError(anyhow::anyhow!("invalid credentials")))?;

        verify_password(
            &Password::new(request.password),
            &PasswordHashString::new(user.password_hash.clone()),
        )
        .map_err(|_| AppError::AuthError(anyhow::anyhow!("invalid credentials")))?;

        let role = user.role().map_err(AppError::InternalError)?;
        let access_token = self.jwt.generate_access_token(&user.username, role)?;

        Ok(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt.expiry_seconds(),
        })
    }
}
