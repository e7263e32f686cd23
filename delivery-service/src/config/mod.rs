//! Environment-based configuration.
//!
//! Secrets are wrapped in `secrecy::Secret` so they never land in debug
//! output. In prod every value without an explicit environment variable is a
//! startup error; in dev, sensible local defaults apply.

use anyhow::anyhow;
use secrecy::Secret;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub kakao: KakaoPayConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Dev,
    Prod,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(format!("unknown environment: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub expiry_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct KakaoPayConfig {
    /// Gateway merchant code; `TC0ONETIME` is the shared test merchant.
    pub cid: String,
    pub admin_key: Secret<String>,
    pub api_base_url: String,
    pub approval_url: String,
    pub cancel_url: String,
    pub fail_url: String,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
    /// Token required to register manager/master accounts.
    pub admin_signup_token: Secret<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = env_str
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow!(e)))?;
        let is_prod = environment == Environment::Prod;

        let config = Config {
            environment,
            service_name: get_env("SERVICE_NAME", Some("delivery-service"), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            port: parse(get_env("DELIVERY_SERVICE_PORT", Some("3000"), is_prod)?)?,
            database: DatabaseConfig {
                url: Secret::new(get_env(
                    "DATABASE_URL",
                    Some("postgres://localhost/delivery"),
                    is_prod,
                )?),
                max_connections: parse(get_env("DATABASE_MAX_CONNECTIONS", Some("10"), is_prod)?)?,
                min_connections: parse(get_env("DATABASE_MIN_CONNECTIONS", Some("1"), is_prod)?)?,
            },
            jwt: JwtConfig {
                secret: Secret::new(get_env("JWT_SECRET", Some("dev-jwt-secret"), is_prod)?),
                expiry_minutes: parse(get_env("JWT_EXPIRY_MINUTES", Some("60"), is_prod)?)?,
            },
            kakao: KakaoPayConfig {
                cid: get_env("KAKAOPAY_CID", Some("TC0ONETIME"), is_prod)?,
                admin_key: Secret::new(get_env("KAKAOPAY_ADMIN_KEY", Some("dev-admin-key"), is_prod)?),
                api_base_url: get_env(
                    "KAKAOPAY_API_BASE_URL",
                    Some("https://kapi.kakao.com"),
                    is_prod,
                )?,
                approval_url: get_env(
                    "KAKAOPAY_APPROVAL_URL",
                    Some("http://localhost:3000/api/v1/pay/success"),
                    is_prod,
                )?,
                cancel_url: get_env(
                    "KAKAOPAY_CANCEL_URL",
                    Some("http://localhost:3000/api/v1/pay/cancel"),
                    is_prod,
                )?,
                fail_url: get_env(
                    "KAKAOPAY_FAIL_URL",
                    Some("http://localhost:3000/api/v1/pay/fail"),
                    is_prod,
                )?,
            },
            security: SecurityConfig {
                allowed_origins: get_env("ALLOWED_ORIGINS", Some("*"), is_prod)?
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                admin_signup_token: Secret::new(get_env(
                    "ADMIN_SIGNUP_TOKEN",
                    Some("dev-admin-signup-token"),
                    is_prod,
                )?),
            },
        };

        Ok(config)
    }
}

/// Read an environment variable. Defaults apply in dev only; in prod a
/// missing variable is a configuration error.
fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(_) => match default {
            Some(value) if !is_prod => Ok(value.to_string()),
            _ => Err(AppError::ConfigError(anyhow!("{} must be set", key))),
        },
    }
}

fn parse<T>(value: String) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| AppError::ConfigError(anyhow!("{}: {}", value, e)))
}
