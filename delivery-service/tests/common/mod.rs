//! Test helper module for delivery-service integration tests.
//!
//! Builds the real router over the in-memory repository so the suite runs
//! hermetically, no PostgreSQL required.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use delivery_service::config::{
    Config, DatabaseConfig, Environment, JwtConfig, KakaoPayConfig, SecurityConfig,
};
use delivery_service::services::InMemoryRepository;
use delivery_service::{build_router, AppState};
use secrecy::Secret;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use uuid::Uuid;

pub const TEST_ADMIN_SIGNUP_TOKEN: &str = "test-admin-signup-token";
pub const TEST_PASSWORD: &str = "mySecurePassword123";

pub fn test_config() -> Config {
    Config {
        environment: Environment::Dev,
        service_name: "delivery-service-test".to_string(),
        log_level: "error".to_string(),
        port: 0,
        database: DatabaseConfig {
            url: Secret::new("postgres://localhost/delivery_test".to_string()),
            max_connections: 5,
            min_connections: 1,
        },
        jwt: JwtConfig {
            secret: Secret::new("test-jwt-secret".to_string()),
            expiry_minutes: 15,
        },
        kakao: KakaoPayConfig {
            cid: "TC0ONETIME".to_string(),
            admin_key: Secret::new("test-kakao-admin-key".to_string()),
            api_base_url: "http://localhost:0".to_string(),
            approval_url: "http://localhost:3000/api/v1/pay/success".to_string(),
            cancel_url: "http://localhost:3000/api/v1/pay/cancel".to_string(),
            fail_url: "http://localhost:3000/api/v1/pay/fail".to_string(),
        },
        security: SecurityConfig {
            allowed_origins: vec!["*".to_string()],
            admin_signup_token: Secret::new(TEST_ADMIN_SIGNUP_TOKEN.to_string()),
        },
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::spawn_with(test_config())
    }

    pub fn spawn_with(config: Config) -> Self {
        let repository = Arc::new(InMemoryRepository::new());
        let state = AppState::new(config, repository);
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Issue a request against the router and decode the JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json_body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json_body.to_string()))
                .expect("Failed to build request"),
            None => builder.body(Body::empty()).expect("Failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    /// Register a user. Staff roles carry the admin signup token.
    pub async fn signup(&self, username: &str, role: &str) {
        let mut body = json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": TEST_PASSWORD,
            "role": role,
        });
        if role == "manager" || role == "master" {
            body["admin_token"] = json!(TEST_ADMIN_SIGNUP_TOKEN);
        }
        let (status, response) = self
            .request(Method::POST, "/api/v1/auth/signup", None, Some(body))
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", response);
    }

    pub async fn login(&self, username: &str) -> String {
        let (status, response) = self
            .request(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({ "username": username, "password": TEST_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", response);
        response["access_token"]
            .as_str()
            .expect("missing access_token")
            .to_string()
    }

    pub async fn signup_and_login(&self, username: &str, role: &str) -> String {
        self.signup(username, role).await;
        self.login(username).await
    }

    pub async fn create_store(&self, token: &str, name: &str) -> Uuid {
        let (status, response) = self
            .request(
                Method::POST,
                "/api/v1/stores",
                Some(token),
                Some(json!({
                    "name": name,
                    "phone": "02-1234-5678",
                    "categories": ["치킨"],
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "store create failed: {}", response);
        response["store_id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("missing store_id")
    }

    pub async fn create_product(&self, token: &str, store_id: Uuid, name: &str, price: i64) -> Uuid {
        let (status, response) = self
            .request(
                Method::POST,
                "/api/v1/products",
                Some(token),
                Some(json!({
                    "store_id": store_id,
                    "name": name,
                    "price": price,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "product create failed: {}", response);
        response["product_id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("missing product_id")
    }
}
