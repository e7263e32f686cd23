pub mod config;
pub mod db;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use service_core::middleware::{request_id_middleware, security_headers_middleware};
use tower_http::{cors, cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::services::{
    AuthService, DeliveryRepository, JwtService, KakaoPayClient, OrderService, PayService,
    ProductService, StoreService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repository: Arc<dyn DeliveryRepository>,
    pub jwt: JwtService,
    pub auth: AuthService,
    pub stores: StoreService,
    pub products: ProductService,
    pub orders: OrderService,
    pub pay: PayService,
}

impl AppState {
    /// Wire the service layer over a repository implementation.
    pub fn new(config: Config, repository: Arc<dyn DeliveryRepository>) -> Self {
        let jwt = JwtService::new(&config.jwt);
        let auth = AuthService::new(repository.clone(), jwt.clone(), config.clone());
        let stores = StoreService::new(repository.clone());
        let products = ProductService::new(repository.clone());
        let orders = OrderService::new(repository.clone());
        let gateway = KakaoPayClient::new(config.kakao.clone());
        let pay = PayService::new(repository.clone(), gateway);

        Self {
            config,
            repository,
            jwt,
            auth,
            stores,
            products,
            orders,
            pay,
        }
    }
}

/// Health check endpoint for liveness probes.
async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "delivery-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Prometheus metrics endpoint.
async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        services::metrics::get_metrics(),
    )
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .allowed_origins
        .iter()
        .filter(|o| o.as_str() != "*")
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(cors::Any)
            .allow_headers(cors::Any)
    }
}

/// Assemble the application router. Public reads and auth endpoints are
/// open; every mutation sits behind the bearer-token middleware.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/auth/signup", post(handlers::auth::signup))
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .route("/api/v1/stores", get(handlers::stores::list_stores))
        .route("/api/v1/stores/:store_id", get(handlers::stores::get_store))
        .route("/api/v1/products", get(handlers::products::list_products));

    let protected_routes = Router::new()
        .route("/api/v1/stores", post(handlers::stores::create_store))
        .route("/api/v1/stores/my", get(handlers::stores::my_stores))
        .route(
            "/api/v1/stores/:store_id",
            put(handlers::stores::update_store).delete(handlers::stores::delete_store),
        )
        .route("/api/v1/products", post(handlers::products::create_product))
        .route(
            "/api/v1/products/:product_id",
            put(handlers::products::update_product).delete(handlers::products::delete_product),
        )
        .route("/api/v1/orders", post(handlers::orders::create_order))
        .route("/api/v1/orders/:order_id", get(handlers::orders::get_order))
        .route("/api/v1/pay/ready", post(handlers::pay::ready_to_pay))
        .route("/api/v1/pay/success", get(handlers::pay::after_pay))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .merge(public_routes)
        .merge(protected_routes)
        .layer(from_fn(middleware::metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
