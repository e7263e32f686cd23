//! Role and ownership rules for store/product mutations, exercised through
//! the HTTP surface.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use common::TestApp;

const CUSTOMER_PRODUCT_DENIAL: &str = "CUSTOMER는 음식을 등록할 권한이 없습니다.";
const FOREIGN_STORE_PRODUCT_DENIAL: &str = "가게의 OWNER만 음식을 등록할 수 있습니다.";
const NOT_OWN_STORE_DENIAL: &str = "본인 점포만 수정이 가능합니다.";
const CUSTOMER_STORE_DENIAL: &str = "CUSTOMER는 점포를 등록할 권한이 없습니다.";

fn product_body(store_id: Uuid) -> serde_json::Value {
    json!({ "store_id": store_id, "name": "후라이드치킨", "price": 18000 })
}

#[tokio::test]
async fn customer_cannot_create_product() {
    let app = TestApp::spawn();
    let owner = app.signup_and_login("alice", "owner").await;
    let customer = app.signup_and_login("dan", "customer").await;
    let store_id = app.create_store(&owner, "알리스치킨").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(&customer),
            Some(product_body(store_id)),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], CUSTOMER_PRODUCT_DENIAL);
}

#[tokio::test]
async fn customer_is_denied_even_for_nonexistent_store() {
    // The role check fires before any store lookup, so a customer sees 403
    // rather than 404 for a made-up store id.
    let app = TestApp::spawn();
    let customer = app.signup_and_login("dan", "customer").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(&customer),
            Some(product_body(Uuid::new_v4())),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], CUSTOMER_PRODUCT_DENIAL);
}

#[tokio::test]
async fn owner_creates_products_only_in_own_store() {
    let app = TestApp::spawn();
    let alice = app.signup_and_login("alice", "owner").await;
    let bob = app.signup_and_login("bob", "owner").await;
    let store_id = app.create_store(&alice, "알리스치킨").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(&bob),
            Some(product_body(store_id)),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], FOREIGN_STORE_PRODUCT_DENIAL);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(&alice),
            Some(product_body(store_id)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn staff_create_products_in_any_store() {
    let app = TestApp::spawn();
    let alice = app.signup_and_login("alice", "owner").await;
    let manager = app.signup_and_login("carol", "manager").await;
    let master = app.signup_and_login("root", "master").await;
    let store_id = app.create_store(&alice, "알리스치킨").await;

    for token in [&manager, &master] {
        let (status, body) = app
            .request(
                Method::POST,
                "/api/v1/products",
                Some(token),
                Some(product_body(store_id)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "staff create failed: {}", body);
    }
}

#[tokio::test]
async fn staff_cannot_update_or_delete_products() {
    // Managers and masters may seed products anywhere but never mutate them
    // afterwards; update/delete stays owner-only.
    let app = TestApp::spawn();
    let alice = app.signup_and_login("alice", "owner").await;
    let manager = app.signup_and_login("carol", "manager").await;
    let master = app.signup_and_login("root", "master").await;
    let store_id = app.create_store(&alice, "알리스치킨").await;
    let product_id = app.create_product(&alice, store_id, "양념치킨", 19000).await;

    let update = json!({ "name": "간장치킨", "price": 20000 });
    for token in [&manager, &master] {
        let (status, body) = app
            .request(
                Method::PUT,
                &format!("/api/v1/products/{}", product_id),
                Some(token),
                Some(update.clone()),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], NOT_OWN_STORE_DENIAL);

        let (status, body) = app
            .request(
                Method::DELETE,
                &format!("/api/v1/products/{}", product_id),
                Some(token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], NOT_OWN_STORE_DENIAL);
    }
}

#[tokio::test]
async fn other_owner_cannot_update_or_delete_products() {
    let app = TestApp::spawn();
    let alice = app.signup_and_login("alice", "owner").await;
    let bob = app.signup_and_login("bob", "owner").await;
    let store_id = app.create_store(&alice, "알리스치킨").await;
    let product_id = app.create_product(&alice, store_id, "양념치킨", 19000).await;

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/v1/products/{}", product_id),
            Some(&bob),
            Some(json!({ "name": "간장치킨", "price": 20000 })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], NOT_OWN_STORE_DENIAL);

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/products/{}", product_id),
            Some(&bob),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], NOT_OWN_STORE_DENIAL);
}

#[tokio::test]
async fn customer_cannot_create_store() {
    let app = TestApp::spawn();
    let customer = app.signup_and_login("dan", "customer").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/stores",
            Some(&customer),
            Some(json!({ "name": "단이네", "phone": "02-0000-0000" })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], CUSTOMER_STORE_DENIAL);
}

#[tokio::test]
async fn store_mutation_is_owner_only() {
    let app = TestApp::spawn();
    let alice = app.signup_and_login("alice", "owner").await;
    let bob = app.signup_and_login("bob", "owner").await;
    let manager = app.signup_and_login("carol", "manager").await;
    let store_id = app.create_store(&alice, "알리스치킨").await;

    let update = json!({ "name": "알리스치킨2호점", "phone": "02-9999-8888" });
    for token in [&bob, &manager] {
        let (status, body) = app
            .request(
                Method::PUT,
                &format!("/api/v1/stores/{}", store_id),
                Some(token),
                Some(update.clone()),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], NOT_OWN_STORE_DENIAL);

        let (status, body) = app
            .request(
                Method::DELETE,
                &format!("/api/v1/stores/{}", store_id),
                Some(token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], NOT_OWN_STORE_DENIAL);
    }

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/api/v1/stores/{}", store_id),
            Some(&alice),
            Some(update),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_resources_yield_not_found_for_non_customers() {
    let app = TestApp::spawn();
    let owner = app.signup_and_login("alice", "owner").await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(&owner),
            Some(product_body(Uuid::new_v4())),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/api/v1/products/{}", Uuid::new_v4()),
            Some(&owner),
            Some(json!({ "name": "간장치킨", "price": 20000 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/stores/{}", Uuid::new_v4()),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mutations_require_a_bearer_token() {
    let app = TestApp::spawn();

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/stores",
            None,
            Some(json!({ "name": "무명가게", "phone": "02-0000-0000" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some("not-a-real-token"),
            Some(product_body(Uuid::new_v4())),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn mixed_role_scenario_end_to_end() {
    // alice and bob own one store each; carol manages; dan orders food.
    let app = TestApp::spawn();
    let alice = app.signup_and_login("alice", "owner").await;
    let bob = app.signup_and_login("bob", "owner").await;
    let carol = app.signup_and_login("carol", "manager").await;
    let dan = app.signup_and_login("dan", "customer").await;

    let alice_store = app.create_store(&alice, "알리스치킨").await;
    let bob_store = app.create_store(&bob, "밥스피자").await;

    // Each owner stocks their own store; carol seeds a promo item in both.
    let chicken = app.create_product(&alice, alice_store, "후라이드치킨", 18000).await;
    app.create_product(&bob, bob_store, "페퍼로니피자", 22000).await;
    app.create_product(&carol, alice_store, "이벤트콜라", 1000).await;
    app.create_product(&carol, bob_store, "이벤트콜라", 1000).await;

    // Cross-store mutation attempts all bounce.
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(&bob),
            Some(product_body(alice_store)),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/products/{}", chicken),
            Some(&carol),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // dan can read but not mutate.
    let (status, products) = app
        .request(
            Method::GET,
            &format!("/api/v1/products?store_id={}", alice_store),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(products.as_array().map(|a| a.len()), Some(2));

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(&dan),
            Some(json!({ "items": [{ "product_id": chicken, "quantity": 2 }] })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // alice still controls her own inventory.
    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/products/{}", chicken),
            Some(&alice),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}
