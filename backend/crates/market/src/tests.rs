//! Router tests against the seeded in-memory store

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use auth::{AuthConfig, sign_init_data};
use platform::secret::Secret;

use crate::application::config::MarketConfig;
use crate::infra::memory::MemoryMarketStore;
use crate::presentation::market_router_generic;

const BOT_TOKEN: &str = "123456:market-test-token";
const ADMIN_TG_ID: i64 = 25125327;

struct Reply {
    status: StatusCode,
    cookie: Option<String>,
    body: Value,
}

fn auth_config() -> AuthConfig {
    AuthConfig {
        telegram_bot_token: Some(Secret::new(BOT_TOKEN)),
        ..AuthConfig::development()
    }
}

fn app_with(auth_config: AuthConfig) -> Router {
    market_router_generic(
        MemoryMarketStore::seeded(),
        auth_config,
        MarketConfig::default(),
    )
}

fn app() -> Router {
    app_with(auth_config())
}

fn init_data(tg_id: i64, first_name: &str) -> String {
    let user = json!({ "id": tg_id, "first_name": first_name, "username": "tester" }).to_string();
    let auth_date = chrono::Utc::now().timestamp().to_string();
    sign_init_data(
        &[("auth_date", &auth_date), ("query_id", "AAHdF6IQ"), ("user", &user)],
        BOT_TOKEN.as_bytes(),
    )
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    Reply {
        status,
        cookie,
        body,
    }
}

/// `name=value` part of a `Set-Cookie` header
fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().to_string()
}

async fn login(app: &Router, role: &str) -> String {
    let reply = send(
        app,
        "POST",
        "/auth/demo-login",
        None,
        Some(json!({ "role": role })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "demo login as {role}");
    cookie_pair(&reply.cookie.unwrap())
}

fn find<'a>(items: &'a Value, key: &str, value: &str) -> &'a Value {
    items
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item[key] == value)
        .unwrap()
}

// ============================================================================
// Bootstrap
// ============================================================================

#[tokio::test]
async fn test_bootstrap_anonymous() {
    let app = app();
    let reply = send(&app, "GET", "/bootstrap", None, None).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["authenticated"], false);
    assert_eq!(reply.body["appName"], "ОптМаркет РФ — Telegram Mini App");
    assert!(reply.body.get("buyerData").is_none());
}

#[tokio::test]
async fn test_bootstrap_ignores_forged_cookie() {
    let app = app();
    let reply = send(&app, "GET", "/bootstrap", Some("om_session=abc.def"), None).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["authenticated"], false);
}

#[tokio::test]
async fn test_bootstrap_per_role() {
    let app = app();

    let buyer = login(&app, "buyer").await;
    let reply = send(&app, "GET", "/bootstrap", Some(&buyer), None).await;
    assert_eq!(reply.body["authenticated"], true);
    assert_eq!(reply.body["user"]["role"], "buyer");
    let data = &reply.body["buyerData"];
    assert_eq!(data["stores"].as_array().unwrap().len(), 2);
    assert_eq!(data["products"].as_array().unwrap().len(), 4);
    assert_eq!(data["orders"].as_array().unwrap().len(), 1);

    let seller = login(&app, "seller").await;
    let reply = send(&app, "GET", "/bootstrap", Some(&seller), None).await;
    let data = &reply.body["sellerData"];
    assert_eq!(data["store"]["id"], "store_00000001");
    assert_eq!(data["products"].as_array().unwrap().len(), 2);
    assert_eq!(data["orders"].as_array().unwrap().len(), 1);

    let admin = login(&app, "admin").await;
    let reply = send(&app, "GET", "/bootstrap", Some(&admin), None).await;
    let metrics = &reply.body["adminData"]["metrics"];
    assert_eq!(metrics["totalRevenueRub"], 16500);
    assert_eq!(metrics["totalOrders"], 1);
    assert_eq!(metrics["activeStores"], 2);
    assert_eq!(reply.body["adminData"]["users"].as_array().unwrap().len(), 3);
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_demo_login_sets_session_cookie() {
    let app = app();
    let reply = send(
        &app,
        "POST",
        "/auth/demo-login",
        None,
        Some(json!({ "role": "seller" })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["ok"], true);
    assert_eq!(reply.body["user"]["id"], "usr_00000002");
    let cookie = reply.cookie.unwrap();
    assert!(cookie.starts_with("om_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=1209600"));
}

#[tokio::test]
async fn test_demo_login_rejections() {
    let app = app();
    let reply = send(
        &app,
        "POST",
        "/auth/demo-login",
        None,
        Some(json!({ "role": "owner" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "role is required");

    let disabled = app_with(AuthConfig {
        demo_login_enabled: false,
        ..auth_config()
    });
    let reply = send(
        &disabled,
        "POST",
        "/auth/demo-login",
        None,
        Some(json!({ "role": "buyer" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.cookie.is_none());
}

#[tokio::test]
async fn test_telegram_login_unregistered() {
    let app = app();
    let reply = send(
        &app,
        "POST",
        "/auth/telegram",
        None,
        Some(json!({ "initData": init_data(777_001, "Ivan") })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["registered"], false);
    assert_eq!(reply.body["telegramUser"]["id"], 777_001);
    assert_eq!(reply.body["telegramUser"]["firstName"], "Ivan");
    assert!(reply.body["telegramUser"].get("lastName").is_none());
    assert!(reply.cookie.is_none());
}

#[tokio::test]
async fn test_telegram_login_admin_is_upserted() {
    let app = app();
    let reply = send(
        &app,
        "POST",
        "/auth/telegram",
        None,
        Some(json!({ "initData": init_data(ADMIN_TG_ID, "Root") })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["registered"], true);
    assert_eq!(reply.body["user"]["role"], "admin");
    assert_eq!(reply.body["user"]["fullName"], "Root");

    let cookie = cookie_pair(&reply.cookie.unwrap());
    let reply = send(&app, "GET", "/bootstrap", Some(&cookie), None).await;
    assert!(reply.body.get("adminData").is_some());
}

#[tokio::test]
async fn test_telegram_login_rejections() {
    let app = app();

    let reply = send(&app, "POST", "/auth/telegram", None, Some(json!({}))).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "initData is required");

    let tampered = init_data(777_002, "Ivan").replace("Ivan", "Petr");
    let reply = send(
        &app,
        "POST",
        "/auth/telegram",
        None,
        Some(json!({ "initData": tampered })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["error"], "Invalid initData hash");

    let no_token = app_with(AuthConfig::development());
    let reply = send(
        &no_token,
        "POST",
        "/auth/telegram",
        None,
        Some(json!({ "initData": init_data(777_002, "Ivan") })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_register_seller_then_login() {
    let app = app();
    let payload = json!({
        "initData": init_data(880_001, "Olga"),
        "role": "seller",
        "fullName": "Ольга Смирнова",
        "phone": "+7 900 111-22-33",
        "storeData": { "name": "Посуда Опт", "city": "Казань", "minOrderRub": "5000" }
    });

    let reply = send(&app, "POST", "/auth/register", None, Some(payload.clone())).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["user"]["role"], "seller");
    let cookie = cookie_pair(&reply.cookie.unwrap());

    let reply = send(&app, "GET", "/bootstrap", Some(&cookie), None).await;
    let store = &reply.body["sellerData"]["store"];
    assert_eq!(store["name"], "Посуда Опт");
    assert_eq!(store["minOrderRub"], 5000);
    assert_eq!(store["deliveryDays"], 2);
    assert_eq!(store["verified"], false);

    let reply = send(&app, "POST", "/auth/register", None, Some(payload)).await;
    assert_eq!(reply.status, StatusCode::CONFLICT);

    let reply = send(
        &app,
        "POST",
        "/auth/telegram",
        None,
        Some(json!({ "initData": init_data(880_001, "Olga") })),
    )
    .await;
    assert_eq!(reply.body["registered"], true);
    assert_eq!(reply.body["user"]["fullName"], "Olga");
}

#[tokio::test]
async fn test_register_validation() {
    let app = app();
    let reply = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "initData": init_data(880_002, "Pavel"),
            "role": "buyer",
            "fullName": "Павел",
            "phone": "   "
        })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "Укажите телефон");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = app();
    let reply = send(&app, "POST", "/auth/logout", None, None).await;

    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    assert!(reply.cookie.unwrap().contains("Max-Age=0"));
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn test_checkout_requires_session() {
    let app = app();
    let reply = send(
        &app,
        "POST",
        "/orders/checkout",
        None,
        Some(json!({ "items": [], "deliveryAddress": "Москва" })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_checkout_splits_orders_per_store() {
    let app = app();
    let buyer = login(&app, "buyer").await;

    let reply = send(
        &app,
        "POST",
        "/orders/checkout",
        Some(&buyer),
        Some(json!({
            "items": [
                { "productId": "prd_00000001", "qty": 10 },
                { "productId": "prd_00000003", "qty": "5" }
            ],
            "deliveryAddress": "Москва, Складская 1",
            "comment": ""
        })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::CREATED);
    let orders = &reply.body["orders"];
    assert_eq!(orders.as_array().unwrap().len(), 2);

    let textile = find(orders, "storeId", "store_00000001");
    assert_eq!(textile["status"], "new");
    assert_eq!(textile["subtotalRub"], 14500);
    assert_eq!(textile["totalRub"], 16500);
    assert!(textile.get("comment").is_none_or(Value::is_null));

    let tableware = find(orders, "storeId", "store_00000002");
    assert_eq!(tableware["subtotalRub"], 4450);

    let seller = login(&app, "seller").await;
    let reply = send(&app, "GET", "/seller/products", Some(&seller), None).await;
    let product = find(&reply.body["products"], "id", "prd_00000001");
    assert_eq!(product["stock"], 490);
}

#[tokio::test]
async fn test_checkout_failure_writes_nothing() {
    let app = app();
    let buyer = login(&app, "buyer").await;

    let reply = send(
        &app,
        "POST",
        "/orders/checkout",
        Some(&buyer),
        Some(json!({
            "items": [
                { "productId": "prd_00000001", "qty": 10 },
                { "productId": "prd_00000004", "qty": 100 }
            ],
            "deliveryAddress": "Москва"
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(
        reply.body["error"]
            .as_str()
            .unwrap()
            .ends_with("only 40 pcs left")
    );

    let reply = send(&app, "GET", "/bootstrap", Some(&buyer), None).await;
    let data = &reply.body["buyerData"];
    assert_eq!(data["orders"].as_array().unwrap().len(), 1);
    assert_eq!(find(&data["products"], "id", "prd_00000001")["stock"], 500);
}

#[tokio::test]
async fn test_checkout_rejections() {
    let app = app();
    let buyer = login(&app, "buyer").await;

    let reply = send(
        &app,
        "POST",
        "/orders/checkout",
        Some(&buyer),
        Some(json!({
            "items": [{ "productId": "prd_00000002", "qty": 5 }],
            "deliveryAddress": "Москва"
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(
        reply.body["error"]
            .as_str()
            .unwrap()
            .ends_with("minimum order is 20")
    );

    let reply = send(
        &app,
        "POST",
        "/orders/checkout",
        Some(&buyer),
        Some(json!({
            "items": [{ "productId": "prd_missing", "qty": 5 }],
            "deliveryAddress": "Москва"
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = send(
        &app,
        "POST",
        "/orders/checkout",
        Some(&buyer),
        Some(json!({
            "items": [{ "productId": "prd_00000001", "qty": 0 }],
            "deliveryAddress": "Москва"
        })),
    )
    .await;
    assert_eq!(reply.body["error"], "Invalid cart item");

    let seller = login(&app, "seller").await;
    let reply = send(
        &app,
        "POST",
        "/orders/checkout",
        Some(&seller),
        Some(json!({
            "items": [{ "productId": "prd_00000003", "qty": 5 }],
            "deliveryAddress": "Москва"
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_huge_amounts_are_capped() {
    let app = app();
    let seller = login(&app, "seller").await;

    let reply = send(
        &app,
        "POST",
        "/seller/products",
        Some(&seller),
        Some(json!({ "name": "Ящик", "sku": "BIG-1", "priceRub": 2, "stock": 1e19 })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["product"]["stock"], 1_000_000_000);
    let product_id = reply.body["product"]["id"].as_str().unwrap().to_string();

    let buyer = login(&app, "buyer").await;
    let reply = send(
        &app,
        "POST",
        "/orders/checkout",
        Some(&buyer),
        Some(json!({
            "items": [{ "productId": product_id, "qty": 1e19 }],
            "deliveryAddress": "Москва"
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(
        reply.body["error"]
            .as_str()
            .unwrap()
            .ends_with("only 1000000000 pcs left")
    );
}

#[tokio::test]
async fn test_checkout_rejects_total_overflow() {
    let app = app();
    let seller = login(&app, "seller").await;

    let mut items = Vec::new();
    for n in 0..10 {
        let reply = send(
            &app,
            "POST",
            "/seller/products",
            Some(&seller),
            Some(json!({
                "name": format!("Станок {n}"),
                "sku": format!("MX-{n}"),
                "priceRub": 1e19,
                "stock": 1e19
            })),
        )
        .await;
        assert_eq!(reply.body["product"]["priceRub"], 1_000_000_000);
        items.push(json!({ "productId": reply.body["product"]["id"], "qty": 1_000_000_000 }));
    }

    let buyer = login(&app, "buyer").await;
    let reply = send(
        &app,
        "POST",
        "/orders/checkout",
        Some(&buyer),
        Some(json!({ "items": items, "deliveryAddress": "Москва" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "Order total is too large");

    let reply = send(&app, "GET", "/seller/products", Some(&seller), None).await;
    let untouched = reply.body["products"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|product| product["stock"] == 1_000_000_000)
        .count();
    assert_eq!(untouched, 10);
}

#[tokio::test]
async fn test_order_status_updates() {
    let app = app();
    let seller = login(&app, "seller").await;

    let reply = send(
        &app,
        "PATCH",
        "/orders/ord_00000001/status",
        Some(&seller),
        Some(json!({ "status": "shipping" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["order"]["status"], "shipping");

    let reply = send(
        &app,
        "PATCH",
        "/orders/ord_00000001/status",
        Some(&seller),
        Some(json!({ "status": "lost" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "Invalid status");

    let buyer = login(&app, "buyer").await;
    let reply = send(
        &app,
        "PATCH",
        "/orders/ord_00000001/status",
        Some(&buyer),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);

    let admin = login(&app, "admin").await;
    let reply = send(
        &app,
        "PATCH",
        "/orders/ord_missing/status",
        Some(&admin),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_seller_cannot_touch_foreign_order() {
    let app = app();
    let buyer = login(&app, "buyer").await;
    let reply = send(
        &app,
        "POST",
        "/orders/checkout",
        Some(&buyer),
        Some(json!({
            "items": [{ "productId": "prd_00000003", "qty": 5 }],
            "deliveryAddress": "Москва"
        })),
    )
    .await;
    let order_id = reply.body["orders"][0]["id"].as_str().unwrap().to_string();

    let seller = login(&app, "seller").await;
    let reply = send(
        &app,
        "PATCH",
        &format!("/orders/{order_id}/status"),
        Some(&seller),
        Some(json!({ "status": "confirmed" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.body["error"], "Cannot update foreign store order");
}

// ============================================================================
// Seller products
// ============================================================================

#[tokio::test]
async fn test_product_create_and_patch() {
    let app = app();
    let seller = login(&app, "seller").await;

    let reply = send(
        &app,
        "POST",
        "/seller/products",
        Some(&seller),
        Some(json!({
            "name": "Плед флисовый",
            "sku": "TX-300",
            "priceRub": "99.6",
            "tags": [" зима ", ""]
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    let product = &reply.body["product"];
    assert_eq!(product["storeId"], "store_00000001");
    assert_eq!(product["category"], "Без категории");
    assert_eq!(product["priceRub"], 100);
    assert_eq!(product["minQty"], 1);
    assert_eq!(product["stock"], 0);
    assert_eq!(product["tags"], json!(["зима"]));
    let product_id = product["id"].as_str().unwrap().to_string();

    let reply = send(&app, "GET", "/seller/products", Some(&seller), None).await;
    assert_eq!(reply.body["products"].as_array().unwrap().len(), 3);
    find(&reply.body["products"], "id", &product_id);

    let reply = send(
        &app,
        "PATCH",
        &format!("/seller/products/{product_id}"),
        Some(&seller),
        Some(json!({ "category": "Новинки", "stock": 15 })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["product"]["category"], "Новинки");
    assert_eq!(reply.body["product"]["stock"], 15);
    assert_eq!(reply.body["product"]["priceRub"], 100);

    let reply = send(
        &app,
        "PATCH",
        &format!("/seller/products/{product_id}"),
        Some(&seller),
        Some(json!({ "stock": null })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["product"]["stock"], 0);

    let admin = login(&app, "admin").await;
    let reply = send(&app, "GET", "/admin/stores", Some(&admin), None).await;
    let store = find(&reply.body["stores"], "id", "store_00000001");
    assert!(
        store["categories"]
            .as_array()
            .unwrap()
            .contains(&json!("Новинки"))
    );
}

#[tokio::test]
async fn test_product_access_rules() {
    let app = app();

    let seller = login(&app, "seller").await;
    let reply = send(
        &app,
        "PATCH",
        "/seller/products/prd_00000003",
        Some(&seller),
        Some(json!({ "stock": 1 })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);

    let reply = send(
        &app,
        "POST",
        "/seller/products",
        Some(&seller),
        Some(json!({ "name": "Без артикула" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "name and sku are required");

    let admin = login(&app, "admin").await;
    let reply = send(&app, "GET", "/seller/products", Some(&admin), None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "storeId is required");

    let reply = send(
        &app,
        "GET",
        "/seller/products?storeId=store_00000002",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(reply.body["products"].as_array().unwrap().len(), 2);

    let buyer = login(&app, "buyer").await;
    let reply = send(&app, "GET", "/seller/products", Some(&buyer), None).await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
}

// ============================================================================
// Admin
// ============================================================================

#[tokio::test]
async fn test_admin_guard() {
    let app = app();

    let reply = send(&app, "GET", "/admin/users", None, None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let seller = login(&app, "seller").await;
    let reply = send(&app, "GET", "/admin/users", Some(&seller), None).await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.body["error"], "Admin access required");
}

#[tokio::test]
async fn test_admin_creates_store_and_users() {
    let app = app();
    let admin = login(&app, "admin").await;

    let reply = send(
        &app,
        "POST",
        "/admin/stores",
        Some(&admin),
        Some(json!({ "name": "Хозтовары", "city": "Самара", "deliveryDays": 0 })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    let store = &reply.body["store"];
    assert_eq!(store["verified"], true);
    assert_eq!(store["rating"], 5.0);
    assert_eq!(store["deliveryDays"], 2);
    let store_id = store["id"].as_str().unwrap().to_string();

    let reply = send(
        &app,
        "POST",
        "/admin/users",
        Some(&admin),
        Some(json!({ "fullName": "Новый Продавец", "role": "seller", "storeId": store_id, "tgId": 990_001 })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["user"]["storeId"], store_id.as_str());

    let reply = send(
        &app,
        "POST",
        "/admin/users",
        Some(&admin),
        Some(json!({ "fullName": "Двойник", "role": "buyer", "tgId": "990001" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);

    let reply = send(&app, "GET", "/admin/users", Some(&admin), None).await;
    assert_eq!(reply.body["users"].as_array().unwrap().len(), 4);
    let created = find(&reply.body["users"], "fullName", "Новый Продавец");
    assert_eq!(created["role"], "seller");
    assert!(created.get("tgId").is_none());
}

#[tokio::test]
async fn test_admin_user_rejections() {
    let app = app();
    let admin = login(&app, "admin").await;

    let cases = [
        (
            json!({ "fullName": "Босс", "role": "admin" }),
            StatusCode::FORBIDDEN,
        ),
        (
            json!({ "fullName": "Без магазина", "role": "seller" }),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!({ "fullName": "Чужой", "role": "seller", "storeId": "store_missing" }),
            StatusCode::NOT_FOUND,
        ),
        (
            json!({ "fullName": "Кто-то", "role": "owner" }),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!({ "fullName": "Дробный", "role": "buyer", "tgId": 12.5 }),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!({ "fullName": "Огромный", "role": "buyer", "tgId": 1e30 }),
            StatusCode::BAD_REQUEST,
        ),
    ];

    for (body, status) in cases {
        let reply = send(&app, "POST", "/admin/users", Some(&admin), Some(body.clone())).await;
        assert_eq!(reply.status, status, "{body}");
        assert!(reply.body["error"].is_string());
    }

    let reply = send(&app, "GET", "/admin/users", Some(&admin), None).await;
    let users = reply.body["users"].as_array().unwrap();
    assert!(users.iter().all(|user| user["fullName"] != "Дробный"));
}
