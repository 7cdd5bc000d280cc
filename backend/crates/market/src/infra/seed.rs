//! Demo Data
//!
//! A small marketplace for local runs without a database and for tests:
//! one admin, one seller with a store, one buyer, a second store without a
//! seller, four products and one delivered order.

use auth::UserRole;
use chrono::{Duration, Utc};
use kernel::id::{OrderId, ProductId, StoreId, UserId};

use crate::application::config::{DEFAULT_STORE_COVER_URL, DEFAULT_STORE_LOGO_URL};
use crate::domain::entity::{
    database::{Database, Meta},
    order::{Order, OrderItem},
    product::Product,
    store::Store,
    user::User,
};
use crate::domain::value_object::order_status::OrderStatus;

pub const DEMO_ADMIN_ID: &str = "usr_00000001";
pub const DEMO_SELLER_ID: &str = "usr_00000002";
pub const DEMO_BUYER_ID: &str = "usr_00000003";
pub const DEMO_TEXTILE_STORE_ID: &str = "store_00000001";
pub const DEMO_TABLEWARE_STORE_ID: &str = "store_00000002";

const PRODUCT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1522771739844-6a9f6d5f14af?auto=format&fit=crop&w=700&q=80";

pub fn demo_database() -> Database {
    let now = Utc::now();
    let days_ago = |days: i64| now - Duration::days(days);

    let users = vec![
        User {
            id: UserId::from_string(DEMO_ADMIN_ID),
            tg_id: None,
            role: UserRole::Admin,
            full_name: "Администратор ОптМаркет".to_string(),
            phone: "+7 900 000-00-01".to_string(),
            store_id: None,
            created_at: days_ago(30),
        },
        User {
            id: UserId::from_string(DEMO_SELLER_ID),
            tg_id: None,
            role: UserRole::Seller,
            full_name: "Ольга Смирнова".to_string(),
            phone: "+7 900 000-00-02".to_string(),
            store_id: Some(StoreId::from_string(DEMO_TEXTILE_STORE_ID)),
            created_at: days_ago(29),
        },
        User {
            id: UserId::from_string(DEMO_BUYER_ID),
            tg_id: None,
            role: UserRole::Buyer,
            full_name: "Иван Петров".to_string(),
            phone: "+7 900 000-00-03".to_string(),
            store_id: None,
            created_at: days_ago(20),
        },
    ];

    let store = |id: &str, name: &str, city: &str, categories: &[&str]| Store {
        id: StoreId::from_string(id),
        name: name.to_string(),
        city: city.to_string(),
        address: String::new(),
        description: String::new(),
        phone: String::new(),
        min_order_rub: 15_000,
        delivery_days: 3,
        rating: 4.8,
        verified: true,
        logo_url: DEFAULT_STORE_LOGO_URL.to_string(),
        cover_url: DEFAULT_STORE_COVER_URL.to_string(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        created_at: days_ago(29),
    };

    let mut textile = store(
        DEMO_TEXTILE_STORE_ID,
        "ТекстильОпт",
        "Иваново",
        &["Постельное бельё", "Полотенца"],
    );
    textile.address = "ул. Ленина, 12".to_string();
    textile.description = "Домашний текстиль оптом от производителя".to_string();

    let mut tableware = store(
        DEMO_TABLEWARE_STORE_ID,
        "ПосудаМаркет",
        "Москва",
        &["Тарелки", "Кружки"],
    );
    tableware.min_order_rub = 10_000;
    tableware.delivery_days = 2;
    tableware.rating = 4.5;

    let product = |id: &str, store_id: &str, name: &str, sku: &str, category: &str| Product {
        id: ProductId::from_string(id),
        store_id: StoreId::from_string(store_id),
        name: name.to_string(),
        sku: sku.to_string(),
        category: category.to_string(),
        price_rub: 1,
        min_qty: 1,
        stock: 0,
        image_url: PRODUCT_IMAGE_URL.to_string(),
        description: String::new(),
        tags: Vec::new(),
        created_at: days_ago(28),
        updated_at: days_ago(28),
    };

    let products = vec![
        Product {
            price_rub: 1_450,
            min_qty: 10,
            stock: 500,
            tags: vec!["хлопок".to_string(), "поплин".to_string()],
            ..product(
                "prd_00000001",
                DEMO_TEXTILE_STORE_ID,
                "Комплект постельного белья 1,5-сп.",
                "TX-101",
                "Постельное бельё",
            )
        },
        Product {
            price_rub: 320,
            min_qty: 20,
            stock: 1_200,
            ..product(
                "prd_00000002",
                DEMO_TEXTILE_STORE_ID,
                "Полотенце махровое 50×90",
                "TX-205",
                "Полотенца",
            )
        },
        Product {
            price_rub: 890,
            min_qty: 5,
            stock: 300,
            ..product(
                "prd_00000003",
                DEMO_TABLEWARE_STORE_ID,
                "Набор тарелок, 6 шт.",
                "PM-011",
                "Тарелки",
            )
        },
        Product {
            price_rub: 210,
            min_qty: 24,
            stock: 40,
            ..product(
                "prd_00000004",
                DEMO_TABLEWARE_STORE_ID,
                "Кружка керамическая 350 мл",
                "PM-042",
                "Кружки",
            )
        },
    ];

    let items = vec![OrderItem {
        product_id: ProductId::from_string("prd_00000001"),
        name: "Комплект постельного белья 1,5-сп.".to_string(),
        sku: "TX-101".to_string(),
        qty: 10,
        price_rub: 1_450,
    }];
    let subtotal_rub = 10 * 1_450;

    let orders = vec![Order {
        id: OrderId::from_string("ord_00000001"),
        buyer_id: UserId::from_string(DEMO_BUYER_ID),
        store_id: StoreId::from_string(DEMO_TEXTILE_STORE_ID),
        status: OrderStatus::Delivered,
        items,
        subtotal_rub,
        delivery_fee_rub: 2_000,
        total_rub: subtotal_rub + 2_000,
        delivery_address: "Москва, ул. Тверская, 7".to_string(),
        comment: None,
        created_at: days_ago(5),
        updated_at: days_ago(2),
    }];

    Database {
        meta: Meta::now(),
        users,
        stores: vec![textile, tableware],
        products,
        orders,
    }
}
