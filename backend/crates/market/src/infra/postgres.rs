//! PostgreSQL Store
//!
//! Loads the four marketplace tables and writes change sets inside a
//! single transaction. Parent rows are inserted before children and
//! deleted after them so foreign keys hold at every statement.

use auth::UserRole;
use chrono::{DateTime, Utc};
use kernel::id::{OrderId, ProductId, StoreId, UserId};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use crate::domain::change_set::ChangeSet;
use crate::domain::entity::{
    database::{Database, Meta},
    order::{Order, OrderItem},
    product::Product,
    store::Store,
    user::User,
};
use crate::domain::repository::MarketStore;
use crate::domain::value_object::order_status::OrderStatus;
use crate::error::{MarketError, MarketResult};

/// PostgreSQL-backed marketplace store
#[derive(Clone)]
pub struct PgMarketStore {
    pool: PgPool,
}

impl PgMarketStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl MarketStore for PgMarketStore {
    async fn load(&self) -> MarketResult<Database> {
        let users = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, tg_id, role, full_name, phone, store_id, created_at
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let stores = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT
                id,
                name,
                city,
                address,
                description,
                phone,
                min_order_rub,
                delivery_days,
                rating,
                verified,
                logo_url,
                cover_url,
                categories,
                created_at
            FROM stores
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let products = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                id,
                store_id,
                name,
                sku,
                category,
                price_rub,
                min_qty,
                stock,
                image_url,
                description,
                tags,
                created_at,
                updated_at
            FROM products
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let orders = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT
                id,
                buyer_id,
                store_id,
                status,
                items,
                subtotal_rub,
                delivery_fee_rub,
                total_rub,
                delivery_address,
                comment,
                created_at,
                updated_at
            FROM orders
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(Database {
            meta: Meta::now(),
            users: users
                .into_iter()
                .map(UserRow::into_user)
                .collect::<MarketResult<_>>()?,
            stores: stores.into_iter().map(StoreRow::into_store).collect(),
            products: products.into_iter().map(ProductRow::into_product).collect(),
            orders: orders
                .into_iter()
                .map(OrderRow::into_order)
                .collect::<MarketResult<_>>()?,
        })
    }

    async fn apply(&self, changes: &ChangeSet) -> MarketResult<()> {
        let mut tx = self.pool.begin().await?;

        for store in &changes.stores.inserts {
            insert_store(&mut tx, store).await?;
        }
        for user in &changes.users.inserts {
            insert_user(&mut tx, user).await?;
        }
        for product in &changes.products.inserts {
            insert_product(&mut tx, product).await?;
        }
        for order in &changes.orders.inserts {
            insert_order(&mut tx, order).await?;
        }

        for store in &changes.stores.updates {
            update_store(&mut tx, store).await?;
        }
        for user in &changes.users.updates {
            update_user(&mut tx, user).await?;
        }
        for product in &changes.products.updates {
            update_product(&mut tx, product).await?;
        }
        for order in &changes.orders.updates {
            update_order(&mut tx, order).await?;
        }

        delete_rows(&mut tx, "orders", ids(&changes.orders.deletes, OrderId::as_str)).await?;
        delete_rows(&mut tx, "products", ids(&changes.products.deletes, ProductId::as_str)).await?;
        delete_rows(&mut tx, "users", ids(&changes.users.deletes, UserId::as_str)).await?;
        delete_rows(&mut tx, "stores", ids(&changes.stores.deletes, StoreId::as_str)).await?;

        tx.commit().await?;

        tracing::debug!(rows = changes.len(), "Applied market change set");

        Ok(())
    }
}

fn ids<K>(keys: &[K], as_str: fn(&K) -> &str) -> Vec<String> {
    keys.iter().map(|key| as_str(key).to_string()).collect()
}

// ============================================================================
// Writes
// ============================================================================

async fn insert_user(conn: &mut PgConnection, user: &User) -> MarketResult<()> {
    sqlx::query(
        r#"
        INSERT INTO users (id, tg_id, role, full_name, phone, store_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(user.id.as_str())
    .bind(user.tg_id)
    .bind(user.role.code())
    .bind(&user.full_name)
    .bind(non_empty(&user.phone))
    .bind(user.store_id.as_ref().map(StoreId::as_str))
    .bind(user.created_at)
    .execute(conn)
    .await?;

    Ok(())
}

async fn update_user(conn: &mut PgConnection, user: &User) -> MarketResult<()> {
    sqlx::query(
        r#"
        UPDATE users
        SET tg_id = $2, role = $3, full_name = $4, phone = $5, store_id = $6
        WHERE id = $1
        "#,
    )
    .bind(user.id.as_str())
    .bind(user.tg_id)
    .bind(user.role.code())
    .bind(&user.full_name)
    .bind(non_empty(&user.phone))
    .bind(user.store_id.as_ref().map(StoreId::as_str))
    .execute(conn)
    .await?;

    Ok(())
}

async fn insert_store(conn: &mut PgConnection, store: &Store) -> MarketResult<()> {
    sqlx::query(
        r#"
        INSERT INTO stores (
            id,
            name,
            city,
            address,
            description,
            phone,
            min_order_rub,
            delivery_days,
            rating,
            verified,
            logo_url,
            cover_url,
            categories,
            created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        "#,
    )
    .bind(store.id.as_str())
    .bind(&store.name)
    .bind(&store.city)
    .bind(&store.address)
    .bind(&store.description)
    .bind(&store.phone)
    .bind(store.min_order_rub)
    .bind(store.delivery_days)
    .bind(store.rating)
    .bind(store.verified)
    .bind(&store.logo_url)
    .bind(&store.cover_url)
    .bind(&store.categories)
    .bind(store.created_at)
    .execute(conn)
    .await?;

    Ok(())
}

async fn update_store(conn: &mut PgConnection, store: &Store) -> MarketResult<()> {
    sqlx::query(
        r#"
        UPDATE stores
        SET
            name = $2,
            city = $3,
            address = $4,
            description = $5,
            phone = $6,
            min_order_rub = $7,
            delivery_days = $8,
            rating = $9,
            verified = $10,
            logo_url = $11,
            cover_url = $12,
            categories = $13
        WHERE id = $1
        "#,
    )
    .bind(store.id.as_str())
    .bind(&store.name)
    .bind(&store.city)
    .bind(&store.address)
    .bind(&store.description)
    .bind(&store.phone)
    .bind(store.min_order_rub)
    .bind(store.delivery_days)
    .bind(store.rating)
    .bind(store.verified)
    .bind(&store.logo_url)
    .bind(&store.cover_url)
    .bind(&store.categories)
    .execute(conn)
    .await?;

    Ok(())
}

async fn insert_product(conn: &mut PgConnection, product: &Product) -> MarketResult<()> {
    sqlx::query(
        r#"
        INSERT INTO products (
            id,
            store_id,
            name,
            sku,
            category,
            price_rub,
            min_qty,
            stock,
            image_url,
            description,
            tags,
            created_at,
            updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(product.id.as_str())
    .bind(product.store_id.as_str())
    .bind(&product.name)
    .bind(&product.sku)
    .bind(&product.category)
    .bind(product.price_rub)
    .bind(product.min_qty)
    .bind(product.stock)
    .bind(&product.image_url)
    .bind(&product.description)
    .bind(&product.tags)
    .bind(product.created_at)
    .bind(product.updated_at)
    .execute(conn)
    .await?;

    Ok(())
}

async fn update_product(conn: &mut PgConnection, product: &Product) -> MarketResult<()> {
    sqlx::query(
        r#"
        UPDATE products
        SET
            name = $2,
            sku = $3,
            category = $4,
            price_rub = $5,
            min_qty = $6,
            stock = $7,
            image_url = $8,
            description = $9,
            tags = $10,
            updated_at = $11
        WHERE id = $1
        "#,
    )
    .bind(product.id.as_str())
    .bind(&product.name)
    .bind(&product.sku)
    .bind(&product.category)
    .bind(product.price_rub)
    .bind(product.min_qty)
    .bind(product.stock)
    .bind(&product.image_url)
    .bind(&product.description)
    .bind(&product.tags)
    .bind(product.updated_at)
    .execute(conn)
    .await?;

    Ok(())
}

async fn insert_order(conn: &mut PgConnection, order: &Order) -> MarketResult<()> {
    sqlx::query(
        r#"
        INSERT INTO orders (
            id,
            buyer_id,
            store_id,
            status,
            items,
            subtotal_rub,
            delivery_fee_rub,
            total_rub,
            delivery_address,
            comment,
            created_at,
            updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(order.id.as_str())
    .bind(order.buyer_id.as_str())
    .bind(order.store_id.as_str())
    .bind(order.status.code())
    .bind(Json(&order.items))
    .bind(order.subtotal_rub)
    .bind(order.delivery_fee_rub)
    .bind(order.total_rub)
    .bind(&order.delivery_address)
    .bind(order.comment.as_deref())
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(conn)
    .await?;

    Ok(())
}

async fn update_order(conn: &mut PgConnection, order: &Order) -> MarketResult<()> {
    sqlx::query(
        r#"
        UPDATE orders
        SET
            status = $2,
            items = $3,
            subtotal_rub = $4,
            delivery_fee_rub = $5,
            total_rub = $6,
            delivery_address = $7,
            comment = $8,
            updated_at = $9
        WHERE id = $1
        "#,
    )
    .bind(order.id.as_str())
    .bind(order.status.code())
    .bind(Json(&order.items))
    .bind(order.subtotal_rub)
    .bind(order.delivery_fee_rub)
    .bind(order.total_rub)
    .bind(&order.delivery_address)
    .bind(order.comment.as_deref())
    .bind(order.updated_at)
    .execute(conn)
    .await?;

    Ok(())
}

async fn delete_rows(conn: &mut PgConnection, table: &str, ids: Vec<String>) -> MarketResult<()> {
    if ids.is_empty() {
        return Ok(());
    }

    // Table names come from the fixed list in `apply`, never from input.
    let statement = format!("DELETE FROM {table} WHERE id = ANY($1)");
    sqlx::query(&statement).bind(ids).execute(conn).await?;

    Ok(())
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    tg_id: Option<i64>,
    role: String,
    full_name: String,
    phone: Option<String>,
    store_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> MarketResult<User> {
        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| MarketError::Internal(format!("Invalid user role: {}", self.role)))?;

        Ok(User {
            id: UserId::from_string(self.id),
            tg_id: self.tg_id,
            role,
            full_name: self.full_name,
            phone: self.phone.unwrap_or_default(),
            store_id: self.store_id.map(StoreId::from_string),
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct StoreRow {
    id: String,
    name: String,
    city: String,
    address: Option<String>,
    description: Option<String>,
    phone: Option<String>,
    min_order_rub: i64,
    delivery_days: i64,
    rating: f64,
    verified: bool,
    logo_url: Option<String>,
    cover_url: Option<String>,
    categories: Option<Vec<String>>,
    created_at: DateTime<Utc>,
}

impl StoreRow {
    fn into_store(self) -> Store {
        Store {
            id: StoreId::from_string(self.id),
            name: self.name,
            city: self.city,
            address: self.address.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            min_order_rub: self.min_order_rub,
            delivery_days: self.delivery_days,
            rating: self.rating,
            verified: self.verified,
            logo_url: self.logo_url.unwrap_or_default(),
            cover_url: self.cover_url.unwrap_or_default(),
            categories: self.categories.unwrap_or_default(),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: String,
    store_id: String,
    name: String,
    sku: String,
    category: Option<String>,
    price_rub: i64,
    min_qty: i64,
    stock: i64,
    image_url: Option<String>,
    description: Option<String>,
    tags: Option<Vec<String>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            id: ProductId::from_string(self.id),
            store_id: StoreId::from_string(self.store_id),
            name: self.name,
            sku: self.sku,
            category: self.category.unwrap_or_default(),
            price_rub: self.price_rub,
            min_qty: self.min_qty,
            stock: self.stock,
            image_url: self.image_url.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: String,
    buyer_id: String,
    store_id: String,
    status: String,
    items: Option<Json<Vec<OrderItem>>>,
    subtotal_rub: i64,
    delivery_fee_rub: i64,
    total_rub: i64,
    delivery_address: Option<String>,
    comment: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> MarketResult<Order> {
        let status = OrderStatus::from_code(&self.status).ok_or_else(|| {
            MarketError::Internal(format!("Invalid order status: {}", self.status))
        })?;

        Ok(Order {
            id: OrderId::from_string(self.id),
            buyer_id: UserId::from_string(self.buyer_id),
            store_id: StoreId::from_string(self.store_id),
            status,
            items: self.items.map(|items| items.0).unwrap_or_default(),
            subtotal_rub: self.subtotal_rub,
            delivery_fee_rub: self.delivery_fee_rub,
            total_rub: self.total_rub,
            delivery_address: self.delivery_address.unwrap_or_default(),
            comment: self.comment,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
