//! Catalog Use Cases
//!
//! Sellers manage their own store's products; admins manage any store's
//! products by naming the store.

use auth::SessionClaims;
use chrono::Utc;
use kernel::id::ProductId;

use crate::application::access::{acting_store_id, ensure_owns_store, staff_user};
use crate::application::config::{DEFAULT_CATEGORY, DEFAULT_PRODUCT_IMAGE_URL};
use crate::application::normalize;
use crate::application::transactor::Transactor;
use crate::domain::entity::product::Product;
use crate::domain::repository::MarketStore;
use crate::error::{MarketError, MarketResult};

/// New product fields
#[derive(Debug, Clone, Default)]
pub struct NewProductInput {
    /// Only read for admins
    pub store_id: Option<String>,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub price_rub: Option<f64>,
    pub min_qty: Option<f64>,
    pub stock: Option<f64>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Partial product update
///
/// `None` leaves a field untouched. For numeric fields the inner `None`
/// means the field was sent but was not a number, which resets it to its
/// fallback.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_rub: Option<Option<f64>>,
    pub min_qty: Option<Option<f64>>,
    pub stock: Option<Option<f64>>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

fn category_or_default(category: Option<&str>) -> String {
    normalize::text(category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

/// Products of the caller's store
pub struct ListProductsUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    transactor: Transactor<S>,
}

impl<S> ListProductsUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    pub fn new(transactor: Transactor<S>) -> Self {
        Self { transactor }
    }

    pub async fn execute(
        &self,
        session: SessionClaims,
        store_id: Option<&str>,
    ) -> MarketResult<Vec<Product>> {
        let db = self.transactor.read().await?;
        let user = staff_user(&db, &session)?;
        let store_id = acting_store_id(user, store_id)?;

        Ok(db.products_of_store(&store_id))
    }
}

/// Adds a product to a store's catalog
pub struct CreateProductUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    transactor: Transactor<S>,
}

impl<S> CreateProductUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    pub fn new(transactor: Transactor<S>) -> Self {
        Self { transactor }
    }

    pub async fn execute(
        &self,
        session: SessionClaims,
        input: NewProductInput,
    ) -> MarketResult<Product> {
        let (Some(name), Some(sku)) = (
            normalize::text(input.name.as_deref()),
            normalize::text(input.sku.as_deref()),
        ) else {
            return Err(MarketError::validation("name and sku are required"));
        };

        let product = self
            .transactor
            .update(move |db| {
                let user = staff_user(db, &session)?;
                let store_id = acting_store_id(user, input.store_id.as_deref())?;

                let store = db
                    .store_mut(&store_id)
                    .ok_or_else(|| MarketError::not_found("Store not found"))?;

                let now = Utc::now();
                let product = Product {
                    id: ProductId::generate(),
                    store_id,
                    name,
                    sku,
                    category: category_or_default(input.category.as_deref()),
                    price_rub: normalize::price_rub(input.price_rub),
                    min_qty: normalize::min_qty(input.min_qty),
                    stock: normalize::stock(input.stock),
                    image_url: normalize::text(input.image_url.as_deref())
                        .unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE_URL.to_string()),
                    description: normalize::text(input.description.as_deref())
                        .unwrap_or_default(),
                    tags: normalize::tags(input.tags.as_deref().unwrap_or_default()),
                    created_at: now,
                    updated_at: now,
                };

                store.add_category(&product.category);
                db.products.insert(0, product.clone());
                Ok(product)
            })
            .await?;

        tracing::info!(product_id = %product.id, store_id = %product.store_id, "Product created");

        Ok(product)
    }
}

/// Edits a product in place
pub struct UpdateProductUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    transactor: Transactor<S>,
}

impl<S> UpdateProductUseCase<S>
where
    S: MarketStore + Send + Sync + 'static,
{
    pub fn new(transactor: Transactor<S>) -> Self {
        Self { transactor }
    }

    pub async fn execute(
        &self,
        session: SessionClaims,
        product_id: ProductId,
        patch: ProductPatch,
    ) -> MarketResult<Product> {
        let product = self
            .transactor
            .update(move |db| {
                let user = staff_user(db, &session)?.clone();

                let product = db
                    .product_mut(&product_id)
                    .ok_or_else(|| MarketError::not_found("Product not found"))?;
                ensure_owns_store(&user, &product.store_id, "Cannot update foreign store product")?;

                if let Some(name) = patch.name {
                    product.name = name.trim().to_string();
                }
                if let Some(category) = patch.category {
                    product.category = category_or_default(Some(&category));
                }
                if let Some(price_rub) = patch.price_rub {
                    product.price_rub = normalize::price_rub(price_rub);
                }
                if let Some(min_qty) = patch.min_qty {
                    product.min_qty = normalize::min_qty(min_qty);
                }
                if let Some(stock) = patch.stock {
                    product.stock = normalize::stock(stock);
                }
                if let Some(image_url) = patch.image_url {
                    product.image_url = image_url.trim().to_string();
                }
                if let Some(description) = patch.description {
                    product.description = description.trim().to_string();
                }
                if let Some(tags) = patch.tags {
                    product.tags = normalize::tags(&tags);
                }
                product.updated_at = Utc::now();

                let updated = product.clone();
                if let Some(store) = db.store_mut(&updated.store_id) {
                    store.add_category(&updated.category);
                }
                Ok(updated)
            })
            .await?;

        tracing::info!(product_id = %product.id, "Product updated");

        Ok(product)
    }
}
