use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use fake::faker::lorem::en::{Sentence, Words};
use fake::Fake;
use tokio::sync::RwLock;

use crate::features::categories::dtos::CreateCategoryDto;
use crate::features::categories::models::{Category, CategoryChanges, Deactivation, NewCategory};
use crate::features::products::models::{NewProduct, Product, ProductChanges, ProductStatusChange};
use crate::features::{api_routes, build_dispatcher};
use crate::modules::persistence::{PersistenceError, PersistenceGateway, PersistenceResult};

const UNIQUE_CODE_MESSAGE: &str =
    "duplicate key value violates unique constraint \"ux_productos_codigo\"";

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    last_category_id: i32,
    last_product_id: i32,
}

/// In-memory stand-in for `PostgresGateway`.
///
/// Mirrors the store's identity ids (never reused), the unique index on
/// product codes and the `NotFound` rules of every write.
#[derive(Default)]
pub struct InMemoryGateway {
    tables: RwLock<Tables>,
    category_writes: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryGateway {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of statements that changed a category row
    pub fn category_writes(&self) -> usize {
        self.category_writes.load(Ordering::SeqCst)
    }

    /// Make every call fail as if the database were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn category(&self, id: i32) -> Option<Category> {
        self.tables.read().await.categories.get(&id).cloned()
    }

    pub async fn product(&self, id: i32) -> Option<Product> {
        self.tables.read().await.products.get(&id).cloned()
    }

    fn check_available(&self) -> PersistenceResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }

    fn mark_category_write(&self) {
        self.category_writes.fetch_add(1, Ordering::SeqCst);
    }
}

fn code_taken(products: &BTreeMap<i32, Product>, code: &str, except: Option<i32>) -> bool {
    products
        .values()
        .any(|p| p.code == code && Some(p.id) != except)
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn insert_category(&self, category: NewCategory) -> PersistenceResult<Category> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        tables.last_category_id += 1;
        let stored = Category {
            id: tables.last_category_id,
            name: category.name,
            description: category.description,
            active: category.active,
        };
        tables.categories.insert(stored.id, stored.clone());
        self.mark_category_write();
        Ok(stored)
    }

    async fn find_category(&self, id: i32) -> PersistenceResult<Option<Category>> {
        self.check_available()?;
        Ok(self.category(id).await)
    }

    async fn list_active_categories(&self) -> PersistenceResult<Vec<Category>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .values()
            .filter(|c| c.active)
            .cloned()
            .collect())
    }

    async fn update_category(
        &self,
        id: i32,
        changes: CategoryChanges,
    ) -> PersistenceResult<Category> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let category = tables
            .categories
            .get_mut(&id)
            .ok_or_else(|| PersistenceError::not_found("Category", id))?;
        category.name = changes.name;
        category.description = changes.description;
        let updated = category.clone();
        self.mark_category_write();
        Ok(updated)
    }

    async fn deactivate_category(&self, id: i32) -> PersistenceResult<Deactivation> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let category = tables
            .categories
            .get_mut(&id)
            .ok_or_else(|| PersistenceError::not_found("Category", id))?;
        if !category.active {
            return Ok(Deactivation::AlreadyInactive);
        }
        category.active = false;
        self.mark_category_write();
        Ok(Deactivation::Deactivated)
    }

    async fn insert_product(&self, product: NewProduct) -> PersistenceResult<Product> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if code_taken(&tables.products, &product.code, None) {
            return Err(PersistenceError::ConstraintViolation(
                UNIQUE_CODE_MESSAGE.to_string(),
            ));
        }
        tables.last_product_id += 1;
        let stored = Product {
            id: tables.last_product_id,
            code: product.code,
            name: product.name,
            description: product.description,
            price: product.price,
            active: product.active,
            category_id: product.category_id,
            created_at: product.created_at,
            updated_at: None,
            stock_quantity: product.stock_quantity,
        };
        tables.products.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_product(&self, id: i32) -> PersistenceResult<Option<Product>> {
        self.check_available()?;
        Ok(self.product(id).await)
    }

    async fn list_products(&self) -> PersistenceResult<Vec<Product>> {
        self.check_available()?;
        Ok(self.tables.read().await.products.values().cloned().collect())
    }

    async fn update_product(
        &self,
        id: i32,
        changes: ProductChanges,
    ) -> PersistenceResult<Product> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if !tables.products.contains_key(&id) {
            return Err(PersistenceError::not_found("Product", id));
        }
        if code_taken(&tables.products, &changes.code, Some(id)) {
            return Err(PersistenceError::ConstraintViolation(
                UNIQUE_CODE_MESSAGE.to_string(),
            ));
        }
        let product = tables
            .products
            .get_mut(&id)
            .ok_or_else(|| PersistenceError::not_found("Product", id))?;
        product.code = changes.code;
        product.name = changes.name;
        product.description = changes.description;
        product.price = changes.price;
        product.active = changes.active;
        product.category_id = changes.category_id;
        product.stock_quantity = changes.stock_quantity;
        product.updated_at = Some(changes.updated_at);
        Ok(product.clone())
    }

    async fn update_product_status(
        &self,
        id: i32,
        change: Option<ProductStatusChange>,
    ) -> PersistenceResult<Product> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let product = tables
            .products
            .get_mut(&id)
            .ok_or_else(|| PersistenceError::not_found("Product", id))?;
        if let Some(change) = change {
            product.active = change.active;
            product.updated_at = Some(change.updated_at);
        }
        Ok(product.clone())
    }

    async fn delete_product(&self, id: i32) -> PersistenceResult<()> {
        self.check_available()?;
        self.tables
            .write()
            .await
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PersistenceError::not_found("Product", id))
    }
}

/// Serve the versioned API over the given gateway
pub fn test_server(gateway: Arc<InMemoryGateway>) -> TestServer {
    let dispatcher = Arc::new(build_dispatcher(gateway));
    TestServer::new(api_routes(dispatcher)).expect("failed to start test server")
}

pub fn fake_category_dto() -> CreateCategoryDto {
    let words: Vec<String> = Words(1..3).fake();
    CreateCategoryDto {
        name: words.join(" "),
        description: Some(Sentence(3..8).fake()),
    }
}
