use async_trait::async_trait;

use crate::features::categories::models::{Category, CategoryChanges, Deactivation, NewCategory};
use crate::features::products::models::{NewProduct, Product, ProductChanges, ProductStatusChange};
use crate::modules::persistence::PersistenceError;

pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

/// Sole reader and writer of the category and product collections.
///
/// Every method is a single round trip that commits on its own. Reads hand
/// back owned copies; mutating them has no effect until passed back through
/// an update method.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    async fn insert_category(&self, category: NewCategory) -> PersistenceResult<Category>;

    async fn find_category(&self, id: i32) -> PersistenceResult<Option<Category>>;

    /// Active categories ordered by ascending id
    async fn list_active_categories(&self) -> PersistenceResult<Vec<Category>>;

    async fn update_category(
        &self,
        id: i32,
        changes: CategoryChanges,
    ) -> PersistenceResult<Category>;

    /// Clear the active flag; an inactive category is left untouched
    async fn deactivate_category(&self, id: i32) -> PersistenceResult<Deactivation>;

    async fn insert_product(&self, product: NewProduct) -> PersistenceResult<Product>;

    async fn find_product(&self, id: i32) -> PersistenceResult<Option<Product>>;

    /// Every product regardless of its active flag
    async fn list_products(&self) -> PersistenceResult<Vec<Product>>;

    async fn update_product(&self, id: i32, changes: ProductChanges)
        -> PersistenceResult<Product>;

    /// Apply a status change; `None` writes nothing but still requires the row to exist
    async fn update_product_status(
        &self,
        id: i32,
        change: Option<ProductStatusChange>,
    ) -> PersistenceResult<Product>;

    async fn delete_product(&self, id: i32) -> PersistenceResult<()>;
}
