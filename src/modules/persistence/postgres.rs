use async_trait::async_trait;
use sqlx::PgPool;

use crate::features::categories::models::{Category, CategoryChanges, Deactivation, NewCategory};
use crate::features::products::models::{NewProduct, Product, ProductChanges, ProductStatusChange};
use crate::modules::persistence::{PersistenceError, PersistenceGateway, PersistenceResult};

const CATEGORY_COLUMNS: &str =
    "id, nombre AS name, descripcion AS description, estado AS active";

const PRODUCT_COLUMNS: &str = r#"id, codigo AS code, nombre AS name, descripcion AS description,
    precio AS price, activo AS active, categoria_id AS category_id,
    fecha_creacion AS created_at, fecha_actualizacion AS updated_at,
    cantidad_stock AS stock_quantity"#;

/// PostgreSQL-backed gateway over `categorias` and `productos`
#[derive(Clone)]
pub struct PostgresGateway {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresGateway")
            .field("pool", &"<PgPool>")
            .finish()
    }
}

impl PostgresGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersistenceGateway for PostgresGateway {
    async fn insert_category(&self, category: NewCategory) -> PersistenceResult<Category> {
        let query = format!(
            r#"
            INSERT INTO categorias (nombre, descripcion, estado)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(category.name)
            .bind(category.description)
            .bind(category.active)
            .fetch_one(&self.pool)
            .await?;

        Ok(category)
    }

    async fn find_category(&self, id: i32) -> PersistenceResult<Option<Category>> {
        let query = format!("SELECT {} FROM categorias WHERE id = $1", CATEGORY_COLUMNS);

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    async fn list_active_categories(&self) -> PersistenceResult<Vec<Category>> {
        let query = format!(
            r#"
            SELECT {}
            FROM categorias
            WHERE estado = TRUE
            ORDER BY id
            "#,
            CATEGORY_COLUMNS
        );

        let categories = sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(categories)
    }

    async fn update_category(
        &self,
        id: i32,
        changes: CategoryChanges,
    ) -> PersistenceResult<Category> {
        let query = format!(
            r#"
            UPDATE categorias
            SET nombre = $2,
                descripcion = $3
            WHERE id = $1
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(changes.name)
            .bind(changes.description)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Category", id))
    }

    async fn deactivate_category(&self, id: i32) -> PersistenceResult<Deactivation> {
        // Both CTEs read the pre-update snapshot, so `was_active` reflects the old flag
        let was_active: Option<bool> = sqlx::query_scalar(
            r#"
            WITH target AS (
                SELECT estado FROM categorias WHERE id = $1
            ), deactivated AS (
                UPDATE categorias
                SET estado = FALSE
                WHERE id = $1 AND estado = TRUE
                RETURNING id
            )
            SELECT estado AS was_active FROM target
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match was_active {
            Some(true) => Ok(Deactivation::Deactivated),
            Some(false) => Ok(Deactivation::AlreadyInactive),
            None => Err(PersistenceError::not_found("Category", id)),
        }
    }

    async fn insert_product(&self, product: NewProduct) -> PersistenceResult<Product> {
        let query = format!(
            r#"
            INSERT INTO productos (codigo, nombre, descripcion, precio, activo,
                                   categoria_id, fecha_creacion, cantidad_stock)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );

        let product = sqlx::query_as::<_, Product>(&query)
            .bind(product.code)
            .bind(product.name)
            .bind(product.description)
            .bind(product.price)
            .bind(product.active)
            .bind(product.category_id)
            .bind(product.created_at)
            .bind(product.stock_quantity)
            .fetch_one(&self.pool)
            .await?;

        Ok(product)
    }

    async fn find_product(&self, id: i32) -> PersistenceResult<Option<Product>> {
        let query = format!("SELECT {} FROM productos WHERE id = $1", PRODUCT_COLUMNS);

        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    async fn list_products(&self) -> PersistenceResult<Vec<Product>> {
        let query = format!("SELECT {} FROM productos ORDER BY id", PRODUCT_COLUMNS);

        let products = sqlx::query_as::<_, Product>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    async fn update_product(
        &self,
        id: i32,
        changes: ProductChanges,
    ) -> PersistenceResult<Product> {
        let query = format!(
            r#"
            UPDATE productos
            SET codigo = $2,
                nombre = $3,
                descripcion = $4,
                precio = $5,
                activo = $6,
                categoria_id = $7,
                cantidad_stock = $8,
                fecha_actualizacion = $9
            WHERE id = $1
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );

        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(changes.code)
            .bind(changes.name)
            .bind(changes.description)
            .bind(changes.price)
            .bind(changes.active)
            .bind(changes.category_id)
            .bind(changes.stock_quantity)
            .bind(changes.updated_at)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Product", id))
    }

    async fn update_product_status(
        &self,
        id: i32,
        change: Option<ProductStatusChange>,
    ) -> PersistenceResult<Product> {
        let query = format!(
            r#"
            UPDATE productos
            SET activo = COALESCE($2, activo),
                fecha_actualizacion = COALESCE($3, fecha_actualizacion)
            WHERE id = $1
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );

        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(change.map(|c| c.active))
            .bind(change.map(|c| c.updated_at))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Product", id))
    }

    async fn delete_product(&self, id: i32) -> PersistenceResult<()> {
        let result = sqlx::query("DELETE FROM productos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Product", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal::Decimal;
    use tokio_test::{assert_err, assert_ok};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 6, hour, 24, 42)
            .single()
            .expect("valid timestamp")
    }

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            description: Some(format!("{} description", name)),
            active: true,
        }
    }

    fn new_product(code: &str) -> NewProduct {
        NewProduct {
            code: code.to_string(),
            name: "Widget".to_string(),
            description: None,
            price: Decimal::new(999, 2),
            active: true,
            category_id: 1,
            created_at: at(10),
            stock_quantity: 0,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_category_columns_round_trip(pool: PgPool) {
        let gateway = PostgresGateway::new(pool);

        let created = assert_ok!(gateway.insert_category(new_category("Tools")).await);
        let found = assert_ok!(gateway.find_category(created.id).await);

        assert_eq!(found, Some(created.clone()));
        assert_eq!(created.name, "Tools");
        assert_eq!(created.description.as_deref(), Some("Tools description"));
        assert!(created.active);
        assert_eq!(assert_ok!(gateway.find_category(created.id + 1).await), None);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_category_keeps_active_flag(pool: PgPool) {
        let gateway = PostgresGateway::new(pool);
        let created = assert_ok!(gateway.insert_category(new_category("Old")).await);

        let updated = assert_ok!(
            gateway
                .update_category(
                    created.id,
                    CategoryChanges {
                        name: "New".to_string(),
                        description: None,
                    },
                )
                .await
        );

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "New");
        assert_eq!(updated.description, None);
        assert!(updated.active);

        let err = assert_err!(
            gateway
                .update_category(
                    created.id + 1,
                    CategoryChanges {
                        name: "Ghost".to_string(),
                        description: None,
                    },
                )
                .await
        );
        assert!(matches!(err, PersistenceError::NotFound { .. }));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_deactivate_twice_is_idempotent(pool: PgPool) {
        let gateway = PostgresGateway::new(pool);
        let kept = assert_ok!(gateway.insert_category(new_category("Books")).await);
        let target = assert_ok!(gateway.insert_category(new_category("Music")).await);

        assert_eq!(
            assert_ok!(gateway.deactivate_category(target.id).await),
            Deactivation::Deactivated
        );
        assert_eq!(
            assert_ok!(gateway.deactivate_category(target.id).await),
            Deactivation::AlreadyInactive
        );

        let stored = assert_ok!(gateway.find_category(target.id).await).expect("category kept");
        assert!(!stored.active);
        let listed = assert_ok!(gateway.list_active_categories().await);
        assert_eq!(listed, vec![kept]);

        let err = assert_err!(gateway.deactivate_category(target.id + 100).await);
        assert!(matches!(err, PersistenceError::NotFound { .. }));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_product_columns_round_trip(pool: PgPool) {
        let gateway = PostgresGateway::new(pool);

        let created = assert_ok!(gateway.insert_product(new_product("A1")).await);
        let found = assert_ok!(gateway.find_product(created.id).await);

        assert_eq!(found, Some(created.clone()));
        assert_eq!(created.code, "A1");
        assert_eq!(created.price, Decimal::new(999, 2));
        assert_eq!(created.created_at, at(10));
        assert_eq!(created.updated_at, None);
        assert_eq!(created.stock_quantity, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_code_is_constraint_violation(pool: PgPool) {
        let gateway = PostgresGateway::new(pool);
        assert_ok!(gateway.insert_product(new_product("DUP")).await);

        let err = assert_err!(gateway.insert_product(new_product("DUP")).await);

        match err {
            PersistenceError::ConstraintViolation(message) => {
                assert!(message.contains("ux_productos_codigo"), "{}", message)
            }
            other => panic!("expected constraint violation, got {:?}", other),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_product_replaces_fields(pool: PgPool) {
        let gateway = PostgresGateway::new(pool);
        let created = assert_ok!(gateway.insert_product(new_product("U1")).await);
        let taken = assert_ok!(gateway.insert_product(new_product("U2")).await);
        let changes = |code: &str| ProductChanges {
            code: code.to_string(),
            name: "Gadget".to_string(),
            description: Some("Improved".to_string()),
            price: Decimal::new(2000, 2),
            active: false,
            category_id: 3,
            stock_quantity: 40,
            updated_at: at(12),
        };

        let updated = assert_ok!(gateway.update_product(created.id, changes("U3")).await);

        assert_eq!(updated.code, "U3");
        assert_eq!(updated.description.as_deref(), Some("Improved"));
        assert_eq!(updated.price, Decimal::new(2000, 2));
        assert!(!updated.active);
        assert_eq!(updated.category_id, 3);
        assert_eq!(updated.stock_quantity, 40);
        assert_eq!(updated.created_at, at(10));
        assert_eq!(updated.updated_at, Some(at(12)));

        let err = assert_err!(gateway.update_product(created.id, changes(&taken.code)).await);
        assert!(matches!(err, PersistenceError::ConstraintViolation(_)));
        let err = assert_err!(gateway.update_product(99999, changes("U9")).await);
        assert!(matches!(
            err,
            PersistenceError::NotFound {
                entity: "Product",
                id: 99999
            }
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_status_update_without_change_writes_nothing(pool: PgPool) {
        let gateway = PostgresGateway::new(pool);
        let created = assert_ok!(gateway.insert_product(new_product("S1")).await);

        let untouched = assert_ok!(gateway.update_product_status(created.id, None).await);
        assert_eq!(untouched, created);

        let toggled = assert_ok!(
            gateway
                .update_product_status(
                    created.id,
                    Some(ProductStatusChange {
                        active: false,
                        updated_at: at(11),
                    }),
                )
                .await
        );
        assert!(!toggled.active);
        assert_eq!(toggled.updated_at, Some(at(11)));

        let err = assert_err!(gateway.update_product_status(99999, None).await);
        assert!(matches!(err, PersistenceError::NotFound { .. }));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_and_delete_products(pool: PgPool) {
        let gateway = PostgresGateway::new(pool);
        let first = assert_ok!(gateway.insert_product(new_product("L1")).await);
        let mut inactive = new_product("L2");
        inactive.active = false;
        let second = assert_ok!(gateway.insert_product(inactive).await);

        let listed = assert_ok!(gateway.list_products().await);
        assert_eq!(listed, vec![first.clone(), second.clone()]);

        assert_ok!(gateway.delete_product(first.id).await);
        assert_eq!(assert_ok!(gateway.find_product(first.id).await), None);
        let err = assert_err!(gateway.delete_product(first.id).await);
        assert!(matches!(
            err,
            PersistenceError::NotFound {
                entity: "Product",
                ..
            }
        ));
        assert_eq!(assert_ok!(gateway.list_products().await), vec![second]);
    }
}
