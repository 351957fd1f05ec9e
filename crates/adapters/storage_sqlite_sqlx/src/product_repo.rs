//! `SQLite` implementation of [`ProductRepository`].

use std::future::Future;
use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use catalog_app::ports::ProductRepository;
use catalog_domain::error::{CatalogError, ConflictError, NotFoundError};
use catalog_domain::id::ProductId;
use catalog_domain::product::{ListOrder, Product};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Product`].
struct Wrapper(Product);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Product> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let product_name: String = row.try_get("product_name")?;
        let unit_price: String = row.try_get("unit_price")?;

        let unit_price =
            Decimal::from_str(&unit_price).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Product {
            id: ProductId::new(id),
            product_name,
            unit_price,
        }))
    }
}

// Prices are stored as decimal text so they come back exactly as written.
const INSERT: &str = "INSERT INTO products (id, product_name, unit_price) VALUES (?, ?, ?) ON CONFLICT (id) DO NOTHING";
const SELECT_BY_ID: &str = "SELECT id, product_name, unit_price FROM products WHERE id = ?";
const SELECT_ALL_BY_ID: &str = "SELECT id, product_name, unit_price FROM products ORDER BY id";
const SELECT_ALL_BY_NAME: &str =
    "SELECT id, product_name, unit_price FROM products ORDER BY product_name, id";
const UPDATE: &str = "UPDATE products SET product_name = ?, unit_price = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM products WHERE id = ?";
const COUNT: &str = "SELECT COUNT(*) FROM products";

/// `SQLite`-backed product repository.
///
/// Each call checks a connection out of the pool for the duration of a
/// single statement.
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for SqliteProductRepository {
    fn create(
        &self,
        product: Product,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(product.id.get())
                .bind(&product.product_name)
                .bind(product.unit_price.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(ConflictError {
                    entity: "Product",
                    id: product.id.to_string(),
                }
                .into());
            }

            Ok(product)
        }
    }

    fn get_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(
        &self,
        order: ListOrder,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send {
        let pool = self.pool.clone();
        let sql = match order {
            ListOrder::Id => SELECT_ALL_BY_ID,
            ListOrder::Name => SELECT_ALL_BY_NAME,
        };
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(sql)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        product: Product,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&product.product_name)
                .bind(product.unit_price.to_string())
                .bind(product.id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: "Product",
                    id: product.id.to_string(),
                }
                .into());
            }

            Ok(product)
        }
    }

    fn delete(&self, id: ProductId) -> impl Future<Output = Result<(), CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                tracing::debug!(%id, "delete matched no product");
            }

            Ok(())
        }
    }

    fn count(&self) -> impl Future<Output = Result<u64, CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let count: i64 = sqlx::query_scalar(COUNT)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(count.unsigned_abs())
        }
    }
}
