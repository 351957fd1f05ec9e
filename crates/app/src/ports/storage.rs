//! Storage port — repository traits for persistence.

use std::future::Future;

use catalog_domain::error::CatalogError;
use catalog_domain::id::ProductId;
use catalog_domain::product::{ListOrder, Product};

/// Keyed persistence for [`Product`] records.
///
/// Implementations hold no per-request state; each call acquires whatever
/// backend resource it needs and releases it before the future resolves.
pub trait ProductRepository {
    /// Insert a new product.
    ///
    /// Fails with [`CatalogError::Conflict`] when the id is already taken.
    fn create(
        &self,
        product: Product,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// Fetch a product by id, `None` when absent.
    fn get_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, CatalogError>> + Send;

    /// Fetch every product in the given order.
    fn get_all(
        &self,
        order: ListOrder,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Replace the product sharing `product.id`.
    ///
    /// Fails with [`CatalogError::NotFound`] when no row matches.
    fn update(
        &self,
        product: Product,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// Remove a product. Deleting a missing id succeeds.
    fn delete(&self, id: ProductId) -> impl Future<Output = Result<(), CatalogError>> + Send;

    /// Number of stored products.
    fn count(&self) -> impl Future<Output = Result<u64, CatalogError>> + Send;
}
