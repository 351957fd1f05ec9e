//! Product service — use-cases for managing the catalog.

use catalog_domain::error::{CatalogError, NotFoundError};
use catalog_domain::id::ProductId;
use catalog_domain::product::{ListOrder, Product};

use crate::ports::ProductRepository;

/// Application service for product CRUD operations.
pub struct ProductService<R> {
    repo: R,
    list_order: ListOrder,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            list_order: ListOrder::default(),
        }
    }

    /// Use `order` for [`list_products`](Self::list_products).
    #[must_use]
    pub fn with_list_order(mut self, order: ListOrder) -> Self {
        self.list_order = order;
        self
    }

    /// Order applied when listing.
    #[must_use]
    pub fn list_order(&self) -> ListOrder {
        self.list_order
    }

    /// Load the seed products when the store is empty.
    ///
    /// Meant to be called once at startup. A store that already holds rows
    /// is left untouched, so repeated calls are no-ops.
    ///
    /// # Errors
    ///
    /// Returns a storage error, or [`CatalogError::Conflict`] if a seed id
    /// was inserted concurrently.
    pub async fn initialize(&self) -> Result<(), CatalogError> {
        let existing = self.repo.count().await?;
        if existing > 0 {
            tracing::debug!(existing, "store already populated, skipping seed");
            return Ok(());
        }

        let seed = Product::seed();
        let count = seed.len();
        for product in seed {
            self.repo.create(product).await?;
        }
        tracing::info!(count, "seeded empty product store");
        Ok(())
    }

    /// List all products in the configured order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.repo.get_all(self.list_order).await
    }

    /// Look up a product, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn find_product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        self.repo.get_by_id(id).await
    }

    /// Look up a product, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no product with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.find_product(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Product",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Conflict`] if the id is taken, or a storage
    /// error from the repository.
    pub async fn create_product(&self, product: Product) -> Result<Product, CatalogError> {
        tracing::debug!(id = %product.id, "creating product");
        self.repo.create(product).await
    }

    /// Replace an existing product entirely.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no product has this id, or a
    /// storage error from the repository.
    pub async fn update_product(&self, product: Product) -> Result<Product, CatalogError> {
        tracing::debug!(id = %product.id, "updating product");
        self.repo.update(product).await
    }

    /// Delete a product by id. Missing ids are not an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        tracing::debug!(%id, "deleting product");
        self.repo.delete(id).await
    }
}
