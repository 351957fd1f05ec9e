//! Product — the single record managed by the catalog.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, ValidationError};
use crate::id::ProductId;

/// A sellable product keyed by a caller-assigned id.
///
/// Serialized with camelCase field names (`id`, `productName`, `unitPrice`).
/// Neither the name nor the price is constrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    pub unit_price: Decimal,
}

impl Product {
    /// Create a builder for constructing a [`Product`].
    #[must_use]
    pub fn builder() -> ProductBuilder {
        ProductBuilder::default()
    }

    /// Rows inserted into an empty store on initialization, in id order.
    #[must_use]
    pub fn seed() -> Vec<Product> {
        [(1, "Chai", 10), (2, "Chang", 11), (3, "Aniseed Syrup", 12)]
            .into_iter()
            .map(|(id, name, price)| Product {
                id: ProductId::new(id),
                product_name: name.to_string(),
                unit_price: Decimal::from(price),
            })
            .collect()
    }
}

/// Step-by-step builder for [`Product`].
#[derive(Debug, Default)]
pub struct ProductBuilder {
    id: Option<ProductId>,
    product_name: Option<String>,
    unit_price: Option<Decimal>,
}

impl ProductBuilder {
    #[must_use]
    pub fn id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn unit_price(mut self, price: impl Into<Decimal>) -> Self {
        self.unit_price = Some(price.into());
        self
    }

    /// Consume the builder and return a [`Product`].
    ///
    /// Missing name and price default to empty and zero.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if no id was provided.
    pub fn build(self) -> Result<Product, CatalogError> {
        let id = self.id.ok_or(ValidationError::MissingId)?;
        Ok(Product {
            id,
            product_name: self.product_name.unwrap_or_default(),
            unit_price: self.unit_price.unwrap_or_default(),
        })
    }
}

/// Deterministic order used when listing products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListOrder {
    /// Ascending id.
    #[default]
    #[serde(alias = "by_id")]
    Id,
    /// Ascending product name, ties broken by id.
    #[serde(alias = "by_name")]
    Name,
}

impl fmt::Display for ListOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => f.write_str("id"),
            Self::Name => f.write_str("name"),
        }
    }
}

/// Unknown [`ListOrder`] name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown list order {0:?}, expected \"id\" or \"name\"")]
pub struct ParseListOrderError(String);

impl FromStr for ListOrder {
    type Err = ParseListOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" | "by_id" => Ok(Self::Id),
            "name" | "by_name" => Ok(Self::Name),
            _ => Err(ParseListOrderError(s.to_string())),
        }
    }
}
