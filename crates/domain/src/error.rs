//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`CatalogError`]
//! via `From`, so the HTTP adapter only has to map one enum to status codes.

/// Top-level error returned by services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("conflict")]
    Conflict(#[from] ConflictError),

    /// Backend failure, boxed so the domain does not depend on storage crates.
    #[error("storage error")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Input rejected before reaching the store.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("request body is missing or null")]
    MissingBody,

    #[error("request body is malformed: {0}")]
    MalformedBody(String),

    #[error("invalid product id: {0:?}")]
    InvalidId(String),

    #[error("product id is required")]
    MissingId,
}

/// Lookup by id returned no row.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A row with the same id already exists.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{entity} {id} already exists")]
pub struct ConflictError {
    pub entity: &'static str,
    pub id: String,
}
