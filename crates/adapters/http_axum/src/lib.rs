//! # catalog-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON REST API** under `/api/products` (list, get, create,
//!   update, delete)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//! - Reject absent or malformed bodies before the store is touched
//!
//! ## Dependency rule
//! Depends on `catalog-app` (for port traits and services) and `catalog-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
