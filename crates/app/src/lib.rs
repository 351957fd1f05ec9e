//! # catalog-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ProductRepository` — keyed CRUD for products
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ProductService` — initialize (seed), list, get, create, update, delete
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `catalog-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
