//! # catalog-domain
//!
//! Pure domain model for the product catalog.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define the **Product** record (id, name, unit price)
//! - Define the fixed **seed set** loaded into an empty store
//! - Define the deterministic **list order** used when listing products
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod product;
