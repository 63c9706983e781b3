//! `bazaar-products` — the product domain model.
//!
//! Pure record types and their content rules (no IO, no HTTP, no storage).

pub mod product;

pub use product::{Product, ProductDraft, ProductUpdate};
