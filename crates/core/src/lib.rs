//! `bazaar-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every other
//! crate (no infrastructure concerns).

pub mod id;

pub use id::{ParseIdError, ResourceId};
