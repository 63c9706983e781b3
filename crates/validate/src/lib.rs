//! `bazaar-validate` — declarative request-payload contracts.
//!
//! A [`Schema`] lists [`Field`]s in a fixed order; validating a payload
//! yields at most one message per field, in declaration order, so rejection
//! bodies are deterministic regardless of how the payload was spelled.

pub mod normalize;
pub mod schema;

pub use schema::{Constraint, Field, FieldType, Schema, Violations};
