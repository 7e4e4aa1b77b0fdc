//! automap core types
//!
//! This crate provides the foundational types shared by the registry and the
//! mapping engine:
//! - Type identifiers (TypeId) and the builtin type ids
//! - The dynamic Value enum interpreted against a declared type
//! - Object, a value paired with its declared type

mod id;
mod value;

pub use id::*;
pub use value::*;
