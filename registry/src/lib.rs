//! automap registry
//!
//! Runtime type lookup. Single source of truth for the field descriptors the
//! mapping engine walks. The registry is immutable after construction via
//! RegistryBuilder.

mod builder;
mod object;
mod registry;
mod tag;
mod types;

pub use builder::{RegistryBuilder, RegistryError, StructBuilder, DEFAULT_TAG_KEY};
pub use object::ObjectBuilder;
pub use registry::{FieldRef, Registry, ValueMismatch};
pub use tag::{Directive, StructTag};
pub use types::*;
