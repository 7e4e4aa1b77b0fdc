//! automap mapper
//!
//! Copies field values between structurally compatible types registered in a
//! [`Registry`](automap_registry::Registry).
//!
//! Responsibilities:
//! - Dispatch a (source, destination) pair by type shape
//! - Resolve fields by name, honoring rename/skip directives and embedded structs
//! - Map sequences element-wise, probing element compatibility when empty
//! - Patch a destination from a string-keyed dynamic map or a JSON object

mod context;
mod convert;
mod engine;
mod error;
mod fields;
mod json;
mod map_source;
mod mapper;
mod sequence;

pub use context::{Direction, MapContext};
pub use error::{MapError, MapErrorKind, MapResult};
pub use json::{dynamic_from_json, source_map_from_json};
pub use mapper::{Mapper, SourceMap};
