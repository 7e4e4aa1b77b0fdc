//! Identity types for registered types.

use std::fmt;

/// Identifier for a type in the registry.
///
/// The first ids are reserved for the builtin types, which every registry
/// defines before any user type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// `bool`
    pub const BOOL: TypeId = TypeId(0);
    /// `int` (64-bit signed)
    pub const INT: TypeId = TypeId(1);
    /// `uint` (64-bit unsigned)
    pub const UINT: TypeId = TypeId(2);
    /// `float` (64-bit)
    pub const FLOAT: TypeId = TypeId(3);
    /// `string`
    pub const STRING: TypeId = TypeId(4);
    /// `any`: holds an [`Object`](crate::Object) of any type, or nothing.
    pub const ANY: TypeId = TypeId(5);
    /// `[]any`
    pub const ANY_LIST: TypeId = TypeId(6);
    /// `map[string]any`
    pub const ANY_MAP: TypeId = TypeId(7);

    /// Number of builtin ids. User types are allocated from here.
    pub const BUILTIN_COUNT: u32 = 8;

    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}
