//! Value types for mapped data.
//!
//! A Value carries no type information of its own: it is always read against
//! a declared TypeId from the registry. Struct values are positional, one slot
//! per field in declaration order.

use crate::TypeId;
use std::collections::BTreeMap;
use std::fmt;

/// A value interpreted against a declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent pointer, or an `any` slot holding nothing.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit unsigned integer.
    Uint(u64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Struct fields in declaration order.
    Struct(Vec<Value>),
    /// Present pointer.
    Pointer(Box<Value>),
    /// Ordered sequence.
    List(Vec<Value>),
    /// String-keyed mapping.
    Map(BTreeMap<String, Value>),
    /// Dynamic value carrying its own type.
    Any(Box<Object>),
}

impl Value {
    /// Wrap a value in a present pointer.
    pub fn pointer(value: impl Into<Value>) -> Self {
        Value::Pointer(Box::new(value.into()))
    }

    /// Wrap an object as a dynamic value.
    pub fn any(object: Object) -> Self {
        Value::Any(Box::new(object))
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the elements if this is a List value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Follow a present pointer. Returns None for anything else.
    pub fn pointee(&self) -> Option<&Value> {
        match self {
            Value::Pointer(inner) => Some(inner),
            _ => None,
        }
    }

    /// Returns the variant name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Uint(_) => "Uint",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Struct(_) => "Struct",
            Value::Pointer(_) => "Pointer",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Any(_) => "Any",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Struct(fields) => {
                write!(f, "{{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", field)?;
                }
                write!(f, "}}")
            }
            Value::Pointer(inner) => write!(f, "&{}", inner),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "map[")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}:{}", key, value)?;
                }
                write!(f, "]")
            }
            Value::Any(object) => write!(f, "{}", object.value),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// A value paired with its declared type.
///
/// Objects are what callers hand to the mapping entry points, and what an
/// `any` slot holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    /// Declared type of `value`.
    pub ty: TypeId,
    /// The data.
    pub value: Value,
}

impl Object {
    pub fn new(ty: TypeId, value: impl Into<Value>) -> Self {
        Self {
            ty,
            value: value.into(),
        }
    }

    pub fn bool(b: bool) -> Self {
        Self::new(TypeId::BOOL, b)
    }

    pub fn int(i: i64) -> Self {
        Self::new(TypeId::INT, i)
    }

    pub fn uint(u: u64) -> Self {
        Self::new(TypeId::UINT, u)
    }

    pub fn float(f: f64) -> Self {
        Self::new(TypeId::FLOAT, f)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::new(TypeId::STRING, Value::String(s.into()))
    }

    /// Discard the type and keep the value.
    pub fn into_value(self) -> Value {
        self.value
    }
}

/// Helper macro to create string-keyed object maps.
#[macro_export]
macro_rules! objects {
    () => {
        std::collections::BTreeMap::<String, $crate::Object>::new()
    };
    ($($key:expr => $object:expr),+ $(,)?) => {
        {
            let mut map = std::collections::BTreeMap::<String, $crate::Object>::new();
            $(
                map.insert($key.to_string(), $object);
            )+
            map
        }
    };
}
