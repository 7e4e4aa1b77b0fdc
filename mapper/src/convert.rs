//! Leaf conversions between scalar kinds.

use crate::engine::Engine;
use crate::MapResult;
use automap_core::{TypeId, Value};
use automap_registry::Kind;

/// A scalar read out of a value, already checked against its declared kind.
#[derive(Debug, Clone, Copy)]
enum Scalar<'v> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(&'v str),
}

impl<'r> Engine<'r> {
    /// Convert a scalar into the destination's declared kind.
    ///
    /// Bools and strings only convert to their own kind; numeric kinds convert
    /// into each other with `as` semantics.
    pub(crate) fn convert_leaf(
        &self,
        src_ty: TypeId,
        src: &Value,
        dst_ty: TypeId,
        dst: &mut Value,
    ) -> MapResult<()> {
        // Aggregates never convert to anything but themselves.
        let Some(scalar) = self.read_scalar(src_ty, src)? else {
            return Err(self.incompatible(src_ty, dst_ty));
        };
        let converted = match (scalar, self.kind(dst_ty)?) {
            (Scalar::Bool(b), Kind::Bool) => Value::Bool(b),
            (Scalar::Str(s), Kind::String) => Value::String(s.to_string()),

            (Scalar::Int(i), Kind::Int) => Value::Int(i),
            (Scalar::Int(i), Kind::Uint) => Value::Uint(i as u64),
            (Scalar::Int(i), Kind::Float) => Value::Float(i as f64),

            (Scalar::Uint(u), Kind::Int) => Value::Int(u as i64),
            (Scalar::Uint(u), Kind::Uint) => Value::Uint(u),
            (Scalar::Uint(u), Kind::Float) => Value::Float(u as f64),

            (Scalar::Float(f), Kind::Int) => Value::Int(f as i64),
            (Scalar::Float(f), Kind::Uint) => Value::Uint(f as u64),
            (Scalar::Float(f), Kind::Float) => Value::Float(f),

            _ => return Err(self.incompatible(src_ty, dst_ty)),
        };
        *dst = converted;
        Ok(())
    }

    fn read_scalar<'v>(&self, ty: TypeId, value: &'v Value) -> MapResult<Option<Scalar<'v>>> {
        let scalar = match (self.kind(ty)?, value) {
            (Kind::Bool, Value::Bool(b)) => Scalar::Bool(*b),
            (Kind::Int, Value::Int(i)) => Scalar::Int(*i),
            (Kind::Uint, Value::Uint(u)) => Scalar::Uint(*u),
            (Kind::Float, Value::Float(f)) => Scalar::Float(*f),
            (Kind::String, Value::String(s)) => Scalar::Str(s),
            (Kind::Bool | Kind::Int | Kind::Uint | Kind::Float | Kind::String, other) => {
                return Err(self.malformed(ty, other))
            }
            _ => return Ok(None),
        };
        Ok(Some(scalar))
    }
}
