//! Value dispatch.

use crate::{MapContext, MapError, MapResult};
use automap_core::{Object, TypeId, Value};
use automap_registry::{Kind, Registry, StructDef, ValueMismatch};
use std::borrow::Cow;
use tracing::trace;

/// Recursive mapping engine.
///
/// The engine holds no per-call state; everything a call needs travels in the
/// arguments, so one engine can serve any number of mappings.
pub(crate) struct Engine<'r> {
    pub(crate) registry: &'r Registry,
}

impl<'r> Engine<'r> {
    pub(crate) fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Map `src` (declared `src_ty`) into `dst` (declared `dst_ty`).
    pub(crate) fn map_value(
        &self,
        src_ty: TypeId,
        src: &Value,
        dst_ty: TypeId,
        dst: &mut Value,
        ctx: MapContext,
    ) -> MapResult<()> {
        let src_kind = self.kind(src_ty)?;
        let dst_kind = self.kind(dst_ty)?;

        // Dynamic source: map whatever it holds.
        if let Kind::Any = src_kind {
            return match src {
                Value::Null if matches!(dst_kind, Kind::Pointer(_) | Kind::Any) => {
                    trace!(dest = %self.registry.type_name(dst_ty), "nil dynamic source; destination left untouched");
                    Ok(())
                }
                Value::Null => Err(self.incompatible(src_ty, dst_ty)),
                Value::Any(object) => self.map_value(object.ty, &object.value, dst_ty, dst, ctx),
                other => Err(self.malformed(src_ty, other)),
            };
        }

        // Dynamic destination: store the source with its type.
        if let Kind::Any = dst_kind {
            *dst = Value::any(Object::new(src_ty, src.clone()));
            return Ok(());
        }

        // Struct from pointer: an absent source reads as the zero value.
        if let (Kind::Struct(_), Kind::Pointer(elem)) = (dst_kind, src_kind) {
            return match src {
                Value::Null => {
                    let zero = self.registry.zero_value(*elem);
                    self.map_value(*elem, &zero, dst_ty, dst, ctx)
                }
                Value::Pointer(inner) => self.map_value(*elem, inner, dst_ty, dst, ctx),
                other => Err(self.malformed(src_ty, other)),
            };
        }

        if src_ty == dst_ty {
            *dst = src.clone();
            return Ok(());
        }

        match (src_kind, dst_kind) {
            (Kind::Struct(_), Kind::Struct(_)) => self.map_fields(src_ty, src, dst_ty, dst, ctx),
            (Kind::Map(value_ty), Kind::Struct(_)) => {
                let entries = match src {
                    Value::Map(entries) => entries,
                    other => return Err(self.malformed(src_ty, other)),
                };
                self.map_entries(
                    entries.iter().map(|(k, v)| (k.as_str(), *value_ty, v)),
                    src_ty,
                    dst_ty,
                    dst,
                    ctx,
                )
            }
            (_, Kind::Pointer(dst_elem)) => self.map_into_pointer(src_ty, src, *dst_elem, dst, ctx),
            (_, Kind::Sequence(_)) => self.map_sequence(src_ty, src, dst_ty, dst, ctx),
            _ => self.convert_leaf(src_ty, src, dst_ty, dst),
        }
    }

    /// Allocate the pointee, fill it and attach it. An absent source pointer
    /// leaves the destination as it is.
    fn map_into_pointer(
        &self,
        src_ty: TypeId,
        src: &Value,
        dst_elem: TypeId,
        dst: &mut Value,
        ctx: MapContext,
    ) -> MapResult<()> {
        let (src_ty, src) = match (self.kind(src_ty)?, src) {
            (Kind::Pointer(_), Value::Null) => {
                trace!(source = %self.registry.type_name(src_ty), "nil source pointer; destination left untouched");
                return Ok(());
            }
            (Kind::Pointer(src_elem), Value::Pointer(inner)) => (*src_elem, inner.as_ref()),
            (Kind::Pointer(_), other) => return Err(self.malformed(src_ty, other)),
            _ => (src_ty, src),
        };

        let mut target = self.registry.zero_value(dst_elem);
        self.map_value(src_ty, src, dst_elem, &mut target, ctx)?;
        *dst = Value::pointer(target);
        Ok(())
    }

    // ==================== Helpers ====================

    pub(crate) fn kind(&self, ty: TypeId) -> MapResult<&'r Kind> {
        self.registry.kind(ty).ok_or(MapError::UnknownType(ty))
    }

    pub(crate) fn struct_def(&self, ty: TypeId) -> MapResult<&'r StructDef> {
        match self.kind(ty)? {
            Kind::Struct(def) => Ok(def),
            other => Err(MapError::malformed_value(
                self.registry.type_name(ty),
                other.name(),
            )),
        }
    }

    /// Path to the destination field answering to `name`. A direct field whose
    /// lookup name matches wins; otherwise declared and promoted names apply.
    pub(crate) fn dest_path(
        &self,
        dst_ty: TypeId,
        name: &str,
    ) -> MapResult<Option<Cow<'r, [usize]>>> {
        let def = self.struct_def(dst_ty)?;
        if let Some((idx, _)) = def.field_by_lookup_name(name) {
            return Ok(Some(Cow::Owned(vec![idx])));
        }
        Ok(self.registry.field_path(dst_ty, name).map(Cow::Borrowed))
    }

    /// Struct slots of `value`, checked against the layout of `ty`.
    pub(crate) fn slots<'v>(&self, ty: TypeId, value: &'v Value) -> MapResult<&'v [Value]> {
        let def = self.struct_def(ty)?;
        match value {
            Value::Struct(slots) if slots.len() == def.len() => Ok(slots.as_slice()),
            other => Err(self.malformed(ty, other)),
        }
    }

    pub(crate) fn slots_mut<'v>(
        &self,
        ty: TypeId,
        value: &'v mut Value,
    ) -> MapResult<&'v mut [Value]> {
        let def = self.struct_def(ty)?;
        if !matches!(&*value, Value::Struct(slots) if slots.len() == def.len()) {
            return Err(self.malformed(ty, value));
        }
        match value {
            Value::Struct(slots) => Ok(slots.as_mut_slice()),
            other => Err(self.malformed(ty, other)),
        }
    }

    pub(crate) fn malformed(&self, ty: TypeId, value: &Value) -> MapError {
        MapError::malformed_value(self.registry.type_name(ty), value.type_name())
    }

    pub(crate) fn mismatch(&self, mismatch: ValueMismatch) -> MapError {
        MapError::malformed_value(self.registry.type_name(mismatch.ty), mismatch.found)
    }

    pub(crate) fn incompatible(&self, src_ty: TypeId, dst_ty: TypeId) -> MapError {
        MapError::type_incompatible(
            self.registry.type_name(src_ty),
            self.registry.type_name(dst_ty),
        )
    }

    pub(crate) fn in_field(
        &self,
        field: &str,
        dst_ty: TypeId,
        src_ty: TypeId,
        cause: MapError,
    ) -> MapError {
        MapError::in_field(
            field,
            self.registry.type_name(dst_ty),
            self.registry.type_name(src_ty),
            cause,
        )
    }
}
