//! The Registry - immutable type lookup.

use crate::{FieldDef, FieldIndex, Kind, ObjectBuilder, StructDef, TypeDef};
use automap_core::{Object, TypeId, Value};
use std::collections::HashMap;

/// A value did not have the shape its declared type requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueMismatch {
    /// Declared type.
    pub ty: TypeId,
    /// Variant name of the value actually found.
    pub found: &'static str,
}

/// A field reached by following a field path.
#[derive(Debug)]
pub struct FieldRef<'r, V> {
    /// Declared type of the field.
    pub ty: TypeId,
    /// Field descriptor.
    pub def: &'r FieldDef,
    /// The field's value slot.
    pub value: V,
}

/// The Registry provides runtime lookup of type definitions.
/// It is immutable after construction.
#[derive(Debug)]
pub struct Registry {
    /// Type definitions by ID.
    types: HashMap<TypeId, TypeDef>,
    /// Pointer type for each element type.
    pointers: HashMap<TypeId, TypeId>,
    /// Field lookup per struct type.
    indexes: HashMap<TypeId, FieldIndex>,
}

impl Registry {
    /// Create a registry (use RegistryBuilder for construction).
    pub(crate) fn new(
        types: HashMap<TypeId, TypeDef>,
        pointers: HashMap<TypeId, TypeId>,
        indexes: HashMap<TypeId, FieldIndex>,
    ) -> Self {
        Self {
            types,
            pointers,
            indexes,
        }
    }

    // ==================== Type Lookups ====================

    /// Get the shape of a type.
    pub fn kind(&self, id: TypeId) -> Option<&Kind> {
        self.types.get(&id).map(|t| &t.kind)
    }

    /// Get the struct layout of a struct type.
    pub fn struct_def(&self, id: TypeId) -> Option<&StructDef> {
        self.types.get(&id).and_then(|t| t.as_struct())
    }

    /// Display name of a type, for diagnostics.
    pub fn type_name(&self, id: TypeId) -> String {
        match self.types.get(&id) {
            Some(def) => def.name.clone(),
            None => format!("<unknown {}>", id),
        }
    }

    /// Get the pointer type to `elem`, if one was interned.
    pub fn pointer_to(&self, elem: TypeId) -> Option<TypeId> {
        self.pointers.get(&elem).copied()
    }

    // ==================== Field Lookups ====================

    /// Field path for `name` on a struct type, including promoted fields.
    pub fn field_path(&self, struct_ty: TypeId, name: &str) -> Option<&[usize]> {
        self.indexes.get(&struct_ty).and_then(|index| index.path(name))
    }

    /// Follow a field path through `value`.
    ///
    /// Returns `Ok(None)` when the path passes through an absent embedded
    /// pointer.
    pub fn follow<'r, 'v>(
        &'r self,
        ty: TypeId,
        value: &'v Value,
        path: &[usize],
    ) -> Result<Option<FieldRef<'r, &'v Value>>, ValueMismatch> {
        let mut cur_ty = ty;
        let mut cur = value;
        let mut found = None;

        for &idx in path {
            if let Some(Kind::Pointer(elem)) = self.kind(cur_ty) {
                match cur {
                    Value::Null => return Ok(None),
                    Value::Pointer(inner) => {
                        cur = inner;
                        cur_ty = *elem;
                    }
                    other => return Err(mismatch(cur_ty, other)),
                }
            }

            let def = self
                .struct_def(cur_ty)
                .and_then(|s| s.fields.get(idx))
                .ok_or_else(|| mismatch(cur_ty, cur))?;
            let slot = match cur {
                Value::Struct(slots) => slots.get(idx).ok_or_else(|| mismatch(cur_ty, cur))?,
                other => return Err(mismatch(cur_ty, other)),
            };

            cur = slot;
            cur_ty = def.ty;
            found = Some(def);
        }

        Ok(found.map(|def| FieldRef {
            ty: cur_ty,
            def,
            value: cur,
        }))
    }

    /// Follow a field path through `value` for writing.
    ///
    /// Absent embedded pointers on the way are allocated with zero values.
    pub fn follow_mut<'r, 'v>(
        &'r self,
        ty: TypeId,
        value: &'v mut Value,
        path: &[usize],
    ) -> Result<FieldRef<'r, &'v mut Value>, ValueMismatch> {
        let mut cur_ty = ty;
        let mut cur = value;
        let mut found: Option<&'r FieldDef> = None;

        for &idx in path {
            if let Some(Kind::Pointer(elem)) = self.kind(cur_ty) {
                if cur.is_null() {
                    *cur = Value::pointer(self.zero_value(*elem));
                }
                cur = match cur {
                    Value::Pointer(inner) => inner.as_mut(),
                    other => return Err(mismatch(cur_ty, other)),
                };
                cur_ty = *elem;
            }

            let def = match self.struct_def(cur_ty).and_then(|s| s.fields.get(idx)) {
                Some(def) => def,
                None => return Err(mismatch(cur_ty, cur)),
            };
            cur = match cur {
                Value::Struct(slots) => match slots.get_mut(idx) {
                    Some(slot) => slot,
                    None => {
                        return Err(ValueMismatch {
                            ty: cur_ty,
                            found: "Struct",
                        })
                    }
                },
                other => return Err(mismatch(cur_ty, other)),
            };
            cur_ty = def.ty;
            found = Some(def);
        }

        match found {
            Some(def) => Ok(FieldRef {
                ty: cur_ty,
                def,
                value: cur,
            }),
            None => Err(mismatch(cur_ty, cur)),
        }
    }

    // ==================== Values ====================

    /// Zero value of a type: false, 0, "", absent pointer, empty sequence,
    /// empty map, or a struct of zero fields.
    pub fn zero_value(&self, id: TypeId) -> Value {
        match self.kind(id) {
            Some(Kind::Bool) => Value::Bool(false),
            Some(Kind::Int) => Value::Int(0),
            Some(Kind::Uint) => Value::Uint(0),
            Some(Kind::Float) => Value::Float(0.0),
            Some(Kind::String) => Value::String(String::new()),
            Some(Kind::Struct(def)) => Value::Struct(
                def.fields
                    .iter()
                    .map(|f| self.zero_value(f.ty))
                    .collect(),
            ),
            Some(Kind::Sequence(_)) => Value::List(Vec::new()),
            Some(Kind::Map(_)) => Value::Map(Default::default()),
            Some(Kind::Any) | Some(Kind::Pointer(_)) | None => Value::Null,
        }
    }

    /// Allocate a zero value of `id` behind a pointer, ready to be used as a
    /// mapping destination.
    pub fn new_object(&self, id: TypeId) -> Option<Object> {
        let ptr = self.pointer_to(id)?;
        Some(Object::new(ptr, Value::pointer(self.zero_value(id))))
    }

    /// Start building a struct object field by field.
    pub fn object(&self, id: TypeId) -> ObjectBuilder<'_> {
        ObjectBuilder::new(self, id)
    }

    /// Read a field (promoted fields included) of a struct object. A pointer
    /// object is dereferenced first.
    pub fn get<'v>(&self, object: &'v Object, name: &str) -> Option<&'v Value> {
        let (ty, value) = match (self.kind(object.ty), &object.value) {
            (Some(Kind::Pointer(elem)), Value::Pointer(inner)) => (*elem, inner.as_ref()),
            _ => (object.ty, &object.value),
        };
        let path = self.field_path(ty, name)?;
        match self.follow(ty, value, path) {
            Ok(Some(field)) => Some(field.value),
            _ => None,
        }
    }
}

fn mismatch(ty: TypeId, value: &Value) -> ValueMismatch {
    ValueMismatch {
        ty,
        found: value.type_name(),
    }
}
