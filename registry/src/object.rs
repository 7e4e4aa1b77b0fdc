//! Field-by-field construction of struct objects.

use crate::{Registry, RegistryError};
use automap_core::{Object, TypeId, Value};

/// Builder for a struct object. Starts from the zero value of the type.
///
/// Errors are deferred to [`ObjectBuilder::build`] so calls can be chained.
pub struct ObjectBuilder<'r> {
    registry: &'r Registry,
    ty: TypeId,
    value: Value,
    error: Option<RegistryError>,
}

impl<'r> ObjectBuilder<'r> {
    pub(crate) fn new(registry: &'r Registry, ty: TypeId) -> Self {
        let error = if registry.struct_def(ty).is_none() {
            Some(RegistryError::UnknownType(ty))
        } else {
            None
        };
        Self {
            registry,
            ty,
            value: registry.zero_value(ty),
            error,
        }
    }

    /// Set a field, promoted fields included. Absent embedded pointers on the
    /// way are allocated.
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let Some(path) = self.registry.field_path(self.ty, name) else {
            self.error = Some(RegistryError::UnknownField {
                type_name: self.registry.type_name(self.ty),
                field: name.to_string(),
            });
            return self;
        };
        match self.registry.follow_mut(self.ty, &mut self.value, path) {
            Ok(field) => *field.value = value.into(),
            Err(mismatch) => {
                self.error = Some(RegistryError::ValueMismatch {
                    type_name: self.registry.type_name(mismatch.ty),
                    found: mismatch.found,
                });
            }
        }
        self
    }

    /// Finish building the object.
    pub fn build(self) -> Result<Object, RegistryError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(Object::new(self.ty, self.value)),
        }
    }

    /// Finish building and wrap the object behind a pointer, ready to be used
    /// as a mapping destination.
    pub fn build_pointer(self) -> Result<Object, RegistryError> {
        let registry = self.registry;
        let object = self.build()?;
        let ptr = registry
            .pointer_to(object.ty)
            .ok_or(RegistryError::UnknownType(object.ty))?;
        Ok(Object::new(ptr, Value::pointer(object.value)))
    }
}
