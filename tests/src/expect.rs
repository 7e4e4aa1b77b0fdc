//! Expectations on a mapping result and the destination it left behind.

use automap_core::{Object, TypeId, Value};
use automap_mapper::{MapErrorKind, MapResult};
use automap_registry::{Kind, Registry};

use crate::error::{CheckError, CheckResult};

/// What a mapping call should have produced.
#[derive(Debug, Default)]
pub struct Expect {
    error: Option<MapErrorKind>,
    field_path: Option<Vec<String>>,
    fields: Vec<(String, Value)>,
}

impl Expect {
    /// The call succeeds.
    pub fn ok() -> Self {
        Self::default()
    }

    /// The call fails with an error of `kind`.
    pub fn error(kind: MapErrorKind) -> Self {
        Self {
            error: Some(kind),
            ..Self::default()
        }
    }

    /// The error was raised under these fields, outermost first.
    pub fn at(mut self, path: &[&str]) -> Self {
        self.field_path = Some(path.iter().map(|s| s.to_string()).collect());
        self
    }

    /// The destination holds `value` at a dotted path. Numeric segments index
    /// into sequences; pointers are followed.
    pub fn field(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.fields.push((path.to_string(), value.into()));
        self
    }

    /// Check a mapping result and the destination it was written to.
    ///
    /// Field expectations are checked whether or not the call failed.
    pub fn check(&self, registry: &Registry, result: MapResult<()>, dest: &Object) -> CheckResult<()> {
        match (self.error, result) {
            (None, Ok(())) => {}
            (None, Err(err)) => return Err(CheckError::UnexpectedError(err)),
            (Some(expected), Ok(())) => return Err(CheckError::UnexpectedSuccess { expected }),
            (Some(expected), Err(err)) => {
                if err.kind() != expected {
                    return Err(CheckError::WrongErrorKind {
                        expected,
                        actual: err,
                    });
                }
                if let Some(expected) = &self.field_path {
                    let actual: Vec<String> =
                        err.field_path().into_iter().map(str::to_string).collect();
                    if &actual != expected {
                        return Err(CheckError::WrongFieldPath {
                            expected: expected.clone(),
                            actual,
                        });
                    }
                }
            }
        }

        for (path, expected) in &self.fields {
            let actual = lookup(registry, dest, path).ok_or_else(|| CheckError::missing_field(path))?;
            if actual != expected {
                return Err(CheckError::field_mismatch(path, expected, actual));
            }
        }
        Ok(())
    }
}

/// Read a value at a dotted path of an object.
pub fn lookup<'v>(registry: &Registry, object: &'v Object, path: &str) -> Option<&'v Value> {
    let (mut ty, mut value) = deref(registry, object.ty, &object.value);

    for segment in path.split('.') {
        if let Ok(index) = segment.parse::<usize>() {
            let Some(Kind::Sequence(elem)) = registry.kind(ty) else {
                return None;
            };
            value = value.as_list()?.get(index)?;
            ty = *elem;
        } else {
            let field_path = registry.field_path(ty, segment)?;
            let field = registry.follow(ty, value, field_path).ok()??;
            ty = field.ty;
            value = field.value;
        }
        (ty, value) = deref(registry, ty, value);
    }
    Some(value)
}

fn deref<'v>(registry: &Registry, ty: TypeId, value: &'v Value) -> (TypeId, &'v Value) {
    match (registry.kind(ty), value) {
        (Some(Kind::Pointer(elem)), Value::Pointer(inner)) => (*elem, inner.as_ref()),
        _ => (ty, value),
    }
}
