//! Type definition types.

use automap_core::TypeId;
use std::collections::HashMap;

/// Field descriptor within a struct type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Declared field name.
    pub name: String,
    /// Declared field type.
    pub ty: TypeId,
    /// Name to use instead of `name` when searching the opposite side.
    pub rename: Option<String>,
    /// Whether this field is excluded from mapping.
    pub skip: bool,
    /// Whether this field is embedded (its fields are promoted into the parent).
    pub embedded: bool,
    /// Raw struct tag, e.g. `automap:"Foo" json:"foo"`.
    pub tag: Option<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            rename: None,
            skip: false,
            embedded: false,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// The name this field is known by on the opposite side.
    pub fn lookup_name(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.name)
    }
}

/// Struct layout: fields in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructDef {
    pub fields: Vec<FieldDef>,
}

impl StructDef {
    /// Get the first direct field whose lookup name matches.
    pub fn field_by_lookup_name(&self, name: &str) -> Option<(usize, &FieldDef)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, f)| !f.embedded && f.lookup_name() == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Shape of a type.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    String,
    /// Holds a value of any type, or nothing.
    Any,
    Struct(StructDef),
    /// Optional reference to the element type.
    Pointer(TypeId),
    /// Ordered sequence of the element type.
    Sequence(TypeId),
    /// String-keyed mapping to the value type.
    Map(TypeId),
}

impl Kind {
    pub fn is_struct(&self) -> bool {
        matches!(self, Kind::Struct(_))
    }

    /// Kinds a named type may be declared over.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Kind::Bool | Kind::Int | Kind::Uint | Kind::Float | Kind::String
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Any => "any",
            Kind::Struct(_) => "struct",
            Kind::Pointer(_) => "pointer",
            Kind::Sequence(_) => "sequence",
            Kind::Map(_) => "map",
        }
    }
}

/// Type definition.
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Unique identifier.
    pub id: TypeId,
    /// Type name. Composite types are named after their element, e.g. `*Foo`.
    pub name: String,
    /// Shape.
    pub kind: Kind,
}

impl TypeDef {
    pub fn new(id: TypeId, name: impl Into<String>, kind: Kind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }

    /// Get the struct layout if this is a struct type.
    pub fn as_struct(&self) -> Option<&StructDef> {
        match &self.kind {
            Kind::Struct(def) => Some(def),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct IndexEntry {
    depth: usize,
    /// None when two fields share the shallowest depth.
    path: Option<Vec<usize>>,
}

/// Precomputed field lookup for one struct type, including fields promoted
/// through embedded structs.
#[derive(Debug, Clone, Default)]
pub struct FieldIndex {
    entries: HashMap<String, IndexEntry>,
}

impl FieldIndex {
    /// Build the index for `def`. `embedded` returns the already-built index of
    /// an embedded field's struct type, looking through one pointer.
    pub fn build<'a>(
        def: &StructDef,
        embedded: impl Fn(TypeId) -> Option<&'a FieldIndex>,
    ) -> Self {
        let mut entries: HashMap<String, IndexEntry> = HashMap::new();

        for (i, field) in def.fields.iter().enumerate() {
            entries.insert(
                field.name.clone(),
                IndexEntry {
                    depth: 0,
                    path: Some(vec![i]),
                },
            );
        }

        for (i, field) in def.fields.iter().enumerate() {
            if !field.embedded {
                continue;
            }
            let Some(inner) = embedded(field.ty) else {
                continue;
            };
            for (name, entry) in &inner.entries {
                let depth = entry.depth + 1;
                let path = entry.path.as_ref().map(|p| {
                    let mut full = Vec::with_capacity(p.len() + 1);
                    full.push(i);
                    full.extend_from_slice(p);
                    full
                });
                match entries.get(name).map(|e| e.depth) {
                    Some(existing) if existing < depth => {}
                    Some(existing) if existing == depth => {
                        if let Some(entry) = entries.get_mut(name) {
                            entry.path = None;
                        }
                    }
                    _ => {
                        entries.insert(name.clone(), IndexEntry { depth, path });
                    }
                }
            }
        }

        Self { entries }
    }

    /// Field path for `name`, if it resolves unambiguously.
    pub fn path(&self, name: &str) -> Option<&[usize]> {
        self.entries.get(name).and_then(|e| e.path.as_deref())
    }
}
