//! RegistryBuilder for constructing an immutable Registry.

use crate::{Directive, FieldDef, FieldIndex, Kind, Registry, StructDef, StructTag, TypeDef};
use automap_core::TypeId;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Tag key read for mapping directives unless configured otherwise.
pub const DEFAULT_TAG_KEY: &str = "automap";

/// Errors that can occur during registry construction.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Duplicate type name: {0}")]
    DuplicateTypeName(String),

    #[error("Unknown type: {0}")]
    UnknownType(TypeId),

    #[error("Duplicate field '{field}' on type '{type_name}'")]
    DuplicateField { type_name: String, field: String },

    #[error("Malformed tag on field '{field}': {tag}")]
    MalformedTag { field: String, tag: String },

    #[error("Embedded field '{field}' on type '{type_name}' must be a struct or pointer to struct")]
    EmbeddedNotStruct { type_name: String, field: String },

    #[error("Named type '{name}' must be declared over a scalar type")]
    NamedNotScalar { name: String },

    #[error("Unknown field '{field}' on type '{type_name}'")]
    UnknownField { type_name: String, field: String },

    #[error("Value does not match type '{type_name}': found {found}")]
    ValueMismatch {
        type_name: String,
        found: &'static str,
    },
}

/// Builder for constructing an immutable Registry.
#[derive(Debug)]
pub struct RegistryBuilder {
    /// Key whose tag value carries mapping directives.
    tag_key: String,
    /// Next type ID to allocate.
    next_type_id: u32,

    /// Types being built.
    types: HashMap<TypeId, TypeDef>,
    /// Named type lookup.
    type_names: HashMap<String, TypeId>,

    /// Interned composite types, keyed by element type.
    pointers: HashMap<TypeId, TypeId>,
    sequences: HashMap<TypeId, TypeId>,
    maps: HashMap<TypeId, TypeId>,

    /// Field lookup per struct type.
    indexes: HashMap<TypeId, FieldIndex>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Create a new builder with the builtin types defined.
    pub fn new() -> Self {
        let mut builder = Self {
            tag_key: DEFAULT_TAG_KEY.to_string(),
            next_type_id: TypeId::BUILTIN_COUNT,
            types: HashMap::new(),
            type_names: HashMap::new(),
            pointers: HashMap::new(),
            sequences: HashMap::new(),
            maps: HashMap::new(),
            indexes: HashMap::new(),
        };

        builder.insert_named(TypeDef::new(TypeId::BOOL, "bool", Kind::Bool));
        builder.insert_named(TypeDef::new(TypeId::INT, "int", Kind::Int));
        builder.insert_named(TypeDef::new(TypeId::UINT, "uint", Kind::Uint));
        builder.insert_named(TypeDef::new(TypeId::FLOAT, "float", Kind::Float));
        builder.insert_named(TypeDef::new(TypeId::STRING, "string", Kind::String));
        builder.insert_named(TypeDef::new(TypeId::ANY, "any", Kind::Any));

        builder.types.insert(
            TypeId::ANY_LIST,
            TypeDef::new(TypeId::ANY_LIST, "[]any", Kind::Sequence(TypeId::ANY)),
        );
        builder.sequences.insert(TypeId::ANY, TypeId::ANY_LIST);
        builder.types.insert(
            TypeId::ANY_MAP,
            TypeDef::new(TypeId::ANY_MAP, "map[string]any", Kind::Map(TypeId::ANY)),
        );
        builder.maps.insert(TypeId::ANY, TypeId::ANY_MAP);

        builder
    }

    /// Read mapping directives from `key` instead of [`DEFAULT_TAG_KEY`].
    pub fn with_tag_key(mut self, key: impl Into<String>) -> Self {
        self.tag_key = key.into();
        self
    }

    /// Add a struct type definition.
    pub fn add_struct(&mut self, name: impl Into<String>) -> StructBuilder<'_> {
        StructBuilder {
            builder: self,
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a named scalar type, e.g. `type Celsius float`.
    ///
    /// The new type converts to and from its underlying kind but is not
    /// identical to it.
    pub fn add_named(
        &mut self,
        name: impl Into<String>,
        underlying: TypeId,
    ) -> Result<TypeId, RegistryError> {
        let name = name.into();
        if self.type_names.contains_key(&name) {
            return Err(RegistryError::DuplicateTypeName(name));
        }
        let kind = self.kind_of(underlying)?.clone();
        if !kind.is_scalar() {
            return Err(RegistryError::NamedNotScalar { name });
        }

        let id = self.allocate();
        self.insert_named(TypeDef::new(id, name, kind));
        Ok(id)
    }

    /// Pointer type to `elem`, interned.
    pub fn pointer_to(&mut self, elem: TypeId) -> Result<TypeId, RegistryError> {
        if let Some(&id) = self.pointers.get(&elem) {
            return Ok(id);
        }
        let name = format!("*{}", self.name_of(elem)?);
        let id = self.allocate();
        self.types
            .insert(id, TypeDef::new(id, name, Kind::Pointer(elem)));
        self.pointers.insert(elem, id);
        Ok(id)
    }

    /// Sequence type of `elem`, interned.
    pub fn sequence_of(&mut self, elem: TypeId) -> Result<TypeId, RegistryError> {
        if let Some(&id) = self.sequences.get(&elem) {
            return Ok(id);
        }
        let name = format!("[]{}", self.name_of(elem)?);
        let id = self.allocate();
        self.types
            .insert(id, TypeDef::new(id, name, Kind::Sequence(elem)));
        self.sequences.insert(elem, id);
        Ok(id)
    }

    /// String-keyed map type to `value`, interned.
    pub fn map_of(&mut self, value: TypeId) -> Result<TypeId, RegistryError> {
        if let Some(&id) = self.maps.get(&value) {
            return Ok(id);
        }
        let name = format!("map[string]{}", self.name_of(value)?);
        let id = self.allocate();
        self.types.insert(id, TypeDef::new(id, name, Kind::Map(value)));
        self.maps.insert(value, id);
        Ok(id)
    }

    /// Build the immutable Registry.
    ///
    /// Every struct type gets a pointer type so callers can allocate
    /// destinations for it.
    pub fn build(mut self) -> Result<Registry, RegistryError> {
        let mut struct_ids: Vec<TypeId> = self
            .types
            .values()
            .filter(|t| t.kind.is_struct())
            .map(|t| t.id)
            .collect();
        struct_ids.sort();
        for id in struct_ids {
            self.pointer_to(id)?;
        }

        Ok(Registry::new(self.types, self.pointers, self.indexes))
    }

    fn allocate(&mut self) -> TypeId {
        let id = TypeId::new(self.next_type_id);
        self.next_type_id += 1;
        id
    }

    fn insert_named(&mut self, def: TypeDef) {
        self.type_names.insert(def.name.clone(), def.id);
        self.types.insert(def.id, def);
    }

    fn kind_of(&self, id: TypeId) -> Result<&Kind, RegistryError> {
        self.types
            .get(&id)
            .map(|t| &t.kind)
            .ok_or(RegistryError::UnknownType(id))
    }

    fn name_of(&self, id: TypeId) -> Result<&str, RegistryError> {
        self.types
            .get(&id)
            .map(|t| t.name.as_str())
            .ok_or(RegistryError::UnknownType(id))
    }

    /// Struct type behind an embeddable type (struct or pointer to struct).
    fn embeddable_struct(&self, id: TypeId) -> Option<TypeId> {
        match self.types.get(&id).map(|t| &t.kind) {
            Some(Kind::Struct(_)) => Some(id),
            Some(Kind::Pointer(elem)) => match self.types.get(elem).map(|t| &t.kind) {
                Some(Kind::Struct(_)) => Some(*elem),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Builder for a struct type definition.
pub struct StructBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    name: String,
    fields: Vec<FieldDef>,
}

impl<'a> StructBuilder<'a> {
    /// Add a plain field.
    pub fn field(self, name: impl Into<String>, ty: TypeId) -> Self {
        self.with_field(FieldDef::new(name, ty))
    }

    /// Add a field carrying a struct tag, e.g. `automap:"Foo"`.
    pub fn field_tagged(self, name: impl Into<String>, ty: TypeId, tag: impl Into<String>) -> Self {
        self.with_field(FieldDef::new(name, ty).with_tag(tag))
    }

    /// Add a prepared field descriptor.
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Embed a struct (or pointer to struct). The field is named after the
    /// struct type and its fields are promoted into this one. Anything else
    /// keeps its own type name and is rejected by `done`.
    pub fn embed(mut self, ty: TypeId) -> Self {
        let named = self.builder.embeddable_struct(ty).unwrap_or(ty);
        let name = self
            .builder
            .types
            .get(&named)
            .map_or_else(|| named.to_string(), |t| t.name.clone());
        let mut field = FieldDef::new(name, ty);
        field.embedded = true;
        self.fields.push(field);
        self
    }

    /// Finish building this struct.
    pub fn done(self) -> Result<TypeId, RegistryError> {
        // Check for duplicate name
        if self.builder.type_names.contains_key(&self.name) {
            return Err(RegistryError::DuplicateTypeName(self.name));
        }

        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(self.fields.len());
        for mut field in self.fields {
            self.builder.kind_of(field.ty)?;

            if field.embedded && self.builder.embeddable_struct(field.ty).is_none() {
                return Err(RegistryError::EmbeddedNotStruct {
                    type_name: self.name,
                    field: field.name,
                });
            }
            if !seen.insert(field.name.clone()) {
                return Err(RegistryError::DuplicateField {
                    type_name: self.name,
                    field: field.name,
                });
            }

            if let Some(raw) = &field.tag {
                let tag = StructTag::parse(raw).ok_or_else(|| RegistryError::MalformedTag {
                    field: field.name.clone(),
                    tag: raw.clone(),
                })?;
                match tag.directive(&self.builder.tag_key) {
                    Some(Directive::Skip) => field.skip = true,
                    Some(Directive::Rename(name)) => field.rename = Some(name),
                    None => {}
                }
            }
            fields.push(field);
        }

        let def = StructDef { fields };
        let index = {
            let builder = &*self.builder;
            FieldIndex::build(&def, |ty| {
                builder
                    .embeddable_struct(ty)
                    .and_then(|id| builder.indexes.get(&id))
            })
        };

        let id = self.builder.allocate();
        self.builder.indexes.insert(id, index);
        self.builder
            .insert_named(TypeDef::new(id, self.name, Kind::Struct(def)));

        Ok(id)
    }
}
