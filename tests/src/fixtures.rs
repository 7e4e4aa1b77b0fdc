//! Shared type fixtures.

use automap_core::{Object, TypeId};
use automap_mapper::Mapper;
use automap_registry::{ObjectBuilder, Registry, RegistryBuilder, RegistryError};

/// Types most scenarios share.
///
/// ```text
/// SourceTypeA  { Foo int, Bar string }
/// DestTypeA    { Foo int, Bar string }
/// SourceParent { Children []SourceTypeA }
/// DestParent   { Children []DestTypeA }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Common {
    pub source_a: TypeId,
    pub dest_a: TypeId,
    pub source_parent: TypeId,
    pub dest_parent: TypeId,
}

impl Common {
    fn register(builder: &mut RegistryBuilder) -> Result<Self, RegistryError> {
        let source_a = builder
            .add_struct("SourceTypeA")
            .field("Foo", TypeId::INT)
            .field("Bar", TypeId::STRING)
            .done()?;
        let dest_a = builder
            .add_struct("DestTypeA")
            .field("Foo", TypeId::INT)
            .field("Bar", TypeId::STRING)
            .done()?;
        let source_children = builder.sequence_of(source_a)?;
        let source_parent = builder
            .add_struct("SourceParent")
            .field("Children", source_children)
            .done()?;
        let dest_children = builder.sequence_of(dest_a)?;
        let dest_parent = builder
            .add_struct("DestParent")
            .field("Children", dest_children)
            .done()?;
        Ok(Self {
            source_a,
            dest_a,
            source_parent,
            dest_parent,
        })
    }
}

/// A registry holding the common types plus whatever a scenario adds.
pub struct Fixture<T = ()> {
    pub registry: Registry,
    pub common: Common,
    /// Ids of the scenario's own types.
    pub types: T,
}

impl Fixture<()> {
    /// Only the common types.
    pub fn common() -> Self {
        Fixture::new(|_, _| Ok(()))
    }
}

impl<T> Fixture<T> {
    /// Register the common types, then the scenario's own.
    pub fn new<F>(register: F) -> Self
    where
        F: FnOnce(&mut RegistryBuilder, &Common) -> Result<T, RegistryError>,
    {
        Self::with_builder(RegistryBuilder::new(), register)
    }

    /// Like [`Fixture::new`], starting from a configured builder.
    pub fn with_builder<F>(mut builder: RegistryBuilder, register: F) -> Self
    where
        F: FnOnce(&mut RegistryBuilder, &Common) -> Result<T, RegistryError>,
    {
        let common = Common::register(&mut builder).expect("common types register");
        let types = register(&mut builder, &common).expect("scenario types register");
        let registry = builder.build().expect("registry builds");
        Self {
            registry,
            common,
            types,
        }
    }

    pub fn mapper(&self) -> Mapper<'_> {
        Mapper::new(&self.registry)
    }

    pub fn object(&self, ty: TypeId) -> ObjectBuilder<'_> {
        self.registry.object(ty)
    }

    /// A zero destination of `ty` behind a pointer.
    pub fn new_object(&self, ty: TypeId) -> Object {
        self.registry
            .new_object(ty)
            .expect("struct types have pointer types")
    }

    /// Pointer type to `ty`.
    pub fn pointer(&self, ty: TypeId) -> TypeId {
        self.registry
            .pointer_to(ty)
            .expect("pointer type was registered")
    }
}
