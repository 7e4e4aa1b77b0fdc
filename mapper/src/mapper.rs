//! Public mapping entry points.

use crate::engine::Engine;
use crate::{MapContext, MapError, MapResult};
use automap_core::{Object, TypeId, Value};
use automap_registry::{Kind, Registry};
use std::collections::BTreeMap;
use tracing::debug;

/// String-keyed dynamic source for patch-style mapping.
pub type SourceMap = BTreeMap<String, Object>;

/// Maps objects between types of one registry.
///
/// Every entry point takes the destination as a pointer object holding a
/// present pointer, and writes through it. Sources are only read.
#[derive(Debug, Clone, Copy)]
pub struct Mapper<'r> {
    registry: &'r Registry,
}

impl<'r> Mapper<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Fill every destination field from the source. A destination field with
    /// no source counterpart is an error.
    pub fn map_to_destination(&self, source: &Object, dest: &mut Object) -> MapResult<()> {
        self.map_objects(source, dest, MapContext::destination_driven())
    }

    /// Like [`Mapper::map_to_destination`], but destination fields with no
    /// source counterpart keep their current value.
    pub fn map_to_destination_loose(&self, source: &Object, dest: &mut Object) -> MapResult<()> {
        self.map_objects(source, dest, MapContext::loose())
    }

    /// Push every source field into the destination. A source field with no
    /// destination counterpart is an error; extra destination fields are left
    /// untouched.
    pub fn map_from_source(&self, source: &Object, dest: &mut Object) -> MapResult<()> {
        self.map_objects(source, dest, MapContext::source_driven())
    }

    /// Patch the destination from string keys. Fields not named by a key keep
    /// their current value, and keys naming no field are ignored.
    pub fn map_from_source_map(&self, source: &SourceMap, dest: &mut Object) -> MapResult<()> {
        debug!(
            keys = source.len(),
            dest = %self.registry.type_name(dest.ty),
            "mapping from source map"
        );
        let (dst_ty, dst) = self.addressable(dest)?;
        if !matches!(self.registry.kind(dst_ty), Some(Kind::Struct(_))) {
            return Err(MapError::type_incompatible(
                self.registry.type_name(TypeId::ANY_MAP),
                self.registry.type_name(dst_ty),
            ));
        }

        Engine::new(self.registry).map_entries(
            source
                .iter()
                .map(|(key, object)| (key.as_str(), object.ty, &object.value)),
            TypeId::ANY_MAP,
            dst_ty,
            dst,
            MapContext::loose(),
        )
    }

    /// Patch the destination from the members of a JSON object.
    pub fn map_from_json(&self, source: &serde_json::Value, dest: &mut Object) -> MapResult<()> {
        self.addressable(dest)?;
        let source = crate::source_map_from_json(source)?;
        self.map_from_source_map(&source, dest)
    }

    fn map_objects(&self, source: &Object, dest: &mut Object, ctx: MapContext) -> MapResult<()> {
        debug!(
            source = %self.registry.type_name(source.ty),
            dest = %self.registry.type_name(dest.ty),
            direction = ?ctx.direction,
            strict = ctx.strict,
            "mapping objects"
        );
        let (dst_ty, dst) = self.addressable(dest)?;
        Engine::new(self.registry).map_value(source.ty, &source.value, dst_ty, dst, ctx)
    }

    /// Pointee type and slot of a destination root.
    fn addressable<'d>(&self, dest: &'d mut Object) -> MapResult<(TypeId, &'d mut Value)> {
        let ty = dest.ty;
        match (self.registry.kind(ty), &mut dest.value) {
            (Some(Kind::Pointer(elem)), Value::Pointer(inner)) => Ok((*elem, inner.as_mut())),
            _ => Err(MapError::dest_not_addressable(self.registry.type_name(ty))),
        }
    }
}
