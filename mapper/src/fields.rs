//! Field resolution between two struct types.

use crate::engine::Engine;
use crate::{Direction, MapContext, MapError, MapResult};
use automap_core::{TypeId, Value};
use automap_registry::{FieldDef, Kind};
use tracing::trace;

impl<'r> Engine<'r> {
    /// Map the fields of one struct value into another, walking whichever
    /// side the context's direction selects.
    pub(crate) fn map_fields(
        &self,
        src_ty: TypeId,
        src: &Value,
        dst_ty: TypeId,
        dst: &mut Value,
        ctx: MapContext,
    ) -> MapResult<()> {
        match ctx.direction {
            Direction::DestinationDriven => self.map_dest_fields(src_ty, src, dst_ty, dst, ctx),
            Direction::SourceDriven => self.map_source_fields(src_ty, src, dst_ty, dst, ctx),
        }
    }

    fn map_dest_fields(
        &self,
        src_ty: TypeId,
        src: &Value,
        dst_ty: TypeId,
        dst: &mut Value,
        ctx: MapContext,
    ) -> MapResult<()> {
        let def = self.struct_def(dst_ty)?;
        let slots = self.slots_mut(dst_ty, dst)?;

        for (field, slot) in def.fields.iter().zip(slots.iter_mut()) {
            if field.skip {
                continue;
            }
            let result = if field.embedded {
                self.map_value(src_ty, src, field.ty, slot, ctx)
            } else {
                self.resolve_by_name(src_ty, src, dst_ty, field, slot, ctx)
            };
            result.map_err(|e| self.in_field(&field.name, dst_ty, src_ty, e))?;
        }
        Ok(())
    }

    /// Find the source counterpart of one destination field and map it.
    fn resolve_by_name(
        &self,
        src_ty: TypeId,
        src: &Value,
        dst_ty: TypeId,
        field: &FieldDef,
        slot: &mut Value,
        ctx: MapContext,
    ) -> MapResult<()> {
        let name = field.lookup_name();

        if let Some(path) = self.registry.field_path(src_ty, name) {
            return match self.registry.follow(src_ty, src, path) {
                Ok(None) => {
                    trace!(field = name, "source field behind nil embedded pointer; skipped");
                    Ok(())
                }
                Ok(Some(found)) if found.def.skip => {
                    trace!(field = name, "source counterpart skipped");
                    Ok(())
                }
                Ok(Some(found)) => self.map_value(found.ty, found.value, field.ty, slot, ctx),
                Err(mismatch) => Err(self.mismatch(mismatch)),
            };
        }

        if let Kind::Struct(_) = self.kind(field.ty)? {
            return self.map_value(src_ty, src, field.ty, slot, ctx);
        }

        if let Some((ty, value, skip)) = self.search_nested(src_ty, src, name)? {
            if skip {
                return Ok(());
            }
            return self.map_value(ty, value, field.ty, slot, ctx);
        }

        if ctx.tolerates_missing() {
            trace!(field = name, "no source field; destination left untouched");
            return Ok(());
        }
        Err(MapError::field_resolution(
            name,
            self.registry.type_name(src_ty),
            self.registry.type_name(dst_ty),
        ))
    }

    /// Look for `name` exactly one level inside the struct-kind fields of the
    /// source, in declaration order.
    fn search_nested<'v>(
        &self,
        src_ty: TypeId,
        src: &'v Value,
        name: &str,
    ) -> MapResult<Option<(TypeId, &'v Value, bool)>> {
        let def = self.struct_def(src_ty)?;
        let slots = self.slots(src_ty, src)?;

        for (field, slot) in def.fields.iter().zip(slots) {
            if !matches!(self.kind(field.ty)?, Kind::Struct(_)) {
                continue;
            }
            let Some(path) = self.registry.field_path(field.ty, name) else {
                continue;
            };
            match self.registry.follow(field.ty, slot, path) {
                Ok(Some(found)) => return Ok(Some((found.ty, found.value, found.def.skip))),
                Ok(None) => continue,
                Err(mismatch) => return Err(self.mismatch(mismatch)),
            }
        }
        Ok(None)
    }

    fn map_source_fields(
        &self,
        src_ty: TypeId,
        src: &Value,
        dst_ty: TypeId,
        dst: &mut Value,
        ctx: MapContext,
    ) -> MapResult<()> {
        let def = self.struct_def(src_ty)?;
        let slots = self.slots(src_ty, src)?;

        for (field, slot) in def.fields.iter().zip(slots) {
            if field.skip {
                continue;
            }
            self.map_source_field(src_ty, field, slot, dst_ty, dst, ctx)
                .map_err(|e| self.in_field(&field.name, dst_ty, src_ty, e))?;
        }
        Ok(())
    }

    /// Push one source field into its destination counterpart.
    fn map_source_field(
        &self,
        src_ty: TypeId,
        field: &FieldDef,
        slot: &Value,
        dst_ty: TypeId,
        dst: &mut Value,
        ctx: MapContext,
    ) -> MapResult<()> {
        if field.embedded {
            if slot.is_null() {
                trace!(field = %field.name, "nil embedded source field; skipped");
                return Ok(());
            }
            return self.map_value(field.ty, slot, dst_ty, dst, ctx);
        }

        let name = field.lookup_name();
        let path = self.dest_path(dst_ty, name)?.ok_or_else(|| {
            MapError::field_resolution(
                name,
                self.registry.type_name(src_ty),
                self.registry.type_name(dst_ty),
            )
        })?;
        let target = self
            .registry
            .follow_mut(dst_ty, dst, &path)
            .map_err(|m| self.mismatch(m))?;
        if target.def.skip {
            trace!(field = name, "destination counterpart skipped");
            return Ok(());
        }
        self.map_value(field.ty, slot, target.ty, target.value, ctx)
    }
}
