//! A string-keyed mapping read as a virtual struct.

use crate::engine::Engine;
use crate::{MapContext, MapError, MapResult};
use automap_core::{TypeId, Value};
use tracing::trace;

impl<'r> Engine<'r> {
    /// Patch the struct `dst` from key/value entries. Fields not named by a
    /// key keep their current value.
    ///
    /// A key names the field whose effective name (rename, else declared
    /// name) equals it, falling back to promoted lookup by declared name.
    pub(crate) fn map_entries<'v>(
        &self,
        entries: impl IntoIterator<Item = (&'v str, TypeId, &'v Value)>,
        src_ty: TypeId,
        dst_ty: TypeId,
        dst: &mut Value,
        ctx: MapContext,
    ) -> MapResult<()> {
        self.struct_def(dst_ty)?;

        for (key, value_ty, value) in entries {
            let path = match self.dest_path(dst_ty, key)? {
                Some(path) => path,
                None if ctx.tolerates_missing() => {
                    trace!(key = key, "no destination field for key; ignored");
                    continue;
                }
                None => {
                    return Err(MapError::field_resolution(
                        key,
                        self.registry.type_name(src_ty),
                        self.registry.type_name(dst_ty),
                    ))
                }
            };

            let target = self
                .registry
                .follow_mut(dst_ty, dst, &path)
                .map_err(|m| self.mismatch(m))?;
            if target.def.skip {
                trace!(key = key, "destination field skipped");
                continue;
            }
            self.map_value(value_ty, value, target.ty, target.value, ctx)
                .map_err(|e| self.in_field(key, dst_ty, src_ty, e))?;
        }
        Ok(())
    }
}
