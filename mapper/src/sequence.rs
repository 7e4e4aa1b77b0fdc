//! Element-wise sequence mapping.

use crate::engine::Engine;
use crate::{MapContext, MapError, MapResult};
use automap_core::{TypeId, Value};
use automap_registry::Kind;
use tracing::trace;

impl<'r> Engine<'r> {
    /// Map a sequence into a fresh destination sequence of the same length.
    ///
    /// The destination is only replaced once every element has mapped. An
    /// empty source still has its element types checked by mapping one zero
    /// element into a throwaway destination element.
    pub(crate) fn map_sequence(
        &self,
        src_ty: TypeId,
        src: &Value,
        dst_ty: TypeId,
        dst: &mut Value,
        ctx: MapContext,
    ) -> MapResult<()> {
        let (Kind::Sequence(src_elem), Kind::Sequence(dst_elem)) =
            (self.kind(src_ty)?, self.kind(dst_ty)?)
        else {
            return Err(self.incompatible(src_ty, dst_ty));
        };
        let items = match src {
            Value::List(items) => items,
            other => return Err(self.malformed(src_ty, other)),
        };

        if items.is_empty() {
            self.probe_elements(*src_elem, *dst_elem, ctx)?;
        }

        let mut target = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let mut element = self.registry.zero_value(*dst_elem);
            self.map_value(*src_elem, item, *dst_elem, &mut element, ctx)
                .map_err(|e| self.in_field(&format!("[{i}]"), dst_ty, src_ty, e))?;
            target.push(element);
        }

        *dst = Value::List(target);
        Ok(())
    }

    fn probe_elements(&self, src_elem: TypeId, dst_elem: TypeId, ctx: MapContext) -> MapResult<()> {
        // A dynamic element's zero value is nil, which says nothing about
        // what the sequence would hold.
        if let Kind::Any = self.kind(src_elem)? {
            trace!(dest = %self.registry.type_name(dst_elem), "dynamic element type; probe skipped");
            return Ok(());
        }

        let probe = self.registry.zero_value(src_elem);
        let mut scratch = self.registry.zero_value(dst_elem);
        self.map_value(src_elem, &probe, dst_elem, &mut scratch, ctx)
            .map_err(|cause| {
                MapError::element_incompatible(
                    self.registry.type_name(src_elem),
                    self.registry.type_name(dst_elem),
                    cause,
                )
            })
    }
}
