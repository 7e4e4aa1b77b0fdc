//! Property-based tests for mapping invariants.
//!
//! These tests use proptest to check that the invariants hold across
//! randomly generated values.

use proptest::prelude::*;

use automap_tests::prelude::*;

/// Strategy for a list of (Foo, Bar) pairs.
fn children() -> impl Strategy<Value = Vec<(i64, String)>> {
    prop::collection::vec((any::<i64>(), "[a-zA-Z0-9 ]{0,12}"), 0..8)
}

fn parent(fx: &Fixture, ty: TypeId, child_ty: TypeId, items: &[(i64, String)]) -> Object {
    let children: Vec<Value> = items
        .iter()
        .map(|(foo, bar)| {
            fx.object(child_ty)
                .set("Foo", *foo)
                .set("Bar", bar.as_str())
                .build()
                .unwrap()
                .into_value()
        })
        .collect();
    fx.object(ty).set("Children", children).build().unwrap()
}

proptest! {
    /// Same-shaped types map to an equal value, whatever the direction.
    #[test]
    fn same_shape_maps_exactly(items in children()) {
        let fx = Fixture::common();
        let c = fx.common;
        let source = parent(&fx, c.source_parent, c.source_a, &items);
        let expected = parent(&fx, c.dest_parent, c.dest_a, &items);

        let mut to_dest = fx.new_object(c.dest_parent);
        fx.mapper().map_to_destination(&source, &mut to_dest).unwrap();
        prop_assert_eq!(to_dest.value.pointee(), Some(&expected.value));

        let mut from_source = fx.new_object(c.dest_parent);
        fx.mapper().map_from_source(&source, &mut from_source).unwrap();
        prop_assert_eq!(from_source, to_dest);
    }

    /// Mapping the same source twice leaves the same destination.
    #[test]
    fn mapping_is_idempotent(items in children(), seed in children()) {
        let fx = Fixture::common();
        let c = fx.common;
        let source = parent(&fx, c.source_parent, c.source_a, &items);
        let start = parent(&fx, c.dest_parent, c.dest_a, &seed);
        let mut dest = Object::new(fx.pointer(c.dest_parent), Value::pointer(start.value));

        fx.mapper().map_to_destination(&source, &mut dest).unwrap();
        let once = dest.clone();
        fx.mapper().map_to_destination(&source, &mut dest).unwrap();

        prop_assert_eq!(dest, once);
    }

    /// Loose mapping never changes a field the source does not have.
    #[test]
    fn loose_keeps_unresolved_fields(foo in any::<i64>(), extra in any::<bool>()) {
        let fx = Fixture::new(|b, c| {
            b.add_struct("Wide")
                .embed(c.dest_a)
                .field("Extra", TypeId::BOOL)
                .done()
        });
        let source = fx.object(fx.common.source_a).set("Foo", foo).build().unwrap();
        let mut dest = fx.object(fx.types).set("Extra", extra).build_pointer().unwrap();

        fx.mapper().map_to_destination_loose(&source, &mut dest).unwrap();

        prop_assert_eq!(fx.registry.get(&dest, "Foo"), Some(&Value::Int(foo)));
        prop_assert_eq!(fx.registry.get(&dest, "Extra"), Some(&Value::Bool(extra)));
    }

    /// Integer fields survive a trip through uint and back.
    #[test]
    fn int_uint_int_preserves_bits(foo in any::<i64>()) {
        let fx = Fixture::new(|b, _| {
            let unsigned = b.add_struct("Unsigned").field("Foo", TypeId::UINT).done()?;
            let signed = b.add_struct("Signed").field("Foo", TypeId::INT).done()?;
            Ok((unsigned, signed))
        });
        let (unsigned, signed) = fx.types;
        let source = fx.object(signed).set("Foo", foo).build().unwrap();

        let mut middle = fx.new_object(unsigned);
        fx.mapper().map_to_destination(&source, &mut middle).unwrap();
        let middle = Object::new(unsigned, middle.value.pointee().cloned().unwrap());

        let mut back = fx.new_object(signed);
        fx.mapper().map_to_destination(&middle, &mut back).unwrap();

        prop_assert_eq!(fx.registry.get(&back, "Foo"), Some(&Value::Int(foo)));
    }
}
