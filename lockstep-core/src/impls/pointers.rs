use core::cell::{Cell, RefCell};
use core::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::{
    Data, Def, DynReflect, OptionDef, PointerDef, PointerKind, Reflect, Reflector, Shape, Value,
};

impl<T: Reflect> Reflect for Option<T> {
    const SHAPE: &'static Shape = &const {
        fn type_name<T: Reflect>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Option<{}>", T::SHAPE)
        }

        Shape::builder::<Option<T>>("Option")
            .type_name(type_name::<T>)
            .def(Def::Option(OptionDef { t: T::SHAPE }))
            .build()
    };

    fn reflect(&self, cx: &mut Reflector) -> Value {
        let inner = self.as_ref().map(|v| Box::new(v.reflect(cx)));
        Value::new(Self::SHAPE, Data::Option(inner))
    }
}

macro_rules! impl_reflect_pointer {
    ($($ptr:ident => $kind:ident),*) => {$(
        impl<T: Reflect> Reflect for $ptr<T> {
            const SHAPE: &'static Shape = &const {
                fn type_name<T: Reflect>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!(stringify!($ptr), "<{}>"), T::SHAPE)
                }

                Shape::builder::<$ptr<T>>(stringify!($ptr))
                    .type_name(type_name::<T>)
                    .def(Def::Pointer(PointerDef {
                        pointee: T::SHAPE,
                        kind: PointerKind::$kind,
                    }))
                    .build()
            };

            fn reflect(&self, cx: &mut Reflector) -> Value {
                cx.pointer(Self::SHAPE, &**self)
            }
        }
    )*};
}

impl_reflect_pointer!(Box => Box, Rc => Rc, Arc => Arc);

// Cells are transparent: they share the shape of what they hold.

impl<T: Reflect> Reflect for RefCell<T> {
    const SHAPE: &'static Shape = T::SHAPE;

    /// # Panics
    ///
    /// Panics if the cell is mutably borrowed.
    fn reflect(&self, cx: &mut Reflector) -> Value {
        self.borrow().reflect(cx)
    }
}

impl<T: Reflect + Copy> Reflect for Cell<T> {
    const SHAPE: &'static Shape = T::SHAPE;

    fn reflect(&self, cx: &mut Reflector) -> Value {
        self.get().reflect(cx)
    }
}

impl Reflect for Box<dyn DynReflect> {
    const SHAPE: &'static Shape = &const {
        Shape::builder::<Box<dyn DynReflect>>("Box")
            .type_name(|f| f.write_str("Box<dyn Reflect>"))
            .def(Def::Dynamic)
            .build()
    };

    fn reflect(&self, cx: &mut Reflector) -> Value {
        Value::dynamic(Self::SHAPE, (**self).dyn_reflect(cx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnyValue, reflect};

    #[test]
    fn shared_targets_share_identity() {
        let shared = Rc::new(5i32);
        let v = reflect(&vec![shared.clone(), shared]);
        let [a, b] = v.elements() else {
            panic!("expected two elements");
        };
        assert_eq!(a.identity(), b.identity());
        assert_eq!(a.pointee().and_then(|p| p.as_i128()), Some(5));
    }

    #[test]
    fn distinct_boxes_have_distinct_identity() {
        let v = reflect(&(Box::new(1u8), Box::new(1u8)));
        assert_ne!(v.fields()[0].identity(), v.fields()[1].identity());
    }

    #[test]
    fn refcell_is_transparent() {
        assert!(<RefCell<u8> as Reflect>::SHAPE.is(<u8 as Reflect>::SHAPE));
        assert_eq!(reflect(&RefCell::new(4u8)).as_u128(), Some(4));
    }

    #[test]
    fn dynamic_holds_concrete_value() {
        let any: AnyValue = Box::new(3i64);
        let v = reflect(&any);
        let inner = v.inner().unwrap();
        assert!(inner.shape().is(<i64 as Reflect>::SHAPE));
    }

    #[test]
    fn cyclic_graph_terminates() {
        struct Ring {
            next: Option<Rc<RefCell<Ring>>>,
        }
        crate::reflect!(Ring { next });

        let ring = Rc::new(RefCell::new(Ring { next: None }));
        ring.borrow_mut().next = Some(ring.clone());
        let v = reflect(&ring);

        let first = v.pointee().unwrap();
        let back = first.field("next").and_then(Value::inner).unwrap();
        assert_eq!(back.identity(), v.identity());

        ring.borrow_mut().next = None;
    }
}
