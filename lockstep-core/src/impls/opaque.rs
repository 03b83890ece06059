use core::fmt;

use crate::{Data, Def, OpaqueKind, Reflect, Reflector, Shape, Value};

fn write_return<R: Reflect>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if R::SHAPE.is(<() as Reflect>::SHAPE) {
        Ok(())
    } else {
        write!(f, " -> {}", R::SHAPE)
    }
}

impl<R: Reflect> Reflect for fn() -> R {
    const SHAPE: &'static Shape = &const {
        fn type_name<R: Reflect>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("fn()")?;
            write_return::<R>(f)
        }

        Shape::builder::<fn() -> R>("fn")
            .type_name(type_name::<R>)
            .def(Def::Opaque(OpaqueKind::Function))
            .build()
    };

    fn reflect(&self, _cx: &mut Reflector) -> Value {
        Value::new(Self::SHAPE, Data::Opaque(Some(*self as usize)))
    }
}

impl<A: Reflect, R: Reflect> Reflect for fn(A) -> R {
    const SHAPE: &'static Shape = &const {
        fn type_name<A: Reflect, R: Reflect>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "fn({})", A::SHAPE)?;
            write_return::<R>(f)
        }

        Shape::builder::<fn(A) -> R>("fn")
            .type_name(type_name::<A, R>)
            .def(Def::Opaque(OpaqueKind::Function))
            .build()
    };

    fn reflect(&self, _cx: &mut Reflector) -> Value {
        Value::new(Self::SHAPE, Data::Opaque(Some(*self as usize)))
    }
}

impl<A: Reflect, B: Reflect, R: Reflect> Reflect for fn(A, B) -> R {
    const SHAPE: &'static Shape = &const {
        fn type_name<A: Reflect, B: Reflect, R: Reflect>(
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            write!(f, "fn({}, {})", A::SHAPE, B::SHAPE)?;
            write_return::<R>(f)
        }

        Shape::builder::<fn(A, B) -> R>("fn")
            .type_name(type_name::<A, B, R>)
            .def(Def::Opaque(OpaqueKind::Function))
            .build()
    };

    fn reflect(&self, _cx: &mut Reflector) -> Value {
        Value::new(Self::SHAPE, Data::Opaque(Some(*self as usize)))
    }
}

macro_rules! impl_reflect_raw_pointer {
    ($($ptr:ty => $prefix:literal),*) => {$(
        impl<T: Reflect> Reflect for $ptr {
            const SHAPE: &'static Shape = &const {
                fn type_name<T: Reflect>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!($prefix, "{}"), T::SHAPE)
                }

                Shape::builder::<$ptr>($prefix)
                    .type_name(type_name::<T>)
                    .def(Def::Opaque(OpaqueKind::RawPointer))
                    .build()
            };

            fn reflect(&self, _cx: &mut Reflector) -> Value {
                let address = (!self.is_null()).then(|| self.addr());
                Value::new(Self::SHAPE, Data::Opaque(address))
            }
        }
    )*};
}

impl_reflect_raw_pointer!(*const T => "*const ", *mut T => "*mut ");
