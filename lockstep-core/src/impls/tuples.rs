use core::fmt;

use crate::{Data, Def, Field, Reflect, Reflector, Shape, StructDef, StructKind, Value};

impl Reflect for () {
    const SHAPE: &'static Shape = &const {
        Shape::builder::<()>("()")
            .def(Def::Struct(StructDef {
                kind: StructKind::Tuple,
                fields: &[],
            }))
            .build()
    };

    fn reflect(&self, _cx: &mut Reflector) -> Value {
        Value::new(Self::SHAPE, Data::Struct(Vec::new()))
    }
}

macro_rules! impl_reflect_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: Reflect),+> Reflect for ($($name,)+) {
            const SHAPE: &'static Shape = &const {
                fn type_name<$($name: Reflect),+>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let names = [$($name::SHAPE),+];
                    f.write_str("(")?;
                    for (i, shape) in names.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{shape}")?;
                    }
                    if names.len() == 1 {
                        f.write_str(",")?;
                    }
                    f.write_str(")")
                }

                Shape::builder::<($($name,)+)>("tuple")
                    .type_name(type_name::<$($name),+>)
                    .def(Def::Struct(StructDef {
                        kind: StructKind::Tuple,
                        fields: &const {
                            [$(Field {
                                name: stringify!($idx),
                                shape: || $name::SHAPE,
                            }),+]
                        },
                    }))
                    .build()
            };

            fn reflect(&self, cx: &mut Reflector) -> Value {
                Value::new(Self::SHAPE, Data::Struct(vec![$(self.$idx.reflect(cx)),+]))
            }
        }
    };
}

impl_reflect_tuple!(A.0);
impl_reflect_tuple!(A.0, B.1);
impl_reflect_tuple!(A.0, B.1, C.2);
impl_reflect_tuple!(A.0, B.1, C.2, D.3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_names() {
        assert_eq!(<() as Reflect>::SHAPE.to_string(), "()");
        assert_eq!(<(u8,) as Reflect>::SHAPE.to_string(), "(u8,)");
        assert_eq!(<(u8, String) as Reflect>::SHAPE.to_string(), "(u8, String)");
    }

    #[test]
    fn tuple_fields_are_positional() {
        let sd = <(u8, bool, char) as Reflect>::SHAPE.struct_def().unwrap();
        let names: Vec<_> = sd.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, ["0", "1", "2"]);
    }
}
