use crate::{Data, Def, Reflect, Reflector, ScalarType, Shape, Value};

macro_rules! impl_reflect_scalar {
    ($($ty:ty => $scalar:ident, |$v:ident| $data:expr;)*) => {$(
        impl Reflect for $ty {
            const SHAPE: &'static Shape = &const {
                Shape::builder::<$ty>(stringify!($ty))
                    .def(Def::Scalar(ScalarType::$scalar))
                    .build()
            };

            fn reflect(&self, _cx: &mut Reflector) -> Value {
                let $v = self;
                Value::new(Self::SHAPE, $data)
            }
        }
    )*};
}

impl_reflect_scalar! {
    bool => Bool, |v| Data::Bool(*v);
    i8 => I8, |v| Data::Int(i128::from(*v));
    i16 => I16, |v| Data::Int(i128::from(*v));
    i32 => I32, |v| Data::Int(i128::from(*v));
    i64 => I64, |v| Data::Int(i128::from(*v));
    i128 => I128, |v| Data::Int(*v);
    isize => Isize, |v| Data::Int(*v as i128);
    u8 => U8, |v| Data::Uint(u128::from(*v));
    u16 => U16, |v| Data::Uint(u128::from(*v));
    u32 => U32, |v| Data::Uint(u128::from(*v));
    u64 => U64, |v| Data::Uint(u128::from(*v));
    u128 => U128, |v| Data::Uint(*v);
    usize => Usize, |v| Data::Uint(*v as u128);
    f32 => F32, |v| Data::Float(f64::from(*v));
    f64 => F64, |v| Data::Float(*v);
    char => Char, |v| Data::Char(*v);
    String => String, |v| Data::Str(v.clone());
}

impl Reflect for &'static str {
    const SHAPE: &'static Shape = &const {
        Shape::builder::<&'static str>("&str")
            .def(Def::Scalar(ScalarType::Str))
            .build()
    };

    fn reflect(&self, _cx: &mut Reflector) -> Value {
        Value::new(Self::SHAPE, Data::Str((*self).to_owned()))
    }
}
