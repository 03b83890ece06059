use num_complex::Complex;

use crate::{Data, Def, Reflect, Reflector, ScalarType, Shape, Value};

impl Reflect for Complex<f32> {
    const SHAPE: &'static Shape = &const {
        Shape::builder::<Complex<f32>>("Complex")
            .type_name(|f| f.write_str("Complex<f32>"))
            .def(Def::Scalar(ScalarType::Complex32))
            .build()
    };

    fn reflect(&self, _cx: &mut Reflector) -> Value {
        Value::new(
            Self::SHAPE,
            Data::Complex(f64::from(self.re), f64::from(self.im)),
        )
    }
}

impl Reflect for Complex<f64> {
    const SHAPE: &'static Shape = &const {
        Shape::builder::<Complex<f64>>("Complex")
            .type_name(|f| f.write_str("Complex<f64>"))
            .def(Def::Scalar(ScalarType::Complex64))
            .build()
    };

    fn reflect(&self, _cx: &mut Reflector) -> Value {
        Value::new(Self::SHAPE, Data::Complex(self.re, self.im))
    }
}
