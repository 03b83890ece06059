use core::time::Duration;

use crate::{Data, Def, Field, Reflect, Reflector, Shape, StructDef, StructKind, Value};

impl Reflect for Duration {
    const SHAPE: &'static Shape = &const {
        Shape::builder::<Duration>("Duration")
            .def(Def::Struct(StructDef {
                kind: StructKind::Struct,
                fields: &const {
                    [
                        Field {
                            name: "secs",
                            shape: || <u64 as Reflect>::SHAPE,
                        },
                        Field {
                            name: "nanos",
                            shape: || <u32 as Reflect>::SHAPE,
                        },
                    ]
                },
            }))
            .build()
    };

    fn reflect(&self, cx: &mut Reflector) -> Value {
        Value::new(
            Self::SHAPE,
            Data::Struct(vec![
                self.as_secs().reflect(cx),
                self.subsec_nanos().reflect(cx),
            ]),
        )
    }
}

/// Rebuild a [`Duration`] from its reflected form.
pub fn duration_of(value: &Value) -> Option<Duration> {
    if !value.shape().is(Duration::SHAPE) {
        return None;
    }
    let secs = u64::try_from(value.field("secs")?.as_u128()?).ok()?;
    let nanos = u32::try_from(value.field("nanos")?.as_u128()?).ok()?;
    Some(Duration::new(secs, nanos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect;

    #[test]
    fn duration_survives_reflection() {
        let d = Duration::from_millis(1500);
        assert_eq!(duration_of(&reflect(&d)), Some(d));
        assert_eq!(duration_of(&reflect(&1u64)), None);
    }
}
