//! Total order over values, used to sort map keys.

use core::cmp::Ordering;
use std::collections::HashSet;

use crate::{Data, Value};

/// Order two values for display and pairing of map keys.
///
/// Values of different shapes order by type name. Within a shape: `false`
/// before `true`, numbers numerically with NaN first, strings and chars
/// lexically, records and sequences element by element, enums by variant
/// position then payload. Nil and `None` sort before everything else of
/// their shape. Pointers and lists compare by content, functions by address.
///
/// Pointer pairs already under comparison count as equal, so cyclic keys
/// terminate.
pub fn compare_keys(a: &Value, b: &Value) -> Ordering {
    KeyOrder::default().cmp(a, b)
}

#[derive(Default)]
struct KeyOrder {
    seen: HashSet<(usize, usize)>,
}

impl KeyOrder {
    fn cmp(&mut self, a: &Value, b: &Value) -> Ordering {
        if !a.shape().is(b.shape()) {
            return a.shape().to_string().cmp(&b.shape().to_string());
        }
        match (a.data(), b.data()) {
            (Data::Bool(x), Data::Bool(y)) => x.cmp(y),
            (Data::Int(x), Data::Int(y)) => x.cmp(y),
            (Data::Uint(x), Data::Uint(y)) => x.cmp(y),
            (Data::Float(x), Data::Float(y)) => compare_floats(*x, *y),
            (Data::Complex(xr, xi), Data::Complex(yr, yi)) => {
                compare_floats(*xr, *yr).then_with(|| compare_floats(*xi, *yi))
            }
            (Data::Char(x), Data::Char(y)) => x.cmp(y),
            (Data::Str(x), Data::Str(y)) => x.cmp(y),
            (Data::Struct(x), Data::Struct(y)) | (Data::Array(x), Data::Array(y)) => {
                self.seq(x, y)
            }
            (
                Data::Enum {
                    variant: xv,
                    fields: xf,
                },
                Data::Enum {
                    variant: yv,
                    fields: yf,
                },
            ) => xv.cmp(yv).then_with(|| self.seq(xf, yf)),
            (Data::List(x), Data::List(y)) => match (x, y) {
                (Some(x), Some(y)) => self.seq(x, y),
                (x, y) => x.is_some().cmp(&y.is_some()),
            },
            (Data::Map(x), Data::Map(y)) => match (x, y) {
                (Some(x), Some(y)) => {
                    let mut x = x.to_vec();
                    let mut y = y.to_vec();
                    x.sort_by(|p, q| self.cmp(&p.0, &q.0));
                    y.sort_by(|p, q| self.cmp(&p.0, &q.0));
                    for ((xk, xv), (yk, yv)) in x.iter().zip(&y) {
                        let ord = self.cmp(xk, yk).then_with(|| self.cmp(xv, yv));
                        if ord.is_ne() {
                            return ord;
                        }
                    }
                    x.len().cmp(&y.len())
                }
                (x, y) => x.is_some().cmp(&y.is_some()),
            },
            (Data::Option(x), Data::Option(y)) | (Data::Dynamic(x), Data::Dynamic(y)) => {
                match (x, y) {
                    (Some(x), Some(y)) => self.cmp(x, y),
                    (x, y) => x.is_some().cmp(&y.is_some()),
                }
            }
            (Data::Pointer(x), Data::Pointer(y)) => {
                if let (Some(x), Some(y)) = (x, y)
                    && (x.address() == y.address() || !self.seen.insert((x.address(), y.address())))
                {
                    return Ordering::Equal;
                }
                match (a.pointee(), b.pointee()) {
                    (Some(x), Some(y)) => self.cmp(&x, &y),
                    (x, y) => x.is_some().cmp(&y.is_some()),
                }
            }
            (Data::Opaque(x), Data::Opaque(y)) => x.cmp(y),
            // same shape always means same data variant
            _ => Ordering::Equal,
        }
    }

    fn seq(&mut self, x: &[Value], y: &[Value]) -> Ordering {
        for (x, y) in x.iter().zip(y) {
            let ord = self.cmp(x, y);
            if ord.is_ne() {
                return ord;
            }
        }
        x.len().cmp(&y.len())
    }
}

fn compare_floats(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x.total_cmp(&y),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::{AnyValue, reflect};

    fn sorted<T: crate::Reflect>(values: &[T]) -> Vec<String> {
        let mut values: Vec<Value> = values.iter().map(reflect).collect();
        values.sort_by(compare_keys);
        values.iter().map(|v| format!("{v:?}")).collect()
    }

    #[test]
    fn numbers_and_strings() {
        assert_eq!(
            sorted(&[3i32, -1, 2]),
            ["Value<i32>(-1)", "Value<i32>(2)", "Value<i32>(3)"]
        );
        assert_eq!(
            sorted(&["b", "a", "ab"]),
            [
                "Value<&str>(\"a\")",
                "Value<&str>(\"ab\")",
                "Value<&str>(\"b\")"
            ]
        );
    }

    #[test]
    fn nan_sorts_first() {
        assert_eq!(
            sorted(&[1.0f64, f64::NAN, -2.0]),
            ["Value<f64>(NaN)", "Value<f64>(-2.0)", "Value<f64>(1.0)"]
        );
    }

    #[test]
    fn none_sorts_first() {
        assert_eq!(
            sorted(&[Some(1u8), None]),
            ["Value<Option<u8>>(nil)", "Value<Option<u8>>(Value<u8>(1))"]
        );
    }

    #[test]
    fn pointers_compare_by_content() {
        let a = reflect(&Rc::new(2u8));
        let b = reflect(&Rc::new(1u8));
        assert_eq!(compare_keys(&a, &b), Ordering::Greater);
        assert_eq!(compare_keys(&a, &a.clone()), Ordering::Equal);
    }

    #[test]
    fn cyclic_keys_terminate() {
        struct Ring {
            id: u8,
            next: Option<Rc<RefCell<Ring>>>,
        }
        crate::reflect!(Ring { id, next });

        let ring = |id| {
            let r = Rc::new(RefCell::new(Ring { id, next: None }));
            r.borrow_mut().next = Some(r.clone());
            r
        };
        let (one, other, two) = (ring(1), ring(1), ring(2));
        let (a, b, c) = (reflect(&one), reflect(&other), reflect(&two));
        assert_eq!(compare_keys(&a, &b), Ordering::Equal);
        assert_eq!(compare_keys(&a, &c), Ordering::Less);
        assert_eq!(compare_keys(&c, &b), Ordering::Greater);

        for r in [one, other, two] {
            r.borrow_mut().next = None;
        }
    }

    #[test]
    fn mixed_dynamic_orders_by_type_then_value() {
        let keys: Vec<AnyValue> = vec![Box::new(2i64), Box::new("x"), Box::new(1i64)];
        let mut values: Vec<Value> = keys.iter().map(reflect).collect();
        values.sort_by(compare_keys);
        let inner: Vec<String> = values
            .iter()
            .map(|v| format!("{:?}", v.inner().unwrap()))
            .collect();
        assert_eq!(
            inner,
            ["Value<&str>(\"x\")", "Value<i64>(1)", "Value<i64>(2)"]
        );
    }
}
