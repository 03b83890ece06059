//! Built-in transform and format hooks.

use lockstep_core::{Data, Value, duration_of};
use lockstep_pretty::format_short;

/// Stands in for NaN so that two NaNs compare equal.
struct Nan;
lockstep_core::reflect!(Nan);

/// Copy of `v` with the fields for which `zero` holds replaced by zero values.
fn map_fields(v: &Value, zero: impl Fn(&str) -> bool) -> Value {
    let Some(sd) = v.shape().struct_def() else {
        return v.clone();
    };
    let fields = sd
        .fields
        .iter()
        .zip(v.fields())
        .map(|(f, value)| {
            if zero(f.name) {
                Value::zero(f.shape())
            } else {
                value.clone()
            }
        })
        .collect();
    Value::new(v.shape(), Data::Struct(fields))
}

pub(crate) fn zero_fields(v: &Value, names: &[String]) -> Value {
    map_fields(v, |name| names.iter().any(|n| n == name))
}

pub(crate) fn keep_fields(v: &Value, names: &[String]) -> Value {
    map_fields(v, |name| !names.iter().any(|n| n == name))
}

pub(crate) fn equal_nan(v: &Value) -> Value {
    match v.as_f64() {
        Some(x) if x.is_nan() => lockstep_core::reflect(&Nan),
        _ => v.clone(),
    }
}

pub(crate) fn duration_delta(a: &Value, b: &Value) -> String {
    let (Some(x), Some(y)) = (duration_of(a), duration_of(b)) else {
        return format!("{} != {}", format_short(a, true), format_short(b, true));
    };
    let delta = if y >= x {
        format!("{:?}", y - x)
    } else {
        format!("-{:?}", x - y)
    };
    format!("{x:?} != {y:?} ({delta})")
}
