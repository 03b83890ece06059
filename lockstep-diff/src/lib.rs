#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod tracing_macros;

mod emit;
mod hooks;
mod options;
mod walk;

pub use options::*;

pub use lockstep_diff_core::{ColorMode, DiffSymbols, DiffTheme, TextPolicy};

use lockstep_core::{Reflect, Reflector, Value};

use crate::walk::Session;

/// Compare `a` and `b` and call `sink` once for every difference.
///
/// Each message is complete and ends in a newline. Nothing is reported when
/// the values are equal.
///
/// ```
/// use lockstep_diff::{Options, each};
///
/// let mut out = Vec::new();
/// each(|m| out.push(m.to_string()), &vec![1, 2, 3], &vec![1, 9, 3], &Options::new());
/// assert_eq!(out, ["Vec<i32>[1]: 2 != 9\n"]);
/// ```
pub fn each<T: Reflect>(sink: impl FnMut(&str), a: &T, b: &T, options: &Options) {
    // one context for both sides, so data they share keeps one identity
    let mut cx = Reflector::new();
    let a = cx.reflect(a);
    let b = cx.reflect(b);
    each_value(sink, &a, &b, options);
}

/// [`each`] for values that are already reflected.
pub fn each_value(mut sink: impl FnMut(&str), a: &Value, b: &Value, options: &Options) {
    Session::new(options, &mut sink).compare(a, b);
}

/// Every difference between `a` and `b`, in the order they are found.
pub fn differences<T: Reflect>(a: &T, b: &T, options: &Options) -> Vec<String> {
    let mut out = Vec::new();
    each(|m| out.push(m.to_string()), a, b, options);
    out
}

/// Log every difference between `a` and `b` through the [`log`] crate.
///
/// Messages use the target `lockstep` and the level set with
/// [`Options::log_level`].
pub fn log<T: Reflect>(a: &T, b: &T, options: &Options) {
    let level = options.log_level;
    each(
        |m| log::log!(target: "lockstep", level, "{}", m.trim_end()),
        a,
        b,
        options,
    );
}
