#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod same;

pub use lockstep_diff::Options;
pub use same::{Sameness, check_same, check_same_with};

/// Asserts that two values are structurally the same.
///
/// This macro does not require `PartialEq`: it compares the values through
/// [`Reflect`](lockstep_core::Reflect). Both values must have the same type,
/// which lets type inference flow between the arguments.
///
/// # Panics
///
/// Panics if the values differ, listing every difference.
///
/// # Example
///
/// ```
/// use lockstep_assert::assert_same;
///
/// let x: Option<Option<i32>> = Some(None);
/// assert_same!(x, Some(None));
/// ```
#[macro_export]
macro_rules! assert_same {
    ($got:expr, $want:expr $(,)?) => {
        match $crate::check_same(&$got, &$want) {
            $crate::Sameness::Same => {}
            $crate::Sameness::Different(diff) => {
                panic!("assertion `assert_same!(got, want)` failed\n\n{diff}");
            }
        }
    };
    ($got:expr, $want:expr, $($arg:tt)+) => {
        match $crate::check_same(&$got, &$want) {
            $crate::Sameness::Same => {}
            $crate::Sameness::Different(diff) => {
                panic!(
                    "assertion `assert_same!(got, want)` failed: {}\n\n{diff}",
                    format_args!($($arg)+)
                );
            }
        }
    };
}

/// Asserts that two values are structurally the same, with custom
/// [`Options`].
///
/// # Panics
///
/// Panics if the values differ, listing every difference.
///
/// # Example
///
/// ```
/// use lockstep_assert::{Options, assert_same_with};
///
/// assert_same_with!(vec![f64::NAN], vec![f64::NAN], Options::new().equal_nan());
/// ```
#[macro_export]
macro_rules! assert_same_with {
    ($got:expr, $want:expr, $options:expr $(,)?) => {
        match $crate::check_same_with(&$got, &$want, &$options) {
            $crate::Sameness::Same => {}
            $crate::Sameness::Different(diff) => {
                panic!("assertion `assert_same_with!(got, want, options)` failed\n\n{diff}");
            }
        }
    };
    ($got:expr, $want:expr, $options:expr, $($arg:tt)+) => {
        match $crate::check_same_with(&$got, &$want, &$options) {
            $crate::Sameness::Same => {}
            $crate::Sameness::Different(diff) => {
                panic!(
                    "assertion `assert_same_with!(got, want, options)` failed: {}\n\n{diff}",
                    format_args!($($arg)+)
                );
            }
        }
    };
}

/// Asserts that two values are structurally the same (debug builds only).
///
/// Like [`assert_same!`], but only enabled in debug builds.
#[macro_export]
macro_rules! debug_assert_same {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::assert_same!($($arg)*);
        }
    };
}

/// Asserts that two values are structurally the same with custom options
/// (debug builds only).
///
/// Like [`assert_same_with!`], but only enabled in debug builds.
#[macro_export]
macro_rules! debug_assert_same_with {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::assert_same_with!($($arg)*);
        }
    };
}
