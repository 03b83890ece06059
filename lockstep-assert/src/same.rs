//! Structural sameness checking.

use lockstep_core::Reflect;
use lockstep_diff::{Options, each};

/// Result of checking if two values are structurally the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sameness {
    /// The values are structurally the same.
    Same,
    /// The values differ; holds every difference, one message per line.
    Different(String),
}

impl Sameness {
    /// Whether the values were the same.
    pub fn is_same(&self) -> bool {
        matches!(self, Sameness::Same)
    }
}

/// Check if two values are structurally the same.
///
/// This does NOT require `PartialEq`: it walks both values via reflection.
/// Differences are labelled `got` and `want`.
pub fn check_same<T: Reflect>(got: &T, want: &T) -> Sameness {
    check_same_with(got, want, &Options::new())
}

/// Check if two values are structurally the same, with custom options.
///
/// ```
/// use lockstep_assert::{Sameness, check_same_with};
/// use lockstep_diff::Options;
///
/// let options = Options::new().equal_nan();
/// assert_eq!(check_same_with(&f64::NAN, &f64::NAN, &options), Sameness::Same);
/// ```
pub fn check_same_with<T: Reflect>(got: &T, want: &T, options: &Options) -> Sameness {
    let options = options.clone().test_mode();
    let mut out = String::new();
    each(|m| out.push_str(m), got, want, &options);
    if out.is_empty() {
        Sameness::Same
    } else {
        Sameness::Different(out)
    }
}
