#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use lockstep_core::*;

pub use lockstep_diff::{Emit, Options, OptionsError, differences, each, each_value, log};

pub use lockstep_assert::{
    Sameness, assert_same, assert_same_with, check_same, check_same_with, debug_assert_same,
    debug_assert_same_with,
};

/// Short and full renderings of values.
pub mod pretty {
    pub use lockstep_pretty::*;
}

/// Edit scripts, paths and text diffs.
pub mod diff_core {
    pub use lockstep_diff_core::*;
}
