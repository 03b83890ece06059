#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod display;
mod printer;

pub use display::*;
pub use printer::*;
