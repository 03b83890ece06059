#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod edit;
mod path;
mod symbols;
mod text;
mod theme;

pub use edit::*;
pub use path::*;
pub use symbols::*;
pub use text::*;
pub use theme::*;
