#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod macros;

mod shape;
pub use shape::*;

mod value;
pub use value::{Data, Identity, Link, Node, Pointee, Value};

mod reflect;
pub use reflect::*;

mod ordering;
pub use ordering::compare_keys;

// Reflect implementations for std types
mod impls;
pub use impls::duration_of;

#[cfg(test)]
mod tests {
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    assert_impl_all!(Shape: Copy, Send, Sync);
    assert_impl_all!(ShapeId: Copy, Send, Sync);
    assert_not_impl_any!(Value: Send, Sync);
}
