//! Converting Rust values into [`Value`] graphs.

use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::value::{Link, Node};
use crate::{Data, Shape, ShapeId, Value};

/// Types that can be compared structurally.
///
/// Implement it with the [`reflect!`](crate::reflect!) macro, or by hand for
/// types the macro does not cover.
pub trait Reflect: 'static {
    /// Shape shared by every value of this type.
    const SHAPE: &'static Shape;

    /// Convert `self` into a [`Value`].
    ///
    /// Pointees must be converted through [`Reflector::pointer`] so that
    /// aliasing and cycles are preserved.
    fn reflect(&self, cx: &mut Reflector) -> Value;
}

/// Object-safe twin of [`Reflect`], implemented for every `Reflect` type.
pub trait DynReflect: 'static {
    /// Shape of the concrete type.
    fn dyn_shape(&self) -> &'static Shape;

    /// Convert the concrete value.
    fn dyn_reflect(&self, cx: &mut Reflector) -> Value;
}

impl<T: Reflect> DynReflect for T {
    fn dyn_shape(&self) -> &'static Shape {
        T::SHAPE
    }

    fn dyn_reflect(&self, cx: &mut Reflector) -> Value {
        self.reflect(cx)
    }
}

/// A dynamically typed value holder, compared through the value it holds.
pub type AnyValue = Box<dyn DynReflect>;

/// Conversion context.
///
/// Remembers every pointee it converted, keyed by address and shape, so a
/// target reachable through several pointers becomes one shared node. Lists
/// and maps are remembered the same way, so converting one collection twice
/// in the same context yields two values with the same identity.
#[derive(Default)]
pub struct Reflector {
    seen: HashMap<(usize, ShapeId), Weak<Node>>,
    containers: HashMap<(usize, ShapeId), Value>,
}

impl Reflector {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a value.
    pub fn reflect<T: Reflect>(&mut self, value: &T) -> Value {
        value.reflect(self)
    }

    /// Convert a pointer of shape `shape` whose target is `target`.
    pub fn pointer<T: Reflect>(&mut self, shape: &'static Shape, target: &T) -> Value {
        let key = (core::ptr::from_ref(target).addr(), T::SHAPE.id);
        if let Some(node) = self.seen.get(&key).and_then(Weak::upgrade) {
            let link = if node.is_finished() {
                Link::Strong(node)
            } else {
                // still being converted further up: this edge closes a cycle
                Link::Back(Rc::downgrade(&node))
            };
            return Value::new(shape, Data::Pointer(Some(link)));
        }

        let node = Rc::new(Node::pending());
        self.seen.insert(key, Rc::downgrade(&node));
        let value = target.reflect(self);
        node.finish(value);
        Value::new(shape, Data::Pointer(Some(Link::Strong(node))))
    }
}

impl Reflector {
    /// Convert the collection at `source` with `build`, or return the value
    /// already built for it in this context.
    pub fn shared<S: ?Sized>(
        &mut self,
        shape: &'static Shape,
        source: &S,
        build: impl FnOnce(&mut Self) -> Value,
    ) -> Value {
        let key = (core::ptr::from_ref(source).cast::<()>().addr(), shape.id);
        if let Some(value) = self.containers.get(&key) {
            return value.clone();
        }
        let value = build(self);
        self.containers.insert(key, value.clone());
        value
    }
}

/// Convert a value with a fresh [`Reflector`].
pub fn reflect<T: Reflect>(value: &T) -> Value {
    Reflector::new().reflect(value)
}

/// Shape of the field selected by `_select`. Used by [`reflect!`](crate::reflect!).
pub fn shape_of_field<S, F: Reflect>(_select: fn(&S) -> &F) -> &'static Shape {
    F::SHAPE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_context_shares_collections() {
        let v = vec![1u8, 2];
        let mut cx = Reflector::new();
        let a = cx.reflect(&v);
        let b = cx.reflect(&v);
        assert!(a.identity().is_some());
        assert_eq!(a.identity(), b.identity());

        let c = reflect(&v);
        assert_ne!(a.identity(), c.identity());
    }

    #[test]
    fn one_context_shares_pointees() {
        let shared = std::rc::Rc::new(5i64);
        let pair = (shared.clone(), shared);
        let v = reflect(&pair);
        assert_eq!(v.fields()[0].identity(), v.fields()[1].identity());
    }
}
