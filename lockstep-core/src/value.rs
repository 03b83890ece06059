//! The runtime value graph.
//!
//! A [`Value`] pairs a static [`Shape`] with its data. Lists, maps and
//! pointers carry heap identity: two values that were reflected from the
//! same Rust allocation share the same node, so aliasing and cycles survive
//! the conversion.

use core::fmt;
use core::ops::Deref;
use std::cell::OnceCell;
use std::rc::{Rc, Weak};

use crate::{Def, Shape, ShapeId};

/// A runtime-typed datum.
#[derive(Clone)]
pub struct Value {
    shape: &'static Shape,
    data: Data,
}

/// Data held by a [`Value`]; which variant is used is decided by the shape.
#[derive(Clone)]
pub enum Data {
    /// `bool`
    Bool(bool),
    /// Any signed integer.
    Int(i128),
    /// Any unsigned integer.
    Uint(u128),
    /// `f32` or `f64`.
    Float(f64),
    /// Complex number, real and imaginary parts.
    Complex(f64, f64),
    /// `char`
    Char(char),
    /// `String` or `&str`.
    Str(String),
    /// Struct, tuple or unit fields in declaration order.
    Struct(Vec<Value>),
    /// Enum variant with its payload.
    Enum {
        /// Index into the shape's variant list.
        variant: usize,
        /// Payload fields in declaration order.
        fields: Vec<Value>,
    },
    /// Fixed-size sequence.
    Array(Vec<Value>),
    /// Growable sequence; `None` is a nil list.
    List(Option<Rc<[Value]>>),
    /// Map entries in no particular order; `None` is a nil map.
    Map(Option<Rc<[(Value, Value)]>>),
    /// `Some` or `None`.
    Option(Option<Box<Value>>),
    /// Smart pointer; `None` is a null pointer.
    Pointer(Option<Link>),
    /// Dynamically typed holder; `None` is empty.
    Dynamic(Option<Box<Value>>),
    /// Address of a function or raw pointer; `None` is null.
    Opaque(Option<usize>),
}

/// Identity of a heap node, used for cycle detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identity {
    /// Address of the node.
    pub address: usize,
    /// Shape the node was seen as.
    pub shape: ShapeId,
}

/// Target of a pointer.
pub struct Node {
    value: OnceCell<Value>,
}

impl Node {
    pub(crate) fn pending() -> Self {
        Node {
            value: OnceCell::new(),
        }
    }

    pub(crate) fn finish(&self, value: Value) {
        // a node is finished exactly once, by the conversion that created it
        let _ = self.value.set(value);
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.value.get().is_some()
    }
}

/// Edge from a pointer to its target.
///
/// Edges that close a cycle are weak, so a cyclic graph is freed together
/// with its root.
#[derive(Clone)]
pub enum Link {
    /// Owning edge.
    Strong(Rc<Node>),
    /// Edge back to a node that was still being converted.
    Back(Weak<Node>),
}

impl Link {
    /// Address of the target node.
    pub fn address(&self) -> usize {
        match self {
            Link::Strong(node) => Rc::as_ptr(node).addr(),
            Link::Back(node) => Weak::as_ptr(node).addr(),
        }
    }

    /// The target, if it is still alive.
    pub fn target(&self) -> Option<Pointee> {
        let node = match self {
            Link::Strong(node) => node.clone(),
            Link::Back(node) => node.upgrade()?,
        };
        node.is_finished().then_some(Pointee(node))
    }
}

/// Borrow of a finished pointer target.
pub struct Pointee(Rc<Node>);

impl Deref for Pointee {
    type Target = Value;

    fn deref(&self) -> &Value {
        match self.0.value.get() {
            Some(value) => value,
            None => unreachable!("pointees are only handed out once finished"),
        }
    }
}

impl Value {
    /// Pair a shape with its data.
    pub fn new(shape: &'static Shape, data: Data) -> Self {
        Value { shape, data }
    }

    /// Wrap `target` in a fresh pointer node.
    pub fn pointer_to(shape: &'static Shape, target: Value) -> Self {
        let node = Rc::new(Node::pending());
        node.finish(target);
        Value::new(shape, Data::Pointer(Some(Link::Strong(node))))
    }

    /// Build a list value with a fresh identity.
    pub fn list(shape: &'static Shape, elements: Vec<Value>) -> Self {
        Value::new(shape, Data::List(Some(elements.into())))
    }

    /// Build a map value with a fresh identity.
    pub fn map(shape: &'static Shape, entries: Vec<(Value, Value)>) -> Self {
        Value::new(shape, Data::Map(Some(entries.into())))
    }

    /// Build an enum value, looking the variant up by name.
    ///
    /// # Panics
    ///
    /// Panics if `shape` is not an enum or has no variant called `variant`.
    pub fn variant(shape: &'static Shape, variant: &str, fields: Vec<Value>) -> Self {
        let index = match shape.def {
            Def::Enum(ed) => ed.variant_index(variant),
            _ => None,
        };
        let Some(variant) = index else {
            panic!("{shape} has no variant named {variant}");
        };
        Value::new(shape, Data::Enum { variant, fields })
    }

    /// Wrap a value of any shape in a dynamic holder of shape `shape`.
    pub fn dynamic(shape: &'static Shape, inner: Value) -> Self {
        Value::new(shape, Data::Dynamic(Some(Box::new(inner))))
    }

    /// The zero value of a shape: `false`, `0`, `""`, empty containers,
    /// `None`, null pointers, and structs made of zero fields.
    pub fn zero(shape: &'static Shape) -> Self {
        use crate::ScalarType as S;
        let data = match shape.def {
            Def::Scalar(S::Bool) => Data::Bool(false),
            Def::Scalar(S::I8 | S::I16 | S::I32 | S::I64 | S::I128 | S::Isize) => Data::Int(0),
            Def::Scalar(S::U8 | S::U16 | S::U32 | S::U64 | S::U128 | S::Usize) => Data::Uint(0),
            Def::Scalar(S::F32 | S::F64) => Data::Float(0.0),
            Def::Scalar(S::Complex32 | S::Complex64) => Data::Complex(0.0, 0.0),
            Def::Scalar(S::Char) => Data::Char('\0'),
            Def::Scalar(S::String | S::Str) => Data::Str(String::new()),
            Def::Struct(sd) => Data::Struct(sd.fields.iter().map(|f| Value::zero(f.shape())).collect()),
            Def::Enum(ed) => Data::Enum {
                variant: 0,
                fields: ed
                    .variants
                    .first()
                    .map(|v| v.fields.iter().map(|f| Value::zero(f.shape())).collect())
                    .unwrap_or_default(),
            },
            Def::Array(ad) => Data::Array((0..ad.n).map(|_| Value::zero(ad.t)).collect()),
            Def::List(_) => Data::List(Some(Rc::from([]))),
            Def::Map(_) => Data::Map(Some(Rc::from([]))),
            Def::Option(_) => Data::Option(None),
            Def::Pointer(_) => Data::Pointer(None),
            Def::Dynamic => Data::Dynamic(None),
            Def::Opaque(_) => Data::Opaque(None),
        };
        Value::new(shape, data)
    }

    /// Shape of this value.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Data of this value.
    #[inline]
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Whether this is a nil list or map, a null pointer or function, an
    /// empty dynamic holder, or `None`.
    pub fn is_nil(&self) -> bool {
        matches!(
            self.data,
            Data::List(None)
                | Data::Map(None)
                | Data::Option(None)
                | Data::Pointer(None)
                | Data::Dynamic(None)
                | Data::Opaque(None)
        )
    }

    /// Heap identity of lists, maps and pointers; `None` for everything
    /// else, including nil values.
    pub fn identity(&self) -> Option<Identity> {
        let address = match &self.data {
            Data::List(Some(rc)) => Rc::as_ptr(rc).cast::<()>().addr(),
            Data::Map(Some(rc)) => Rc::as_ptr(rc).cast::<()>().addr(),
            Data::Pointer(Some(link)) => link.address(),
            _ => return None,
        };
        Some(Identity {
            address,
            shape: self.shape.id,
        })
    }

    /// Field of a struct by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        let index = self.shape.struct_def()?.field_index(name)?;
        match &self.data {
            Data::Struct(fields) => fields.get(index),
            _ => None,
        }
    }

    /// Replace the field called `name`, returning `None` if there is none.
    pub fn with_field(mut self, name: &str, value: Value) -> Option<Value> {
        let index = self.shape.struct_def()?.field_index(name)?;
        match &mut self.data {
            Data::Struct(fields) => *fields.get_mut(index)? = value,
            _ => return None,
        }
        Some(self)
    }

    /// Fields of a struct or of the current enum variant.
    pub fn fields(&self) -> &[Value] {
        match &self.data {
            Data::Struct(fields) | Data::Enum { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Elements of an array or list.
    pub fn elements(&self) -> &[Value] {
        match &self.data {
            Data::Array(elements) => elements,
            Data::List(Some(elements)) => elements,
            _ => &[],
        }
    }

    /// Entries of a map.
    pub fn entries(&self) -> &[(Value, Value)] {
        match &self.data {
            Data::Map(Some(entries)) => entries,
            _ => &[],
        }
    }

    /// The value held by an option or dynamic holder.
    pub fn inner(&self) -> Option<&Value> {
        match &self.data {
            Data::Option(inner) | Data::Dynamic(inner) => inner.as_deref(),
            _ => None,
        }
    }

    /// Target of a pointer.
    pub fn pointee(&self) -> Option<Pointee> {
        match &self.data {
            Data::Pointer(Some(link)) => link.target(),
            _ => None,
        }
    }

    /// Name of the current enum variant.
    pub fn variant_name(&self) -> Option<&'static str> {
        match (&self.shape.def, &self.data) {
            (Def::Enum(ed), Data::Enum { variant, .. }) => ed.variants.get(*variant).map(|v| v.name),
            _ => None,
        }
    }

    /// Bytes of a byte list.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        if !self.shape.is_byte_list() {
            return None;
        }
        self.elements()
            .iter()
            .map(|e| match e.data {
                Data::Uint(b) => u8::try_from(b).ok(),
                _ => None,
            })
            .collect()
    }

    /// `bool` payload.
    pub fn as_bool(&self) -> Option<bool> {
        match self.data {
            Data::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Signed integer payload.
    pub fn as_i128(&self) -> Option<i128> {
        match self.data {
            Data::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Unsigned integer payload.
    pub fn as_u128(&self) -> Option<u128> {
        match self.data {
            Data::Uint(u) => Some(u),
            _ => None,
        }
    }

    /// Float payload.
    pub fn as_f64(&self) -> Option<f64> {
        match self.data {
            Data::Float(f) => Some(f),
            _ => None,
        }
    }

    /// String payload.
    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            Data::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value<{}>(", self.shape)?;
        match &self.data {
            Data::Bool(b) => write!(f, "{b}")?,
            Data::Int(i) => write!(f, "{i}")?,
            Data::Uint(u) => write!(f, "{u}")?,
            Data::Float(x) => write!(f, "{x:?}")?,
            Data::Complex(re, im) => write!(f, "{re:?}{im:+?}i")?,
            Data::Char(c) => write!(f, "{c:?}")?,
            Data::Str(s) => write!(f, "{s:?}")?,
            Data::Struct(fields) | Data::Array(fields) => f.debug_list().entries(fields).finish()?,
            Data::Enum { variant, fields } => {
                write!(f, "#{variant} ")?;
                f.debug_list().entries(fields).finish()?
            }
            Data::List(Some(elements)) => f.debug_list().entries(elements.iter()).finish()?,
            Data::Map(Some(entries)) => f
                .debug_map()
                .entries(entries.iter().map(|(k, v)| (k, v)))
                .finish()?,
            Data::Option(Some(inner)) | Data::Dynamic(Some(inner)) => write!(f, "{inner:?}")?,
            // pointers may be cyclic, show the address only
            Data::Pointer(Some(link)) => write!(f, "@{:#x}", link.address())?,
            Data::Opaque(Some(address)) => write!(f, "{address:#x}")?,
            Data::List(None)
            | Data::Map(None)
            | Data::Option(None)
            | Data::Pointer(None)
            | Data::Dynamic(None)
            | Data::Opaque(None) => f.write_str("nil")?,
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Reflect, reflect};

    #[derive(Clone)]
    struct Point {
        x: i64,
        y: i64,
    }
    reflect!(Point { x, y });

    #[test]
    fn field_lookup_and_replace() {
        let v = reflect(&Point { x: 1, y: 2 });
        assert_eq!(v.field("y").and_then(Value::as_i128), Some(2));
        assert!(v.field("z").is_none());

        let zeroed = v
            .with_field("x", Value::zero(<i64 as Reflect>::SHAPE))
            .unwrap();
        assert_eq!(zeroed.field("x").and_then(Value::as_i128), Some(0));
    }

    #[test]
    fn zero_of_struct() {
        let z = Value::zero(Point::SHAPE);
        assert_eq!(z.fields().len(), 2);
        assert!(z.fields().iter().all(|f| f.as_i128() == Some(0)));
    }

    #[test]
    fn list_identity_is_per_allocation() {
        let a = reflect(&vec![1u8, 2]);
        let b = a.clone();
        let c = reflect(&vec![1u8, 2]);
        assert_eq!(a.identity(), b.identity());
        assert_ne!(a.identity(), c.identity());
        assert_eq!(a.bytes(), Some(vec![1, 2]));
    }
}
