//! Static shape descriptors.
//!
//! Every type that can be compared carries one `&'static Shape`, built in
//! const context. Two values are comparable only when their shapes have the
//! same [`ShapeId`].

use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

/// `TypeId` equivalent that can be stored in a `const`.
#[derive(Clone, Copy)]
pub struct ShapeId {
    type_id_fn: fn() -> TypeId,
}

fn type_id_of<T: ?Sized + 'static>() -> TypeId {
    TypeId::of::<T>()
}

impl ShapeId {
    /// Create a [`ShapeId`] for a type.
    #[must_use]
    pub const fn of<T: ?Sized + 'static>() -> Self {
        ShapeId {
            type_id_fn: type_id_of::<T>,
        }
    }

    /// Get the underlying [`TypeId`].
    #[inline]
    pub fn get(self) -> TypeId {
        (self.type_id_fn)()
    }
}

impl fmt::Debug for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.get(), f)
    }
}

impl PartialEq for ShapeId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl Eq for ShapeId {}

impl Hash for ShapeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // the same fn can be instantiated in several codegen units,
        // so hash the TypeId rather than the pointer
        self.get().hash(state);
    }
}

/// Writes the full name of a type, e.g. `Vec<Point>`.
pub type TypeNameFn = fn(&mut fmt::Formatter<'_>) -> fmt::Result;

/// Schema for one type: its identity, its name and how it is laid out.
#[derive(Clone, Copy)]
pub struct Shape {
    /// Unique type identifier.
    pub id: ShapeId,

    /// Bare name of the type, without generic arguments (`Vec`, `Point`, `i64`).
    pub type_identifier: &'static str,

    /// Writes the full type name. Falls back to `type_identifier` when absent.
    pub type_name: Option<TypeNameFn>,

    /// Structural definition.
    pub def: Def,
}

impl Shape {
    /// Start building the shape of `T`.
    pub const fn builder<T: ?Sized + 'static>(type_identifier: &'static str) -> ShapeBuilder {
        ShapeBuilder {
            shape: Shape {
                id: ShapeId::of::<T>(),
                type_identifier,
                type_name: None,
                def: Def::Dynamic,
            },
        }
    }

    /// Whether both shapes describe the same type.
    #[inline]
    pub fn is(&self, other: &Shape) -> bool {
        self.id == other.id
    }

    /// Returns the struct definition, if this is a struct or tuple.
    pub fn struct_def(&self) -> Option<&StructDef> {
        match &self.def {
            Def::Struct(sd) => Some(sd),
            _ => None,
        }
    }

    /// Whether this is a struct with at least one field.
    pub fn is_record(&self) -> bool {
        matches!(self.def, Def::Struct(sd) if !matches!(sd.kind, StructKind::Unit))
    }

    /// Whether values of this shape are lists of bytes.
    pub fn is_byte_list(&self) -> bool {
        match self.def {
            Def::List(ld) => matches!(ld.t.def, Def::Scalar(ScalarType::U8)),
            _ => false,
        }
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.is(other)
    }
}

impl Eq for Shape {}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_name {
            Some(type_name) => type_name(f),
            None => f.write_str(self.type_identifier),
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("type", &format_args!("{self}"))
            .field("def", &self.def)
            .finish()
    }
}

/// Const builder for [`Shape`].
#[derive(Clone, Copy)]
pub struct ShapeBuilder {
    shape: Shape,
}

impl ShapeBuilder {
    /// Set the function that writes the full type name.
    pub const fn type_name(mut self, type_name: TypeNameFn) -> Self {
        self.shape.type_name = Some(type_name);
        self
    }

    /// Set the structural definition.
    pub const fn def(mut self, def: Def) -> Self {
        self.shape.def = def;
        self
    }

    /// Finish the shape.
    pub const fn build(self) -> Shape {
        self.shape
    }
}

/// Structural category of a type.
#[derive(Clone, Copy, Debug)]
pub enum Def {
    /// Leaf value compared by value equality.
    Scalar(ScalarType),

    /// Record with a fixed list of fields (structs, tuples, unit).
    Struct(StructDef),

    /// Tagged union: one of several variants, each with its own fields.
    Enum(EnumDef),

    /// Fixed-size sequence without identity.
    Array(ArrayDef),

    /// Growable sequence with heap identity.
    List(ListDef),

    /// Associative map (or set) with heap identity.
    Map(MapDef),

    /// Owned optional value.
    Option(OptionDef),

    /// Reference to a shared or boxed value, with identity.
    Pointer(PointerDef),

    /// Holds exactly one value of any shape, chosen at runtime.
    Dynamic,

    /// Compared only by identity.
    Opaque(OpaqueKind),
}

/// Kinds of scalar leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ScalarType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Complex32,
    Complex64,
    Char,
    String,
    Str,
}

impl ScalarType {
    /// Whether the scalar is numeric. Numeric scalars show their type when
    /// the context does not pin it.
    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            ScalarType::Bool | ScalarType::Char | ScalarType::String | ScalarType::Str
        )
    }
}

/// Layout of a struct-like definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructKind {
    /// `struct Point { x: i64 }`
    Struct,
    /// `struct Meters(f64)`
    TupleStruct,
    /// `(A, B)`
    Tuple,
    /// `struct Marker;`
    Unit,
}

/// Definition of a struct, tuple or unit type.
#[derive(Clone, Copy, Debug)]
pub struct StructDef {
    /// Layout kind.
    pub kind: StructKind,
    /// Fields in declaration order.
    pub fields: &'static [Field],
}

impl StructDef {
    /// Position of the field called `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// One field of a struct or variant.
#[derive(Clone, Copy, Debug)]
pub struct Field {
    /// Field name; tuple fields use their position (`"0"`, `"1"`, ...).
    pub name: &'static str,
    /// Lazily resolved shape, so recursive types can refer to themselves.
    pub shape: fn() -> &'static Shape,
}

impl Field {
    /// Resolve the shape of this field.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }
}

/// Definition of an enum.
#[derive(Clone, Copy, Debug)]
pub struct EnumDef {
    /// Variants in declaration order.
    pub variants: &'static [Variant],
}

impl EnumDef {
    /// Position of the variant called `name`.
    pub fn variant_index(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.name == name)
    }
}

/// One enum variant.
#[derive(Clone, Copy, Debug)]
pub struct Variant {
    /// Variant name.
    pub name: &'static str,
    /// `Struct`, `TupleStruct` or `Unit`.
    pub kind: StructKind,
    /// Payload fields.
    pub fields: &'static [Field],
}

/// Definition of a fixed-size array.
#[derive(Clone, Copy, Debug)]
pub struct ArrayDef {
    /// Element shape.
    pub t: &'static Shape,
    /// Length.
    pub n: usize,
}

/// Definition of a growable list.
#[derive(Clone, Copy, Debug)]
pub struct ListDef {
    /// Element shape.
    pub t: &'static Shape,
}

/// Definition of a map or a set.
#[derive(Clone, Copy, Debug)]
pub struct MapDef {
    /// Key shape.
    pub k: &'static Shape,
    /// Value shape (`()` for sets).
    pub v: &'static Shape,
    /// Sets are maps whose values carry no information.
    pub set: bool,
}

/// Definition of an `Option`-like type.
#[derive(Clone, Copy, Debug)]
pub struct OptionDef {
    /// Shape of the held value.
    pub t: &'static Shape,
}

/// Definition of a smart pointer.
#[derive(Clone, Copy, Debug)]
pub struct PointerDef {
    /// Shape of the pointee.
    pub pointee: &'static Shape,
    /// Which smart pointer.
    pub kind: PointerKind,
}

/// Smart pointer flavors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum PointerKind {
    Box,
    Rc,
    Arc,
}

/// Values compared by identity only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpaqueKind {
    /// Function pointers.
    Function,
    /// Raw pointers.
    RawPointer,
}

/// Positional field names used by tuple-like definitions.
pub const INDEX_NAMES: [&str; 16] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15",
];

/// Rename fields to their positions. Used for tuple structs and tuple variants.
pub const fn positional<const N: usize>(mut fields: [Field; N]) -> [Field; N] {
    let mut i = 0;
    while i < N {
        fields[i].name = INDEX_NAMES[i];
        i += 1;
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reflect;

    #[test]
    fn shape_id_matches_type_id() {
        assert_eq!(ShapeId::of::<u32>().get(), TypeId::of::<u32>());
        assert_ne!(ShapeId::of::<u32>(), ShapeId::of::<i32>());
    }

    #[test]
    fn positional_names() {
        const FIELDS: [Field; 2] = positional([
            Field {
                name: "a",
                shape: || <i64 as Reflect>::SHAPE,
            },
            Field {
                name: "b",
                shape: || <bool as Reflect>::SHAPE,
            },
        ]);
        assert_eq!(FIELDS[0].name, "0");
        assert_eq!(FIELDS[1].name, "1");
        assert_eq!(FIELDS[1].shape().to_string(), "bool");
    }
}
