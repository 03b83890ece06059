//! Pretty printer implementation for [`Value`] graphs

use core::fmt::{self, Write};
use std::collections::HashSet;

use lockstep_core::{
    Data, Def, Identity, OpaqueKind, ScalarType, Shape, StructKind, Value, compare_keys,
};

/// Rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One line per value; nested containers are summarized.
    Short,
    /// One item per line, indented, everything shown.
    Full,
}

/// A formatter for values.
///
/// The short form fits on one line: containers deeper than
/// [`with_max_depth`](Self::with_max_depth) render as `{...}` and long
/// containers stop after [`with_max_items`](Self::with_max_items) items. The
/// full form puts every item of a container with more than one item on its
/// own line and aligns the keys of records and maps.
#[derive(Debug, Clone)]
pub struct PrettyPrinter {
    mode: Mode,
    max_depth: Option<usize>,
    max_items: Option<usize>,
    indent_size: usize,
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self::short()
    }
}

impl PrettyPrinter {
    /// Short mode: depth limit 2, at most 20 items per container.
    pub fn short() -> Self {
        Self {
            mode: Mode::Short,
            max_depth: Some(2),
            max_items: Some(20),
            indent_size: 4,
        }
    }

    /// Full mode: no depth limit, at most 20 items per container.
    pub fn full() -> Self {
        Self {
            mode: Mode::Full,
            max_depth: None,
            max_items: Some(20),
            indent_size: 4,
        }
    }

    /// The rendering mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Set the depth from which non-empty containers are summarized.
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set how many items of a container are shown before `...`.
    pub fn with_max_items(mut self, items: Option<usize>) -> Self {
        self.max_items = items;
        self
    }

    /// Set the indentation of full mode, in spaces.
    pub fn with_indent_size(mut self, size: usize) -> Self {
        self.indent_size = size;
        self
    }

    /// Format a value to a string. `want_type` asks for the type name of the
    /// root value even where it would normally be elided.
    pub fn format(&self, value: &Value, want_type: bool) -> String {
        let mut walk = Walk {
            printer: self,
            out: String::new(),
            seen: HashSet::new(),
        };
        // writing to a String cannot fail
        let _ = walk.value(value, want_type, 1, 0);
        walk.out
    }

    /// Format a value to a writer.
    pub fn format_to(&self, value: &Value, want_type: bool, w: &mut dyn Write) -> fmt::Result {
        w.write_str(&self.format(value, want_type))
    }
}

/// Render `value` in short mode.
pub fn format_short(value: &Value, want_type: bool) -> String {
    PrettyPrinter::short().format(value, want_type)
}

/// Render `value` in full mode, with its type.
pub fn format_full(value: &Value) -> String {
    PrettyPrinter::full().format(value, true)
}

/// Punctuation around the items of one container.
#[derive(Clone, Copy)]
struct Delims {
    open: &'static str,
    close: &'static str,
    elided: &'static str,
}

const BRACES: Delims = Delims {
    open: "{ ",
    close: " }",
    elided: "{...}",
};
const PARENS: Delims = Delims {
    open: "(",
    close: ")",
    elided: "(...)",
};
const BRACKETS: Delims = Delims {
    open: "[",
    close: "]",
    elided: "[...]",
};
const MAP_BRACES: Delims = Delims {
    open: "{",
    close: "}",
    elided: "{...}",
};

enum Key<'v> {
    None,
    Name(&'static str),
    Value(&'v Value),
}

struct Item<'v> {
    key: Key<'v>,
    value: Option<&'v Value>,
}

struct Walk<'p> {
    printer: &'p PrettyPrinter,
    out: String,
    seen: HashSet<Identity>,
}

impl Walk<'_> {
    fn value(&mut self, v: &Value, want_type: bool, depth: usize, level: usize) -> fmt::Result {
        if let Some(id) = v.identity()
            && !self.seen.insert(id)
        {
            return self.out.write_str("...");
        }

        let shape = v.shape();
        match (&shape.def, v.data()) {
            (Def::Scalar(scalar), data) => self.scalar(shape, *scalar, data, want_type),

            (Def::Struct(sd), Data::Struct(fields)) => {
                let items = sd
                    .fields
                    .iter()
                    .zip(fields)
                    .map(|(f, value)| Item {
                        key: match sd.kind {
                            StructKind::Struct => Key::Name(f.name),
                            _ => Key::None,
                        },
                        value: Some(value),
                    })
                    .collect();
                match sd.kind {
                    StructKind::Unit => write!(self.out, "{shape}"),
                    StructKind::Tuple if fields.len() == 1 => {
                        self.out.push('(');
                        self.value(&fields[0], false, depth + 1, level)?;
                        self.out.write_str(",)")
                    }
                    StructKind::Tuple => self.items(items, PARENS, depth, level),
                    StructKind::TupleStruct => {
                        if want_type {
                            write!(self.out, "{shape}")?;
                        }
                        self.items(items, PARENS, depth, level)
                    }
                    StructKind::Struct => {
                        if want_type {
                            write!(self.out, "{shape} ")?;
                        }
                        self.items(items, BRACES, depth, level)
                    }
                }
            }

            (Def::Enum(ed), Data::Enum { variant, fields }) => {
                let Some(variant) = ed.variants.get(*variant) else {
                    return self.out.write_str("(invalid)");
                };
                if want_type {
                    write!(self.out, "{shape}::")?;
                }
                self.out.write_str(variant.name)?;
                let items = variant
                    .fields
                    .iter()
                    .zip(fields)
                    .map(|(f, value)| Item {
                        key: match variant.kind {
                            StructKind::Struct => Key::Name(f.name),
                            _ => Key::None,
                        },
                        value: Some(value),
                    })
                    .collect();
                match variant.kind {
                    StructKind::Unit => Ok(()),
                    StructKind::Struct => {
                        self.out.push(' ');
                        self.items(items, BRACES, depth, level)
                    }
                    StructKind::Tuple | StructKind::TupleStruct => {
                        self.items(items, PARENS, depth, level)
                    }
                }
            }

            (Def::Array(_), Data::Array(elements)) => {
                if want_type {
                    write!(self.out, "{shape} ")?;
                }
                self.sequence(elements, BRACKETS, depth, level)
            }

            (Def::List(_), Data::List(None)) | (Def::Map(_), Data::Map(None)) => {
                self.typed_nil(shape, want_type)
            }
            (Def::List(_), Data::List(Some(elements))) => {
                if want_type {
                    write!(self.out, "{shape} ")?;
                }
                match v.bytes() {
                    Some(bytes) => write!(self.out, "b\"{}\"", bytes.escape_ascii()),
                    None => self.sequence(elements, BRACKETS, depth, level),
                }
            }

            (Def::Map(md), Data::Map(Some(entries))) => {
                if want_type {
                    write!(self.out, "{shape} ")?;
                }
                let mut sorted: Vec<&(Value, Value)> = entries.iter().collect();
                sorted.sort_by(|x, y| compare_keys(&x.0, &y.0));
                let items = sorted
                    .into_iter()
                    .map(|(k, value)| Item {
                        key: Key::Value(k),
                        value: (!md.set).then_some(value),
                    })
                    .collect();
                self.items(items, MAP_BRACES, depth, level)
            }

            (Def::Option(_), Data::Option(None)) => {
                if want_type {
                    write!(self.out, "{shape}::")?;
                }
                self.out.write_str("None")
            }
            (Def::Option(_), Data::Option(Some(inner))) => {
                self.out.write_str("Some(")?;
                self.value(inner, want_type, depth, level)?;
                self.out.write_str(")")
            }

            (Def::Pointer(_), Data::Pointer(None)) => self.typed_nil(shape, want_type),
            (Def::Pointer(pd), Data::Pointer(Some(_))) => {
                let Some(target) = v.pointee() else {
                    return self.out.write_str("...");
                };
                if want_type || !pd.pointee.is_record() {
                    self.out.push('&');
                }
                // chained pointers are confusing without their types
                let want_type = want_type || matches!(pd.pointee.def, Def::Pointer(_));
                self.value(&target, want_type, depth, level)
            }

            (Def::Dynamic, Data::Dynamic(None)) => self.out.write_str("nil"),
            (Def::Dynamic, Data::Dynamic(Some(inner))) => self.value(inner, true, depth, level),

            (Def::Opaque(OpaqueKind::Function), Data::Opaque(None)) => {
                if want_type {
                    write!(self.out, "({shape})(nil)")
                } else {
                    self.out.write_str("nil")
                }
            }
            (Def::Opaque(OpaqueKind::Function), Data::Opaque(Some(_))) => {
                write!(self.out, "{shape} {{...}}")
            }
            (Def::Opaque(OpaqueKind::RawPointer), Data::Opaque(address)) => {
                write!(self.out, "{shape}({:#x})", address.unwrap_or(0))
            }

            _ => self.out.write_str("(invalid)"),
        }
    }

    fn scalar(
        &mut self,
        shape: &Shape,
        scalar: ScalarType,
        data: &Data,
        want_type: bool,
    ) -> fmt::Result {
        let text = match (scalar, data) {
            (_, Data::Bool(b)) => b.to_string(),
            (_, Data::Int(i)) => i.to_string(),
            (_, Data::Uint(u)) => u.to_string(),
            (ScalarType::F32, Data::Float(x)) => format!("{:?}", *x as f32),
            (_, Data::Float(x)) => format!("{x:?}"),
            (ScalarType::Complex32, Data::Complex(re, im)) => {
                format!("{:?}{:+?}i", *re as f32, *im as f32)
            }
            (_, Data::Complex(re, im)) => format!("{re:?}{im:+?}i"),
            (_, Data::Char(c)) => format!("{c:?}"),
            (_, Data::Str(s)) => format!("{s:?}"),
            _ => "(invalid)".to_string(),
        };
        if want_type && scalar.is_numeric() {
            write!(self.out, "{shape}({text})")
        } else {
            self.out.write_str(&text)
        }
    }

    fn typed_nil(&mut self, shape: &Shape, want_type: bool) -> fmt::Result {
        if want_type {
            write!(self.out, "{shape}(nil)")
        } else {
            self.out.write_str("nil")
        }
    }

    fn sequence(
        &mut self,
        elements: &[Value],
        delims: Delims,
        depth: usize,
        level: usize,
    ) -> fmt::Result {
        let items = elements
            .iter()
            .map(|value| Item {
                key: Key::None,
                value: Some(value),
            })
            .collect();
        self.items(items, delims, depth, level)
    }

    fn items(&mut self, items: Vec<Item<'_>>, delims: Delims, depth: usize, level: usize) -> fmt::Result {
        if items.is_empty() {
            self.out.write_str(delims.open.trim_end())?;
            return self.out.write_str(delims.close.trim_start());
        }
        if self.printer.max_depth.is_some_and(|max| depth >= max) {
            return self.out.write_str(delims.elided);
        }

        let limit = self.printer.max_items.unwrap_or(usize::MAX);
        let truncated = items.len() > limit;
        let shown = &items[..items.len().min(limit)];

        // render keys first so full mode can align them
        let mut rendered = Vec::with_capacity(shown.len());
        for item in shown {
            let key = match item.key {
                Key::None => None,
                Key::Name(name) => Some(name.to_string()),
                Key::Value(k) => {
                    let start = self.out.len();
                    self.value(k, false, 0, level + 1)?;
                    Some(self.out.split_off(start))
                }
            };
            rendered.push(key);
        }

        let multiline = self.printer.mode == Mode::Full && items.len() > 1;
        if !multiline {
            self.out.write_str(delims.open)?;
            for (i, (item, key)) in shown.iter().zip(&rendered).enumerate() {
                if i > 0 {
                    self.out.write_str(", ")?;
                }
                self.item(item, key.as_deref(), 0, depth, level)?;
            }
            if truncated {
                self.out.write_str(", ...")?;
            }
            return self.out.write_str(delims.close);
        }

        let width = rendered
            .iter()
            .flatten()
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0);
        self.out.write_str(delims.open.trim_end())?;
        self.out.push('\n');
        for (item, key) in shown.iter().zip(&rendered) {
            self.indent(level + 1);
            let pad = key.as_ref().map_or(0, |k| width - k.chars().count());
            self.item(item, key.as_deref(), pad, depth, level + 1)?;
            self.out.write_str(",\n")?;
        }
        if truncated {
            self.indent(level + 1);
            self.out.write_str("...\n")?;
        }
        self.indent(level);
        self.out.write_str(delims.close.trim_start())
    }

    fn item(
        &mut self,
        item: &Item<'_>,
        key: Option<&str>,
        pad: usize,
        depth: usize,
        level: usize,
    ) -> fmt::Result {
        if let Some(key) = key {
            self.out.write_str(key)?;
            if item.value.is_none() {
                return Ok(());
            }
            write!(self.out, ":{:pad$} ", "")?;
        }
        match item.value {
            Some(value) => self.value(value, false, depth + 1, level),
            None => Ok(()),
        }
    }

    fn indent(&mut self, level: usize) {
        let n = level * self.printer.indent_size;
        self.out.extend(core::iter::repeat_n(' ', n));
    }
}
