//! The parallel tree walker.
//!
//! A [`Session`] walks two value graphs in lock-step and reports every
//! position where they diverge. For each pair of co-located values it checks
//! shapes, detects cycles, applies transform and format hooks, and recurses
//! by shape. Sequences and strings are diffed through edit scripts so a
//! single insertion is reported once instead of at every later index.

use core::cmp::Ordering;
use std::collections::HashMap;

use lockstep_core::{Data, Def, Identity, OpaqueKind, ScalarType, Shape, Value, compare_keys};
use lockstep_diff_core::{Granularity, PathSegment, UnifiedDiff, edit_script, inline_changes, split_runes, split_words};
use lockstep_pretty::format_short;

use crate::emit::{Emitter, short_pair, versus};
use crate::{Emit, Options, debug, trace};

/// Where differences go.
enum Sink<'s> {
    /// Render each difference and hand it to the caller.
    Report(&'s mut dyn FnMut(&str)),
    /// Only count them.
    Count(usize),
}

/// State for one comparison.
pub(crate) struct Session<'s> {
    options: &'s Options,
    sink: Sink<'s>,
    use_formats: bool,
    a_seen: HashMap<Identity, Identity>,
    b_seen: HashMap<Identity, Identity>,
    // transform outputs stay alive until the session ends, so their
    // addresses are never reused while the visit tables refer to them
    keep_alive: Vec<Value>,
}

impl<'s> Session<'s> {
    pub(crate) fn new(options: &'s Options, sink: &'s mut dyn FnMut(&str)) -> Self {
        Self::with_sink(options, Sink::Report(sink))
    }

    fn with_sink(options: &'s Options, sink: Sink<'s>) -> Self {
        Self {
            options,
            sink,
            use_formats: true,
            a_seen: HashMap::new(),
            b_seen: HashMap::new(),
            keep_alive: Vec::new(),
        }
    }

    /// Compare two root values.
    pub(crate) fn compare(&mut self, a: &Value, b: &Value) {
        debug!(shape = %a.shape(), "compare");
        self.walk(&Emitter::root(), a, b, true, true);
    }

    /// Whether `a` and `b` are equal, decided by a side session that only
    /// counts differences and ignores format hooks.
    fn equal(&self, a: &Value, b: &Value, transforms_ok: bool) -> bool {
        let mut side = Session::with_sink(self.options, Sink::Count(0));
        side.use_formats = false;
        side.walk(&Emitter::root(), a, b, transforms_ok, true);
        matches!(side.sink, Sink::Count(0))
    }

    fn emit(
        &mut self,
        e: &Emitter,
        a: Option<&Value>,
        b: Option<&Value>,
        message: impl FnOnce(&Options) -> String,
    ) {
        let options = self.options;
        match &mut self.sink {
            Sink::Count(n) => *n += 1,
            Sink::Report(sink) => {
                let message = match options.emit {
                    Emit::Auto => message(options),
                    Emit::PathOnly | Emit::Full => String::new(),
                };
                trace!(path = %e.path(), "difference");
                (*sink)(&e.render(options, a, b, &message));
            }
        }
    }

    fn emit_pair(&mut self, e: &Emitter, a: &Value, b: &Value, want_type: bool) {
        self.emit(e, Some(a), Some(b), |o| short_pair(o, a, b, want_type));
    }

    /// A side session can stop at its first difference.
    fn done(&self) -> bool {
        matches!(self.sink, Sink::Count(n) if n > 0)
    }

    /// Compare two values that may be absent, such as the contents of two
    /// dynamic holders.
    fn walk_opt(
        &mut self,
        e: &Emitter,
        a: Option<&Value>,
        b: Option<&Value>,
        transforms_ok: bool,
        want_type: bool,
    ) {
        match (a, b) {
            (None, None) => {}
            (Some(a), Some(b)) => self.walk(e, a, b, transforms_ok, want_type),
            _ => {
                let short = |v: Option<&Value>| v.map_or_else(|| "nil".to_string(), |v| format_short(v, true));
                self.emit(e, a, b, |o| versus(o, &short(a), &short(b)));
            }
        }
    }

    fn walk(&mut self, e: &Emitter, a: &Value, b: &Value, transforms_ok: bool, want_type: bool) {
        if self.done() {
            return;
        }
        let shape = a.shape();
        if !shape.is(b.shape()) {
            trace!(a = %shape, b = %b.shape(), "shape mismatch");
            self.emit_pair(e, a, b, true);
            return;
        }

        if let (Some(ai), Some(bi)) = (a.identity(), b.identity()) {
            if let Some(seen) = self.a_seen.get(&ai) {
                if *seen != bi {
                    self.emit(e, Some(a), Some(b), |_| "uneven cycle".to_string());
                }
                trace!(path = %e.path(), "cycle");
                return;
            }
            if self.b_seen.contains_key(&bi) {
                self.emit(e, Some(a), Some(b), |_| "uneven cycle".to_string());
                return;
            }
            self.a_seen.insert(ai, bi);
            self.b_seen.insert(bi, ai);
        }

        let original;
        let mut e = e;
        if transforms_ok && let Some(f) = self.options.transforms.get(&shape.id).cloned() {
            let ax = f(a);
            let bx = f(b);
            self.transformed(e, shape, (a, b), (&ax, &bx));
            self.keep_alive.extend([ax, bx]);
            if !self.options.show_original {
                return;
            }
            original = e.sub(shape, PathSegment::Original);
            e = &original;
            if self.equal(a, b, false) {
                self.emit(e, Some(a), Some(b), |_| "equal".to_string());
                return;
            }
        }

        if self.use_formats && let Some(f) = self.options.formats.get(&shape.id).cloned() {
            if !self.equal(a, b, false) {
                self.emit(e, Some(a), Some(b), |_| f(a, b));
            }
            return;
        }

        self.dispatch(e, shape, a, b, transforms_ok, want_type);
    }

    /// Compare the outputs of a transform, making sure the transform kept
    /// equal inputs equal.
    fn transformed(&mut self, e: &Emitter, shape: &Shape, raw: (&Value, &Value), out: (&Value, &Value)) {
        debug!(shape = %shape, "transform");
        if self.equal(out.0, out.1, false) {
            return;
        }
        if self.equal(raw.0, raw.1, false) {
            self.emit(e, Some(raw.0), Some(raw.1), |o| {
                format!(
                    "warning: impure transform: {} (transformed: {})",
                    short_pair(o, raw.0, raw.1, true),
                    short_pair(o, out.0, out.1, true),
                )
            });
            return;
        }
        self.walk(&e.sub(shape, PathSegment::Transformed), out.0, out.1, false, true);
    }

    fn dispatch(
        &mut self,
        e: &Emitter,
        shape: &'static Shape,
        a: &Value,
        b: &Value,
        transforms_ok: bool,
        want_type: bool,
    ) {
        match (&shape.def, a.data(), b.data()) {
            (Def::Scalar(ScalarType::String | ScalarType::Str), Data::Str(x), Data::Str(y)) => {
                self.text(e, a, b, x, y);
            }
            (Def::Scalar(_), x, y) => {
                if !scalar_eq(x, y) {
                    self.emit_pair(e, a, b, want_type);
                }
            }

            (Def::Struct(sd), Data::Struct(xs), Data::Struct(ys)) => {
                for ((field, x), y) in sd.fields.iter().zip(xs).zip(ys) {
                    let sub = e.sub(shape, PathSegment::Field(field.name.into()));
                    self.walk(&sub, x, y, true, false);
                }
            }

            (Def::Enum(ed), Data::Enum { variant: i, fields: xs }, Data::Enum { variant: j, fields: ys }) => {
                if i != j {
                    self.emit_pair(e, a, b, want_type);
                    return;
                }
                let Some(variant) = ed.variants.get(*i) else {
                    unreachable!("{shape} has no variant #{i}");
                };
                let ve = e.sub(shape, PathSegment::Variant(variant.name.into()));
                for ((field, x), y) in variant.fields.iter().zip(xs).zip(ys) {
                    let sub = ve.sub(shape, PathSegment::Field(field.name.into()));
                    self.walk(&sub, x, y, true, false);
                }
            }

            (Def::Array(_), Data::Array(xs), Data::Array(ys)) => {
                self.sequence(e, shape, xs, ys);
            }

            (Def::List(_), Data::List(x), Data::List(y)) => match (x, y) {
                (None, None) => {}
                (Some(_), None) | (None, Some(_)) => self.emit_pair(e, a, b, want_type),
                (Some(xs), Some(ys)) => {
                    if a.identity() == b.identity() {
                        return;
                    }
                    match (a.bytes(), b.bytes()) {
                        (Some(x), Some(y)) => self.bytes(e, a, b, &x, &y),
                        _ => self.sequence(e, shape, xs, ys),
                    }
                }
            },

            (Def::Map(_), Data::Map(x), Data::Map(y)) => match (x, y) {
                (None, None) => {}
                (Some(_), None) | (None, Some(_)) => self.emit_pair(e, a, b, want_type),
                (Some(xs), Some(ys)) => {
                    if a.identity() != b.identity() {
                        self.map(e, shape, xs, ys);
                    }
                }
            },

            (Def::Option(_), Data::Option(x), Data::Option(y)) => match (x, y) {
                (None, None) => {}
                (Some(x), Some(y)) => self.walk(e, x, y, true, want_type),
                _ => self.emit_pair(e, a, b, want_type),
            },

            (Def::Pointer(_), Data::Pointer(_), Data::Pointer(_)) => {
                if a.identity() == b.identity() {
                    return;
                }
                if a.is_nil() != b.is_nil() {
                    self.emit_pair(e, a, b, want_type);
                    return;
                }
                if let (Some(x), Some(y)) = (a.pointee(), b.pointee()) {
                    self.walk(e, &x, &y, true, want_type);
                }
            }

            (Def::Dynamic, Data::Dynamic(x), Data::Dynamic(y)) => {
                self.walk_opt(e, x.as_deref(), y.as_deref(), transforms_ok, true);
            }

            (Def::Opaque(OpaqueKind::Function), Data::Opaque(x), Data::Opaque(y)) => {
                if self.options.equal_funcs || (x.is_none() && y.is_none()) {
                    return;
                }
                self.emit_pair(e, a, b, want_type);
            }
            (Def::Opaque(OpaqueKind::RawPointer), Data::Opaque(x), Data::Opaque(y)) => {
                if x != y {
                    self.emit_pair(e, a, b, want_type);
                }
            }

            _ => unreachable!("value of shape {shape} does not match its definition"),
        }
    }

    /// Diff two runs of elements through an edit script. Runs replaced by a
    /// run of the same length are compared element by element.
    fn sequence(&mut self, e: &Emitter, shape: &'static Shape, xs: &[Value], ys: &[Value]) {
        let script = edit_script(xs.len(), ys.len(), |i, j| self.equal(&xs[i], &ys[j], true));
        trace!(path = %e.path(), edits = script.len(), "sequence");
        for entry in script {
            if entry.is_elementwise() {
                for (i, j) in entry.a.clone().zip(entry.b.clone()) {
                    self.walk(&e.sub(shape, PathSegment::Index(i)), &xs[i], &ys[j], true, false);
                }
                continue;
            }
            let sub = e.sub(shape, PathSegment::Range(entry.a.start, entry.a.end));
            let x = slice_value(shape, &xs[entry.a.clone()]);
            let y = slice_value(shape, &ys[entry.b.clone()]);
            self.emit(&sub, Some(&x), Some(&y), |o| short_pair(o, &x, &y, false));
        }
    }

    /// Walk the union of keys of two maps in key order.
    fn map(&mut self, e: &Emitter, shape: &'static Shape, xs: &[(Value, Value)], ys: &[(Value, Value)]) {
        let set = matches!(&shape.def, Def::Map(md) if md.set);
        let (xs, ys) = (sorted(xs), sorted(ys));
        let (mut i, mut j) = (0, 0);
        while i < xs.len() || j < ys.len() {
            let order = match (xs.get(i), ys.get(j)) {
                (Some(x), Some(y)) => compare_keys(&x.0, &y.0),
                (Some(_), None) => Ordering::Less,
                _ => Ordering::Greater,
            };
            match order {
                Ordering::Less => {
                    let (k, x) = xs[i];
                    let sub = e.sub(shape, PathSegment::Key(format_short(k, false)));
                    self.emit(&sub, Some(x), None, |_| "(removed)".to_string());
                    i += 1;
                }
                Ordering::Greater => {
                    let (k, y) = ys[j];
                    let sub = e.sub(shape, PathSegment::Key(format_short(k, false)));
                    self.emit(&sub, None, Some(y), |_| {
                        if set {
                            "(added)".to_string()
                        } else {
                            format!("(added) {}", format_short(y, false))
                        }
                    });
                    j += 1;
                }
                Ordering::Equal => {
                    let ((k, x), (_, y)) = (xs[i], ys[j]);
                    let sub = e.sub(shape, PathSegment::Key(format_short(k, false)));
                    self.walk(&sub, x, y, true, false);
                    i += 1;
                    j += 1;
                }
            }
        }
    }

    /// Byte lists read as text when both sides are UTF-8.
    fn bytes(&mut self, e: &Emitter, a: &Value, b: &Value, x: &[u8], y: &[u8]) {
        if x == y {
            return;
        }
        match (core::str::from_utf8(x), core::str::from_utf8(y)) {
            (Ok(x), Ok(y)) => self.text(e, a, b, x, y),
            _ => {
                let quote = |s: &[u8]| format!("b\"{}\"", s.escape_ascii());
                self.emit(e, Some(a), Some(b), |o| format!("binary: {}", versus(o, &quote(x), &quote(y))));
            }
        }
    }

    fn text(&mut self, e: &Emitter, a: &Value, b: &Value, x: &str, y: &str) {
        if x == y {
            return;
        }
        if self.options.emit == Emit::Full {
            self.emit(e, Some(a), Some(b), |_| String::new());
            return;
        }

        let granularity = self.options.text_policy.granularity(x, y);
        trace!(?granularity, "text");
        let pieces = match granularity {
            Granularity::Lines => {
                self.emit(e, Some(a), Some(b), |o| {
                    let (a_label, b_label) = &o.labels;
                    let diff = UnifiedDiff::new(x, y)
                        .labels(a_label, b_label)
                        .context(o.text_policy.context)
                        .symbols(o.symbols.clone())
                        .colors(o.theme.clone(), o.colors.enabled());
                    format!("\n{diff}")
                });
                return;
            }
            Granularity::Short => {
                self.emit(e, Some(a), Some(b), |o| versus(o, &format!("{x:?}"), &format!("{y:?}")));
                return;
            }
            Granularity::Words => (split_words(x), split_words(y)),
            Granularity::Runes => (split_runes(x), split_runes(y)),
        };

        let shape = a.shape();
        for change in inline_changes(&pieces.0, &pieces.1) {
            let sub = e.sub(shape, PathSegment::Range(change.a.start, change.a.end));
            let (xs, ys) = (&x[change.a], &y[change.b]);
            self.emit(&sub, Some(a), Some(b), |o| versus(o, &format!("{xs:?}"), &format!("{ys:?}")));
        }
    }
}

fn sorted(entries: &[(Value, Value)]) -> Vec<&(Value, Value)> {
    let mut v: Vec<_> = entries.iter().collect();
    v.sort_by(|p, q| compare_keys(&p.0, &q.0));
    v
}

/// A run of elements as a value of the container's shape, for rendering.
fn slice_value(shape: &'static Shape, elements: &[Value]) -> Value {
    match shape.def {
        Def::Array(_) => Value::new(shape, Data::Array(elements.to_vec())),
        _ => Value::list(shape, elements.to_vec()),
    }
}

fn scalar_eq(x: &Data, y: &Data) -> bool {
    match (x, y) {
        (Data::Bool(x), Data::Bool(y)) => x == y,
        (Data::Int(x), Data::Int(y)) => x == y,
        (Data::Uint(x), Data::Uint(y)) => x == y,
        (Data::Float(x), Data::Float(y)) => x == y,
        (Data::Complex(xr, xi), Data::Complex(yr, yi)) => xr == yr && xi == yi,
        (Data::Char(x), Data::Char(y)) => x == y,
        (Data::Str(x), Data::Str(y)) => x == y,
        _ => unreachable!("scalar data does not match its shape"),
    }
}
