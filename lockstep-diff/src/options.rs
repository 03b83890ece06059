//! Comparison options.

use core::fmt;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use lockstep_core::{Def, Reflect, Shape, ShapeId, StructKind, Value};
use lockstep_diff_core::{ColorMode, DiffSymbols, DiffTheme, TextPolicy};

use crate::hooks;

/// How much output to produce for each difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emit {
    /// Pick a format per difference: custom formats, text diffs, or both
    /// values in short form.
    #[default]
    Auto,
    /// Only the path to each difference.
    PathOnly,
    /// The path and a full, multi-line rendering of both values.
    Full,
}

/// Converts a value before it is compared.
pub type TransformFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Describes the difference between two unequal values.
pub type FormatFn = Arc<dyn Fn(&Value, &Value) -> String + Send + Sync>;

/// Error returned when options refer to something a type does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// The type is not a struct with fields.
    NotAStruct {
        /// Name of the type.
        type_name: String,
    },
    /// The struct has no field with this name.
    UnknownField {
        /// Name of the type.
        type_name: String,
        /// The missing field.
        field: String,
    },
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::NotAStruct { type_name } => {
                write!(f, "{type_name} is not a struct with fields")
            }
            OptionsError::UnknownField { type_name, field } => {
                write!(f, "{type_name} has no field named `{field}`")
            }
        }
    }
}

impl core::error::Error for OptionsError {}

/// Options controlling how values are compared and how differences are
/// reported.
///
/// Options are built from [`Options::new`], which holds the defaults, by
/// chaining builder methods; later calls win where they conflict.
///
/// ```
/// use lockstep_diff::{Emit, Options};
///
/// let options = Options::new()
///     .emit(Emit::PathOnly)
///     .equal_funcs(true)
///     .labels("old", "new");
/// ```
#[derive(Clone)]
pub struct Options {
    pub(crate) emit: Emit,
    pub(crate) equal_funcs: bool,
    pub(crate) show_original: bool,
    pub(crate) labels: (Cow<'static, str>, Cow<'static, str>),
    pub(crate) colors: ColorMode,
    pub(crate) theme: DiffTheme,
    pub(crate) symbols: DiffSymbols,
    pub(crate) text_policy: TextPolicy,
    pub(crate) transforms: HashMap<ShapeId, TransformFn>,
    pub(crate) formats: HashMap<ShapeId, FormatFn>,
    pub(crate) log_level: log::Level,
    pub(crate) in_test: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("emit", &self.emit)
            .field("equal_funcs", &self.equal_funcs)
            .field("show_original", &self.show_original)
            .field("labels", &self.labels)
            .field("colors", &self.colors)
            .field("text_policy", &self.text_policy)
            .field("transforms", &self.transforms.len())
            .field("formats", &self.formats.len())
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}

impl Options {
    /// The default options: [`Emit::Auto`], functions never equal, labels
    /// `a` and `b`, no colours, and [`duration_delta`](Self::duration_delta).
    pub fn new() -> Self {
        Self {
            emit: Emit::Auto,
            equal_funcs: false,
            show_original: false,
            labels: (Cow::Borrowed("a"), Cow::Borrowed("b")),
            colors: ColorMode::Never,
            theme: DiffTheme::default(),
            symbols: DiffSymbols::default(),
            text_policy: TextPolicy::default(),
            transforms: HashMap::new(),
            formats: HashMap::new(),
            log_level: log::Level::Info,
            in_test: false,
        }
        .duration_delta()
    }

    /// Exact comparison with maximum verbosity: [`Emit::Full`] and no
    /// default format hooks.
    pub fn picky() -> Self {
        Self::new()
            .emit(Emit::Full)
            .format_remove::<core::time::Duration>()
    }

    /// Set the verbosity.
    pub fn emit(mut self, emit: Emit) -> Self {
        self.emit = emit;
        self
    }

    /// Treat any two non-null functions of the same type as equal.
    ///
    /// Otherwise two non-null functions always differ, even when they point
    /// at the same code.
    pub fn equal_funcs(mut self, equal: bool) -> Self {
        self.equal_funcs = equal;
        self
    }

    /// Also compare the untransformed values wherever a transform applies,
    /// reporting them under `(original)`.
    pub fn show_original(mut self, show: bool) -> Self {
        self.show_original = show;
        self
    }

    /// Name the two sides in full output and text diffs.
    pub fn labels(
        mut self,
        a: impl Into<Cow<'static, str>>,
        b: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.labels = (a.into(), b.into());
        self
    }

    /// Colour the two sides of each difference.
    pub fn colors(mut self, mode: ColorMode) -> Self {
        self.colors = mode;
        self
    }

    /// Set the colour theme used when colours are enabled.
    pub fn theme(mut self, theme: DiffTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the symbols used in text diffs.
    pub fn symbols(mut self, symbols: DiffSymbols) -> Self {
        self.symbols = symbols;
        self
    }

    /// Set the thresholds used to pick a text diff granularity.
    pub fn text_policy(mut self, policy: TextPolicy) -> Self {
        self.text_policy = policy;
        self
    }

    /// Level used by [`log`](crate::log). Defaults to `Info`.
    pub fn log_level(mut self, level: log::Level) -> Self {
        self.log_level = level;
        self
    }

    /// Report as a test assertion: sides are labelled `got` and `want`, and
    /// full output of a root-level difference is headed `any:`.
    pub fn test_mode(mut self) -> Self {
        self.in_test = true;
        self.labels("got", "want")
    }

    /// Compare values of type `T` through `f`.
    ///
    /// Each value of type `T` is replaced by `f(value)` before it is
    /// compared; the result may have any shape. `f` must be pure: equal
    /// inputs must give equal outputs. A transform applies once per value:
    /// values inside a transformed value are compared without transforms.
    pub fn transform<T: Reflect>(self, f: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        self.transform_shape(T::SHAPE, f)
    }

    /// [`transform`](Self::transform) for a shape chosen at runtime.
    pub fn transform_shape(
        mut self,
        shape: &'static Shape,
        f: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.transforms.insert(shape.id, Arc::new(f));
        self
    }

    /// Remove any transform for `T`.
    pub fn transform_remove<T: Reflect>(mut self) -> Self {
        self.transforms.remove(&T::SHAPE.id);
        self
    }

    /// Describe differences between values of type `T` with `f`.
    ///
    /// `f` is only called once the values are known to differ.
    pub fn format<T: Reflect>(
        self,
        f: impl Fn(&Value, &Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.format_shape(T::SHAPE, f)
    }

    /// [`format`](Self::format) for a shape chosen at runtime.
    pub fn format_shape(
        mut self,
        shape: &'static Shape,
        f: impl Fn(&Value, &Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.formats.insert(shape.id, Arc::new(f));
        self
    }

    /// Remove any format for `T`.
    pub fn format_remove<T: Reflect>(mut self) -> Self {
        self.formats.remove(&T::SHAPE.id);
        self
    }

    /// Ignore the named fields of struct `T` by zeroing them before
    /// comparison.
    pub fn zero_fields<T: Reflect>(self, fields: &[&str]) -> Result<Self, OptionsError> {
        let names = check_fields(T::SHAPE, fields)?;
        Ok(self.transform::<T>(move |v| hooks::zero_fields(v, &names)))
    }

    /// Compare only the named fields of struct `T`, zeroing all others.
    pub fn keep_fields<T: Reflect>(self, fields: &[&str]) -> Result<Self, OptionsError> {
        let names = check_fields(T::SHAPE, fields)?;
        Ok(self.transform::<T>(move |v| hooks::keep_fields(v, &names)))
    }

    /// Treat NaN as equal to NaN for `f32` and `f64`.
    pub fn equal_nan(self) -> Self {
        self.transform::<f64>(hooks::equal_nan)
            .transform::<f32>(hooks::equal_nan)
    }

    /// Describe differing [`Duration`](core::time::Duration)s with the
    /// delta between them, e.g. `1.5s != 2s (500ms)`.
    pub fn duration_delta(self) -> Self {
        self.format::<core::time::Duration>(hooks::duration_delta)
    }
}

/// Check that `shape` is a struct with every field in `fields`.
fn check_fields(shape: &'static Shape, fields: &[&str]) -> Result<Vec<String>, OptionsError> {
    let sd = match shape.def {
        Def::Struct(sd) if matches!(sd.kind, StructKind::Struct | StructKind::TupleStruct) => sd,
        _ => {
            return Err(OptionsError::NotAStruct {
                type_name: shape.to_string(),
            });
        }
    };
    fields
        .iter()
        .map(|&field| match sd.field_index(field) {
            Some(_) => Ok(field.to_string()),
            None => Err(OptionsError::UnknownField {
                type_name: shape.to_string(),
                field: field.to_string(),
            }),
        })
        .collect()
}
