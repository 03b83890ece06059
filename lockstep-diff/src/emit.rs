//! Turning a found difference into a message.

use lockstep_core::{Shape, Value};
use lockstep_diff_core::{ChangeKind, Path, PathSegment};
use lockstep_pretty::{format_full, format_short};

use crate::{Emit, Options};

/// Where a difference was found: the root type and the path from it.
#[derive(Debug, Clone, Default)]
pub(crate) struct Emitter {
    root_type: Option<String>,
    path: Path,
}

impl Emitter {
    pub(crate) fn root() -> Self {
        Self::default()
    }

    #[cfg(any(test, feature = "tracing"))]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Emitter for a child reached through `segment` from a value of
    /// `shape`. The first step fixes the root type.
    pub(crate) fn sub(&self, shape: &Shape, segment: PathSegment) -> Self {
        Self {
            root_type: Some(
                self.root_type
                    .clone()
                    .unwrap_or_else(|| shape.to_string()),
            ),
            path: self.path.with(segment),
        }
    }

    /// Render one difference as a complete message ending in a newline.
    ///
    /// `a` and `b` are the values at this position, `None` where a map key
    /// is missing on one side; only [`Emit::Full`] shows them.
    pub(crate) fn render(
        &self,
        options: &Options,
        a: Option<&Value>,
        b: Option<&Value>,
        message: &str,
    ) -> String {
        let root = self.root_type.as_deref().unwrap_or_default();
        let path = &self.path;
        let mut out = match options.emit {
            Emit::Auto if path.is_empty() => message.strip_prefix('\n').unwrap_or(message).to_string(),
            Emit::Auto => format!("{root}{path}: {message}"),
            Emit::PathOnly => match (root, a.or(b)) {
                ("", Some(v)) => format!("{}{path}", v.shape()),
                _ => format!("{root}{path}"),
            },
            Emit::Full => {
                let header = if !path.is_empty() {
                    format!("{root}:\n")
                } else if options.in_test {
                    "any:\n".to_string()
                } else {
                    String::new()
                };
                let (a_label, b_label) = &options.labels;
                format!(
                    "{header}{a_label}{path}:\n{}\n{b_label}{path}:\n{}",
                    indent(&full(a)),
                    indent(&full(b)),
                )
            }
        };
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

fn full(v: Option<&Value>) -> String {
    v.map_or_else(|| "nil".to_string(), format_full)
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `a != b`, coloured when the options ask for it.
pub(crate) fn versus(options: &Options, a: &str, b: &str) -> String {
    let enabled = options.colors.enabled();
    format!(
        "{} != {}",
        options.theme.paint(ChangeKind::Deleted, a, enabled),
        options.theme.paint(ChangeKind::Inserted, b, enabled),
    )
}

/// Both values in short form, with types when wanted.
pub(crate) fn short_pair(options: &Options, a: &Value, b: &Value, want_type: bool) -> String {
    versus(
        options,
        &format_short(a, want_type),
        &format_short(b, want_type),
    )
}
