//! Paths from the comparison root to a reported difference.

use core::fmt;
use std::borrow::Cow;

/// One access step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named or positional field: `.name`, `.0`
    Field(Cow<'static, str>),
    /// A sequence element: `[3]`
    Index(usize),
    /// A run of sequence elements or string bytes: `[2:5]`
    Range(usize, usize),
    /// A map key, already rendered: `["k"]`
    Key(String),
    /// The active enum variant: `::Circle`
    Variant(Cow<'static, str>),
    /// Values produced by a transform hook.
    Transformed,
    /// The untransformed values, compared for diagnostics.
    Original,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{name}"),
            PathSegment::Index(i) => write!(f, "[{i}]"),
            PathSegment::Range(lo, hi) => write!(f, "[{lo}:{hi}]"),
            PathSegment::Key(key) => write!(f, "[{key}]"),
            PathSegment::Variant(name) => write!(f, "::{name}"),
            PathSegment::Transformed => f.write_str("(transformed)"),
            PathSegment::Original => f.write_str("(original)"),
        }
    }
}

/// A path from the root value, e.g. `.items[2].name`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Path(pub Vec<PathSegment>);

impl Path {
    /// The empty path.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a segment.
    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    /// A copy of this path with one more segment.
    pub fn with(&self, segment: PathSegment) -> Self {
        let mut new = self.clone();
        new.push(segment);
        new
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|segment| write!(f, "{segment}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_segments_in_order() {
        let path = Path::new()
            .with(PathSegment::Field("items".into()))
            .with(PathSegment::Index(2))
            .with(PathSegment::Variant("Circle".into()))
            .with(PathSegment::Field("r".into()));
        assert_eq!(path.to_string(), ".items[2]::Circle.r");
    }

    #[test]
    fn keys_ranges_and_markers() {
        let path = Path::new()
            .with(PathSegment::Transformed)
            .with(PathSegment::Key("\"k\"".to_string()))
            .with(PathSegment::Range(2, 5));
        assert_eq!(path.to_string(), "(transformed)[\"k\"][2:5]");
        assert!(Path::new().is_empty());
        assert_eq!(Path::new().with(PathSegment::Original).to_string(), "(original)");
    }
}
