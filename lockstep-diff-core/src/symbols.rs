//! Symbols used for diff rendering.

/// Line prefixes of a unified diff and the marks that make whitespace
/// visible in whitespace-only changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSymbols {
    /// Prefix of deleted lines (default: "-")
    pub deleted: &'static str,

    /// Prefix of inserted lines (default: "+")
    pub inserted: &'static str,

    /// Prefix of context lines (default: " ")
    pub unchanged: &'static str,

    /// Replaces a space in a whitespace-only change (default: "·")
    pub space: &'static str,

    /// Replaces a tab in a whitespace-only change (default: " → ")
    pub tab: &'static str,
}

impl Default for DiffSymbols {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl DiffSymbols {
    /// `-`, `+`, with `·` for spaces and ` → ` for tabs.
    pub const STANDARD: Self = Self {
        deleted: "-",
        inserted: "+",
        unchanged: " ",
        space: "\u{00b7}", // ·
        tab: " \u{2192} ", // →
    };

    /// ASCII-only symbols, for terminals without Unicode.
    pub const ASCII: Self = Self {
        deleted: "-",
        inserted: "+",
        unchanged: " ",
        space: ".",
        tab: " -> ",
    };

    /// Rewrite spaces and tabs of `line` with the visible marks.
    pub fn show_whitespace(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        for c in line.chars() {
            match c {
                ' ' => out.push_str(self.space),
                '\t' => out.push_str(self.tab),
                c => out.push(c),
            }
        }
        out
    }
}

/// The kind of change for a rendered line or value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Present on both sides
    Unchanged,
    /// Only on the first side
    Deleted,
    /// Only on the second side
    Inserted,
}

impl ChangeKind {
    /// Get the line prefix for this change kind.
    pub const fn symbol(self, symbols: &DiffSymbols) -> &'static str {
        match self {
            Self::Unchanged => symbols.unchanged,
            Self::Deleted => symbols.deleted,
            Self::Inserted => symbols.inserted,
        }
    }

    /// Returns true if this change should be highlighted.
    pub const fn is_changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}
