//! Color themes for diff rendering.

use std::io::IsTerminal;

use owo_colors::{OwoColorize, Rgb};

use crate::ChangeKind;

/// Color theme for diff rendering.
///
/// The default uses Tokyo Night colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffTheme {
    /// Color for deleted content (default: red)
    pub deleted: Rgb,

    /// Color for inserted content (default: green)
    pub inserted: Rgb,

    /// Color for context lines (default: gray)
    pub unchanged: Rgb,

    /// Color for `---`, `+++` and `@@` headers (default: blue)
    pub header: Rgb,
}

impl Default for DiffTheme {
    fn default() -> Self {
        Self::TOKYO_NIGHT
    }
}

impl DiffTheme {
    /// Tokyo Night color theme (default).
    pub const TOKYO_NIGHT: Self = Self {
        deleted: Rgb(247, 118, 142),  // red
        inserted: Rgb(158, 206, 106), // green
        unchanged: Rgb(86, 95, 137),  // gray
        header: Rgb(122, 162, 247),   // blue
    };

    /// Get the color for a change kind.
    pub fn color_for(&self, kind: ChangeKind) -> Rgb {
        match kind {
            ChangeKind::Unchanged => self.unchanged,
            ChangeKind::Deleted => self.deleted,
            ChangeKind::Inserted => self.inserted,
        }
    }

    /// Color `text` for `kind`, or return it unchanged when `enabled` is false.
    pub fn paint(&self, kind: ChangeKind, text: &str, enabled: bool) -> String {
        if enabled {
            text.color(self.color_for(kind)).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Whether rendered diffs carry ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Color when stderr is a terminal and `NO_COLOR` is unset.
    Auto,
    /// Always color.
    Always,
    /// Never color.
    #[default]
    Never,
}

impl ColorMode {
    /// Decide whether to color now.
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
                    && std::io::stderr().is_terminal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_only_when_enabled() {
        let theme = DiffTheme::default();
        assert_eq!(theme.paint(ChangeKind::Deleted, "x", false), "x");
        let painted = theme.paint(ChangeKind::Deleted, "x", true);
        assert!(painted.starts_with("\u{1b}[38;2;247;118;142m"));
        assert!(painted.contains('x'));
    }

    #[test]
    fn explicit_modes() {
        assert!(ColorMode::Always.enabled());
        assert!(!ColorMode::Never.enabled());
        assert_eq!(ColorMode::default(), ColorMode::Never);
    }
}
