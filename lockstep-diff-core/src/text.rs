//! Text diffs: choosing a granularity, inline changes and unified output.
//!
//! Two differing strings are reported in the most readable form their shape
//! allows. Multi-line text gets a unified diff, short strings are shown
//! whole, prose is diffed word by word, and anything else rune by rune.

use core::fmt;
use core::ops::Range;

use owo_colors::OwoColorize;

use crate::{ChangeKind, DiffSymbols, DiffTheme, EditEntry, edit_script, edit_script_slices};

/// Thresholds for [`TextPolicy::granularity`].
///
/// These are tuning constants, not invariants; the defaults read well for
/// typical test output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPolicy {
    /// Minimum number of lines on both sides for a line diff (default: 2)
    pub line_min: usize,

    /// Maximum average line length, in bytes, for a line diff (default: 72)
    pub line_avg_max: usize,

    /// Strings shorter than this on both sides are shown whole (default: 20)
    pub short_max: usize,

    /// Minimum number of words on both sides for a word diff (default: 3)
    pub word_min: usize,

    /// Maximum average word length, in bytes, for a word diff (default: 10)
    pub word_avg_max: usize,

    /// Unchanged lines shown around each change in a line diff (default: 3)
    pub context: usize,
}

impl Default for TextPolicy {
    fn default() -> Self {
        Self {
            line_min: 2,
            line_avg_max: 72,
            short_max: 20,
            word_min: 3,
            word_avg_max: 10,
            context: 3,
        }
    }
}

/// How two differing strings are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Unified line diff.
    Lines,
    /// Both strings, quoted.
    Short,
    /// Changed byte ranges, aligned on words.
    Words,
    /// Changed byte ranges, aligned on chars.
    Runes,
}

impl TextPolicy {
    /// Pick the granularity for a pair of differing strings, most specific
    /// first.
    pub fn granularity(&self, a: &str, b: &str) -> Granularity {
        let lines = |s: &str| split_check(s, '\n', self.line_min, self.line_avg_max);
        let words = |s: &str| split_check(s, ' ', self.word_min, self.word_avg_max);

        if lines(a) && lines(b) {
            Granularity::Lines
        } else if (a.len() < self.short_max && b.len() < self.short_max)
            || a.is_empty()
            || b.is_empty()
        {
            Granularity::Short
        } else if words(a) && words(b) {
            Granularity::Words
        } else {
            Granularity::Runes
        }
    }
}

/// Whether `s` splits on `sep` into at least `min` pieces averaging at most
/// `avg_max` bytes.
fn split_check(s: &str, sep: char, min: usize, avg_max: usize) -> bool {
    let n = s.matches(sep).count() + 1;
    n >= min && s.len() / n <= avg_max
}

/// Split after every space, keeping the spaces.
pub fn split_words(s: &str) -> Vec<&str> {
    s.split_inclusive(' ').collect()
}

/// Split into one piece per char.
pub fn split_runes(s: &str) -> Vec<&str> {
    s.char_indices()
        .map(|(i, c)| &s[i..i + c.len_utf8()])
        .collect()
}

/// A changed region of two strings, as byte ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineChange {
    /// Byte range in the first string.
    pub a: Range<usize>,
    /// Byte range in the second string.
    pub b: Range<usize>,
}

/// Diff two strings split into pieces (see [`split_words`] and
/// [`split_runes`]) and map the changed pieces back to byte ranges.
pub fn inline_changes(a: &[&str], b: &[&str]) -> Vec<InlineChange> {
    let a_cut = offsets(a);
    let b_cut = offsets(b);
    edit_script_slices(a, b)
        .into_iter()
        .map(|EditEntry { a, b }| InlineChange {
            a: a_cut[a.start]..a_cut[a.end],
            b: b_cut[b.start]..b_cut[b.end],
        })
        .collect()
}

/// Byte offset of the start of each piece, plus the total length.
fn offsets(pieces: &[&str]) -> Vec<usize> {
    let mut cut = Vec::with_capacity(pieces.len() + 1);
    let mut n = 0;
    cut.push(0);
    for piece in pieces {
        n += piece.len();
        cut.push(n);
    }
    cut
}

/// A unified line diff of two texts, rendered through [`fmt::Display`].
///
/// ```
/// use lockstep_diff_core::UnifiedDiff;
///
/// let diff = UnifiedDiff::new("a\nb", "a\nc").to_string();
/// assert_eq!(diff, "--- a\n+++ b\n@@ -1,2 +1,2 @@\n a\n-b\n+c\n");
/// ```
#[derive(Debug, Clone)]
pub struct UnifiedDiff<'a> {
    a: &'a str,
    b: &'a str,
    a_label: &'a str,
    b_label: &'a str,
    context: usize,
    symbols: DiffSymbols,
    theme: DiffTheme,
    colors: bool,
}

impl<'a> UnifiedDiff<'a> {
    /// Diff `a` against `b`, labelled `a` and `b`, with three lines of context.
    pub fn new(a: &'a str, b: &'a str) -> Self {
        Self {
            a,
            b,
            a_label: "a",
            b_label: "b",
            context: 3,
            symbols: DiffSymbols::STANDARD,
            theme: DiffTheme::TOKYO_NIGHT,
            colors: false,
        }
    }

    /// Set the labels of the `---` and `+++` headers.
    pub fn labels(mut self, a: &'a str, b: &'a str) -> Self {
        self.a_label = a;
        self.b_label = b;
        self
    }

    /// Set the number of context lines.
    pub fn context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    /// Set the line prefixes and whitespace marks.
    pub fn symbols(mut self, symbols: DiffSymbols) -> Self {
        self.symbols = symbols;
        self
    }

    /// Color lines with `theme` when `enabled`.
    pub fn colors(mut self, theme: DiffTheme, enabled: bool) -> Self {
        self.theme = theme;
        self.colors = enabled;
        self
    }

    fn line(&self, f: &mut fmt::Formatter<'_>, kind: ChangeKind, text: &str) -> fmt::Result {
        let line = format!("{}{text}", kind.symbol(&self.symbols));
        writeln!(f, "{}", self.theme.paint(kind, &line, self.colors && kind.is_changed()))
    }

    fn header(&self, f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
        if self.colors {
            writeln!(f, "{}", text.color(self.theme.header))
        } else {
            writeln!(f, "{text}")
        }
    }
}

/// Whether every line pair of `e` differs only in spaces and tabs.
fn whitespace_only(e: &EditEntry, a: &[&str], b: &[&str]) -> bool {
    let strip = |s: &str| s.replace([' ', '\t'], "");
    e.is_elementwise()
        && a[e.a.clone()]
            .iter()
            .zip(&b[e.b.clone()])
            .all(|(x, y)| strip(x) == strip(y))
}

/// `start,len` in one-based line numbers, as in GNU diff.
fn line_range(start: usize, len: usize) -> String {
    match len {
        0 => format!("{start},0"),
        1 => format!("{}", start + 1),
        _ => format!("{},{len}", start + 1),
    }
}

impl fmt::Display for UnifiedDiff<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a: Vec<&str> = self.a.split('\n').collect();
        let b: Vec<&str> = self.b.split('\n').collect();
        let script = edit_script(a.len(), b.len(), |i, j| a[i] == b[j]);

        self.header(f, &format!("--- {}", self.a_label))?;
        self.header(f, &format!("+++ {}", self.b_label))?;

        let mut rest = &script[..];
        while let Some(first) = rest.first() {
            // edits separated by at most two contexts share a hunk
            let mut n = 1;
            while n < rest.len() && rest[n].a.start - rest[n - 1].a.end <= 2 * self.context {
                n += 1;
            }
            let (hunk, tail) = rest.split_at(n);
            rest = tail;
            let last = &hunk[n - 1];

            let a0 = first.a.start.saturating_sub(self.context);
            let b0 = first.b.start.saturating_sub(self.context);
            let a1 = (last.a.end + self.context).min(a.len());
            let b1 = (last.b.end + self.context).min(b.len());
            self.header(
                f,
                &format!("@@ -{} +{} @@", line_range(a0, a1 - a0), line_range(b0, b1 - b0)),
            )?;

            let mut x = a0;
            for e in hunk {
                for line in &a[x..e.a.start] {
                    self.line(f, ChangeKind::Unchanged, line)?;
                }
                let ws_only = whitespace_only(e, &a, &b);
                let show = |s: &str| {
                    if ws_only {
                        self.symbols.show_whitespace(s)
                    } else {
                        s.to_string()
                    }
                };
                for line in &a[e.a.clone()] {
                    self.line(f, ChangeKind::Deleted, &show(line))?;
                }
                for line in &b[e.b.clone()] {
                    self.line(f, ChangeKind::Inserted, &show(line))?;
                }
                x = e.a.end;
            }
            for line in &a[x..a1] {
                self.line(f, ChangeKind::Unchanged, line)?;
            }
        }
        Ok(())
    }
}
