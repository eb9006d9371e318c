//! Character-indexed, case-folded view of a reference text.
//!
//! All offsets in the extraction pipeline are character offsets, not byte
//! offsets. [`FoldedText`] keeps the original characters next to a folded
//! copy of identical length, so a match found in the folded copy can be
//! sliced out of the original without any index translation.
//!
//! Folding is char-to-char: each character maps to the first character of
//! its lowercase expansion. Characters whose lowercase form expands to more
//! than one character (e.g. `İ`) therefore fold slightly lossily, but the
//! two views can never drift apart.

/// Fold a single character to lowercase, keeping a 1:1 mapping.
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Fold a string into a lowercase character vector.
pub fn fold(s: &str) -> Vec<char> {
    s.chars().map(fold_char).collect()
}

/// Fold a string the same way [`FoldedText`] folds a reference text.
///
/// Keywords and triggers must go through this rather than
/// `str::to_lowercase`, which is context-sensitive (final `Σ` becomes `ς`)
/// and may expand a character (`İ` becomes `i` + U+0307).
pub fn fold_str(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// A reference text prepared for case-insensitive, character-offset search.
#[derive(Debug, Clone)]
pub struct FoldedText {
    chars: Vec<char>,
    folded: Vec<char>,
}

impl FoldedText {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let folded = chars.iter().copied().map(fold_char).collect();
        Self { chars, folded }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Original text for the character range `[start, end)`, clamped to
    /// the text bounds.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// First match of an already-folded `needle` at or after `from`.
    ///
    /// Returns `None` for an empty needle.
    pub fn find_from(&self, needle: &[char], from: usize) -> Option<usize> {
        if needle.is_empty() || from >= self.folded.len() {
            return None;
        }
        self.folded[from..]
            .windows(needle.len())
            .position(|w| w == needle)
            .map(|pos| pos + from)
    }
}
