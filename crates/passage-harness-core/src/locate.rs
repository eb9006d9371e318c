//! Occurrence location: every case-insensitive match of every keyword.
//!
//! Keywords are visited in set order; within a keyword, matches are reported
//! in position order. After a match the scan resumes at the match's end, so
//! matches of the same keyword never overlap each other.

use crate::keywords::KeywordSet;
use crate::text::{fold, FoldedText};

/// A keyword match starting at a character offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence<'k> {
    pub keyword: &'k str,
    pub offset: usize,
}

impl Occurrence<'_> {
    /// Keyword length in characters.
    pub fn keyword_len(&self) -> usize {
        self.keyword.chars().count()
    }
}

/// Find all occurrences of all keywords in `text`.
pub fn locate_occurrences<'k>(keywords: &'k KeywordSet, text: &FoldedText) -> Vec<Occurrence<'k>> {
    let mut occurrences = Vec::new();

    for keyword in keywords {
        let needle = fold(keyword);
        let mut from = 0;
        while let Some(offset) = text.find_from(&needle, from) {
            occurrences.push(Occurrence {
                keyword: keyword.as_str(),
                offset,
            });
            from = offset + needle.len();
        }
    }

    occurrences
}
