//! Window building: turn occurrences into merged, scored passage candidates.
//!
//! # Algorithm
//!
//! For each occurrence, in the order produced by [`locate`](crate::locate):
//!
//! 1. Build the raw window
//!    `[max(0, offset - radius), min(len, offset + keyword_len + radius))`.
//! 2. Look for an existing candidate that touches the window
//!    (`c.start <= raw_end && c.end >= raw_start`). If one is found, the
//!    window is merged into it: its range becomes the union and its score
//!    grows by one.
//! 3. Otherwise the window becomes a new candidate with score 1.
//!
//! With [`MergePolicy::FirstOverlap`] only the first touching candidate is
//! merged, so a window that bridges two existing candidates can leave them
//! overlapping each other. [`MergePolicy::Transitive`] keeps absorbing
//! touching candidates until the list is fully coalesced. The selector skips
//! overlapping candidates either way.

use serde::{Deserialize, Serialize};

use crate::locate::Occurrence;

/// A scored, half-open character range `[start, end)` of the reference text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassageCandidate {
    pub start: usize,
    pub end: usize,
    /// Number of keyword windows merged into this candidate.
    pub score: u32,
}

impl PassageCandidate {
    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Merge test used while building: closed-interval contact, so windows
    /// that merely abut are merged as well.
    pub fn touches(&self, start: usize, end: usize) -> bool {
        self.start <= end && self.end >= start
    }

    /// Half-open intersection, used by the selector.
    pub fn overlaps(&self, other: &PassageCandidate) -> bool {
        self.start < other.end && other.start < self.end
    }

    fn absorb(&mut self, start: usize, end: usize, score: u32) {
        self.start = self.start.min(start);
        self.end = self.end.max(end);
        self.score += score;
    }
}

/// How a new window is merged into existing candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Merge into the first touching candidate only.
    #[default]
    FirstOverlap,
    /// Merge, then keep absorbing candidates that touch the grown range.
    Transitive,
}

/// Raw window around a match, clamped to `[0, text_len]`.
pub fn raw_window(offset: usize, keyword_len: usize, text_len: usize, radius: usize) -> (usize, usize) {
    let start = offset.saturating_sub(radius);
    let end = offset
        .saturating_add(keyword_len)
        .saturating_add(radius)
        .min(text_len);
    (start, end)
}

/// Build passage candidates from occurrences.
pub fn build_candidates(
    occurrences: &[Occurrence<'_>],
    text_len: usize,
    radius: usize,
    policy: MergePolicy,
) -> Vec<PassageCandidate> {
    let mut candidates: Vec<PassageCandidate> = Vec::new();

    for occurrence in occurrences {
        let (start, end) = raw_window(occurrence.offset, occurrence.keyword_len(), text_len, radius);
        if start >= end {
            continue;
        }

        match candidates.iter().position(|c| c.touches(start, end)) {
            Some(idx) => {
                candidates[idx].absorb(start, end, 1);
                if policy == MergePolicy::Transitive {
                    coalesce_from(&mut candidates, idx);
                }
            }
            None => candidates.push(PassageCandidate {
                start,
                end,
                score: 1,
            }),
        }
    }

    candidates
}

/// Absorb every candidate touching `candidates[idx]` into it, repeatedly.
fn coalesce_from(candidates: &mut Vec<PassageCandidate>, mut idx: usize) {
    loop {
        let grown = candidates[idx];
        let other = (0..candidates.len())
            .find(|&j| j != idx && candidates[j].touches(grown.start, grown.end));

        let Some(j) = other else {
            return;
        };

        let removed = candidates.remove(j);
        if j < idx {
            idx -= 1;
        }
        candidates[idx].absorb(removed.start, removed.end, removed.score);
    }
}
