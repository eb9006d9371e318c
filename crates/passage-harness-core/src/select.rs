//! Passage selection under a character budget.
//!
//! # Algorithm
//!
//! 1. Sort candidates by score (desc), then start offset (asc).
//! 2. Walk the sorted list. A candidate overlapping an already accepted
//!    range is skipped. Otherwise its text is accepted if the separator plus
//!    the passage still fit in the budget; the first candidate that does not
//!    fit ends the walk, even if a later, shorter one would have fit.
//! 3. If nothing was accepted, fall back to the first half-budget of the
//!    text, the marker `[...]`, and the last half-budget of the text.
//! 4. Trim surrounding whitespace.
//!
//! Passages are never truncated: a candidate longer than the remaining
//! budget is dropped whole.

use serde::Serialize;

use crate::text::FoldedText;
use crate::window::PassageCandidate;

/// Separator placed before every accepted passage.
pub const DEFAULT_SEPARATOR: &str = "\n\n---\n\n";

/// Marker between the head and tail excerpts of the fallback.
pub const FALLBACK_MARKER: &str = "[...]";

/// Outcome of passage selection.
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    /// The final, trimmed context string.
    pub context: String,
    /// Accepted candidates in output order.
    pub passages: Vec<PassageCandidate>,
    /// True when no candidate was accepted and head/tail excerpting was used.
    pub fallback: bool,
}

/// Rank candidates and greedily fill the budget.
pub fn select_passages(
    candidates: &[PassageCandidate],
    text: &FoldedText,
    budget: usize,
    separator: &str,
) -> Selection {
    let mut ranked = candidates.to_vec();
    ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.start.cmp(&b.start)));

    let sep_len = separator.chars().count();
    let mut accepted: Vec<PassageCandidate> = Vec::new();
    let mut output = String::new();
    let mut used = 0usize;

    for candidate in ranked {
        if accepted.iter().any(|a| a.overlaps(&candidate)) {
            continue;
        }
        let passage = text.slice(candidate.start, candidate.end);
        let cost = sep_len + passage.chars().count();
        if used + cost > budget {
            break;
        }
        output.push_str(separator);
        output.push_str(&passage);
        used += cost;
        accepted.push(candidate);
    }

    if accepted.is_empty() {
        return Selection {
            context: fallback_excerpt(text, budget),
            passages: accepted,
            fallback: true,
        };
    }

    Selection {
        context: output.trim().to_string(),
        passages: accepted,
        fallback: false,
    }
}

/// Head and tail of the text, half a budget each, around [`FALLBACK_MARKER`].
pub fn fallback_excerpt(text: &FoldedText, budget: usize) -> String {
    let half = budget / 2;
    let len = text.len();
    let head = text.slice(0, half);
    let tail = text.slice(len.saturating_sub(half), len);
    format!("{}\n\n{}\n\n{}", head, FALLBACK_MARKER, tail)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(start: usize, end: usize, score: u32) -> PassageCandidate {
        PassageCandidate { start, end, score }
    }

    fn digits(len: usize) -> FoldedText {
        let s: String = (0..len)
            .map(|i| char::from(b'0' + (i % 10) as u8))
            .collect();
        FoldedText::new(&s)
    }

    #[test]
    fn test_ranks_by_score_then_start() {
        let text = FoldedText::new("aaaa bbbb cccc dddd");
        let candidates = vec![cand(15, 19, 1), cand(0, 4, 1), cand(5, 9, 3)];
        let sel = select_passages(&candidates, &text, 1_000, " | ");
        assert_eq!(sel.context, "| bbbb | aaaa | dddd");
        assert_eq!(
            sel.passages.iter().map(|p| p.start).collect::<Vec<_>>(),
            vec![5, 0, 15]
        );
        assert!(!sel.fallback);
    }

    #[test]
    fn test_overlapping_candidate_skipped_not_truncated() {
        let text = digits(100);
        let candidates = vec![cand(0, 30, 2), cand(20, 50, 1), cand(60, 70, 1)];
        let sel = select_passages(&candidates, &text, 1_000, DEFAULT_SEPARATOR);
        assert_eq!(sel.passages, vec![cand(0, 30, 2), cand(60, 70, 1)]);
    }

    #[test]
    fn test_budget_exhaustion_stops_walk() {
        let text = digits(1_000);
        // The 300-char candidate does not fit, so the later 10-char one is
        // never considered.
        let candidates = vec![cand(0, 100, 3), cand(200, 500, 2), cand(600, 610, 1)];
        let sel = select_passages(&candidates, &text, 250, "\n\n");
        assert_eq!(sel.passages, vec![cand(0, 100, 3)]);
        assert_eq!(sel.context.chars().count(), 100);
    }

    #[test]
    fn test_budget_counts_separator() {
        let text = digits(100);
        let candidates = vec![cand(0, 10, 1)];
        assert!(select_passages(&candidates, &text, 11, "--").fallback);
        assert!(!select_passages(&candidates, &text, 12, "--").fallback);
    }

    #[test]
    fn test_oversized_candidate_falls_back() {
        let text = digits(10_000);
        let candidates = vec![cand(0, 3_000, 1)];
        let sel = select_passages(&candidates, &text, 1_000, DEFAULT_SEPARATOR);
        assert!(sel.fallback);
        assert!(sel.passages.is_empty());
        assert!(sel.context.contains(FALLBACK_MARKER));
    }

    #[test]
    fn test_fallback_head_and_tail() {
        let s: String = (0..100_000)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();
        let text = FoldedText::new(&s);
        let sel = select_passages(&[], &text, 1_000, DEFAULT_SEPARATOR);
        let expected = format!("{}\n\n[...]\n\n{}", &s[..500], &s[99_500..]);
        assert!(sel.fallback);
        assert_eq!(sel.context, expected);
    }

    #[test]
    fn test_fallback_on_empty_text() {
        let sel = select_passages(&[], &FoldedText::new(""), 25_000, DEFAULT_SEPARATOR);
        assert!(sel.fallback);
        assert_eq!(sel.context, FALLBACK_MARKER);
    }

    #[test]
    fn test_result_is_trimmed() {
        let text = FoldedText::new("   padded passage   ");
        let sel = select_passages(&[cand(0, 20, 1)], &text, 100, "\n\n");
        assert_eq!(sel.context, "padded passage");

        // Only whitespace is trimmed; the leading separator rule survives.
        let sel = select_passages(&[cand(0, 20, 1)], &text, 100, DEFAULT_SEPARATOR);
        assert_eq!(sel.context, "---\n\n   padded passage");
    }
}
