//! Context extraction entry point.
//!
//! Wires the pipeline together:
//!
//! 1. [`extract_keywords`] on the question.
//! 2. [`locate_occurrences`] of every keyword in the document.
//! 3. [`build_candidates`] with the configured radius and merge policy.
//! 4. [`select_passages`] under the character budget.
//!
//! # Example
//!
//! ```rust
//! use passage_harness_core::extract::{extract_context, ExtractParams};
//!
//! let document = "The Nellie swung to her anchor. The Thames stretched before us.";
//! let context = extract_context("Which river?", document, &ExtractParams::default());
//! assert!(context.contains("Thames"));
//! ```

use serde::Serialize;
use tracing::debug;

use crate::keywords::{builtin_rules, extract_keywords, TriggerRule};
use crate::locate::locate_occurrences;
use crate::select::{select_passages, DEFAULT_SEPARATOR};
use crate::text::FoldedText;
use crate::window::{build_candidates, MergePolicy, PassageCandidate};

/// Default maximum context length in characters.
pub const DEFAULT_MAX_BUDGET: usize = 25_000;

/// Default half-width of a keyword window in characters.
pub const DEFAULT_WINDOW_RADIUS: usize = 1_500;

/// Extraction tuning parameters, decoupled from application config.
#[derive(Debug, Clone)]
pub struct ExtractParams {
    /// Maximum total characters of passages plus separators.
    pub max_budget: usize,
    /// Characters added on each side of a keyword match.
    pub window_radius: usize,
    /// Placed before every selected passage.
    pub separator: String,
    pub merge: MergePolicy,
    /// Domain trigger rules applied to the question.
    pub rules: Vec<TriggerRule>,
    /// Stop words in addition to the built-in list.
    pub extra_stop_words: Vec<String>,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            max_budget: DEFAULT_MAX_BUDGET,
            window_radius: DEFAULT_WINDOW_RADIUS,
            separator: DEFAULT_SEPARATOR.to_string(),
            merge: MergePolicy::default(),
            rules: builtin_rules(),
            extra_stop_words: Vec::new(),
        }
    }
}

/// Everything one extraction decided, for logging and diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub keywords: Vec<String>,
    pub occurrences: usize,
    pub candidates: usize,
    /// Selected source ranges, in output order.
    pub passages: Vec<PassageCandidate>,
    pub fallback: bool,
    pub context: String,
}

/// Run the full pipeline and report the intermediate decisions.
pub fn extract_with_report(question: &str, document: &str, params: &ExtractParams) -> ExtractionReport {
    let keywords = extract_keywords(question, &params.rules, &params.extra_stop_words);
    let text = FoldedText::new(document);
    let occurrences = locate_occurrences(&keywords, &text);
    let candidates = build_candidates(&occurrences, text.len(), params.window_radius, params.merge);
    let selection = select_passages(&candidates, &text, params.max_budget, &params.separator);
    let occurrence_count = occurrences.len();

    debug!(
        keywords = keywords.len(),
        occurrences = occurrence_count,
        candidates = candidates.len(),
        selected = selection.passages.len(),
        fallback = selection.fallback,
        context_chars = selection.context.chars().count(),
        "extracted context"
    );

    ExtractionReport {
        keywords: keywords.into_iter().collect(),
        occurrences: occurrence_count,
        candidates: candidates.len(),
        passages: selection.passages,
        fallback: selection.fallback,
        context: selection.context,
    }
}

/// Select the passages of `document` most relevant to `question`.
///
/// Never fails: degenerate input (empty question, empty document, no
/// matches) yields the head/tail fallback.
pub fn extract_context(question: &str, document: &str, params: &ExtractParams) -> String {
    extract_with_report(question, document, params).context
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filler(len: usize) -> String {
        "lorem ipsum dolor sit amet "
            .chars()
            .cycle()
            .take(len)
            .collect()
    }

    #[test]
    fn test_river_question_finds_thames() {
        let mut document = filler(10_000);
        document.replace_range(500..530, "the Thames was the river here");
        let report = extract_with_report(
            "What river does the story start on?",
            &document,
            &ExtractParams::default(),
        );
        assert!(!report.fallback);
        assert!(report.context.contains("Thames"));
        assert!(report.keywords.contains(&"thames".to_string()));
        // "thames" and "river" land 10 characters apart: one merged passage.
        assert_eq!(report.passages.len(), 1);
        assert_eq!(report.passages[0].start, 0);
        assert!(report.passages[0].end <= 530 + 1_500);
    }

    #[test]
    fn test_params_control_budget_and_radius() {
        let mut document = filler(20_000);
        document.replace_range(10_000..10_005, "Kurtz");
        let params = ExtractParams {
            max_budget: 500,
            window_radius: 100,
            ..ExtractParams::default()
        };
        let report = extract_with_report("kurtz", &document, &params);
        assert_eq!(report.passages.len(), 1);
        assert_eq!(report.passages[0].len(), 205);
    }

    #[test]
    fn test_custom_rules_replace_builtins() {
        let document = "A tale of whales and the sea.";
        let params = ExtractParams {
            rules: vec![TriggerRule {
                triggers: vec!["ocean".to_string()],
                keywords: vec!["whales".to_string()],
            }],
            window_radius: 0,
            ..ExtractParams::default()
        };
        let context = extract_context("Ocean?", document, &params);
        assert_eq!(context, "---\n\nwhales");
    }

    #[test]
    fn test_empty_inputs_do_not_panic() {
        let params = ExtractParams::default();
        assert_eq!(extract_context("", "", &params), "[...]");
        let report = extract_with_report("kurtz", "", &params);
        assert!(report.fallback);
        assert_eq!(report.occurrences, 0);
    }
}
