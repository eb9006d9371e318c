//! Keyword extraction from a free-text question.
//!
//! A question contributes keywords through two independent channels:
//!
//! 1. **Base tokens**: the lowercased question with `? . , !` removed,
//!    split on whitespace, keeping tokens longer than two characters that are
//!    not stop words.
//! 2. **Domain trigger rules**: static `{triggers, keywords}` pairs. A rule
//!    fires when any of its triggers is a case-insensitive substring of the
//!    *original* question; its keywords are then added.
//!
//! The result is the union of both channels. Extraction never fails: a
//! question made only of stop words simply yields an empty (or trigger-only)
//! set, and the passage selector falls back to head/tail excerpting.
//!
//! # Example
//!
//! ```rust
//! use passage_harness_core::keywords::{builtin_rules, extract_keywords};
//!
//! let keywords = extract_keywords("What river does the story start on?", &builtin_rules(), &[]);
//! assert!(keywords.contains("river"));
//! assert!(keywords.contains("thames"));
//! assert!(!keywords.contains("story"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::text::fold_str;

/// Deduplicated, lowercase keywords. Ordered so that downstream iteration
/// (and therefore the extracted context) is deterministic.
pub type KeywordSet = BTreeSet<String>;

/// Tokens must be longer than this many characters to survive.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Characters removed from the question before tokenizing.
const STRIPPED: [char; 4] = ['?', '.', ',', '!'];

/// Articles, auxiliaries, WH-words, connectives, and corpus noise words.
pub const STOP_WORDS: &[&str] = &[
    // articles, pronouns, connectives
    "the", "and", "but", "for", "nor", "yet", "with", "from", "into", "onto", "about", "over",
    "under", "than", "then", "this", "that", "these", "those", "there", "their", "they", "them",
    "you", "your", "yours", "she", "her", "hers", "him", "his", "its", "our", "ours", "himself",
    "herself", "itself", "themselves", "all", "any", "some", "such", "each", "other", "also",
    "just", "very", "only", "more", "most", "much", "many", "not", "again",
    // auxiliaries
    "are", "was", "were", "been", "being", "have", "has", "had", "does", "did", "doing", "done",
    "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    // WH-words
    "what", "when", "where", "which", "who", "whom", "whose", "why", "how",
    // question framing
    "tell", "explain", "describe", "mean", "means", "happen", "happens", "happened",
    // narrative framing
    "story", "novel", "novella", "book", "text", "chapter", "author", "conrad", "joseph",
    "narrator", "narrative", "character", "characters",
];

/// A trigger rule as it appears in the compiled-in table.
#[derive(Debug, Clone, Copy)]
pub struct StaticTriggerRule {
    pub triggers: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

/// Built-in trigger rules for *Heart of Darkness*.
pub const HEART_OF_DARKNESS_RULES: &[StaticTriggerRule] = &[
    StaticTriggerRule {
        triggers: &["river", "thames", "congo", "steamer", "boat"],
        keywords: &["river", "thames", "congo", "steamer", "steamboat", "stream"],
    },
    StaticTriggerRule {
        triggers: &["kurtz"],
        keywords: &["kurtz", "ivory", "inner station", "eloquence", "voice"],
    },
    StaticTriggerRule {
        triggers: &["marlow", "who tells", "frame", "nellie"],
        keywords: &["marlow", "nellie", "yawl", "director of companies", "lawyer"],
    },
    StaticTriggerRule {
        triggers: &["ending", "the end", "intended", "fiancée", "fiancee", "lie to", "lied"],
        keywords: &["intended", "lie", "your name", "the horror", "drawing-room"],
    },
    StaticTriggerRule {
        triggers: &["horror", "last words", "dying", "death"],
        keywords: &["the horror", "whisper", "cry", "died", "last word"],
    },
    StaticTriggerRule {
        triggers: &["company", "ivory", "trade", "manager", "station"],
        keywords: &["company", "ivory", "manager", "station", "brickmaker", "accountant"],
    },
    StaticTriggerRule {
        triggers: &["africa", "jungle", "wilderness", "native", "savage", "cannibal"],
        keywords: &["wilderness", "jungle", "forest", "natives", "savages", "cannibals"],
    },
    StaticTriggerRule {
        triggers: &["symbol", "theme", "darkness", "light", "meaning"],
        keywords: &["darkness", "light", "shadow", "gloom", "brooding"],
    },
    StaticTriggerRule {
        triggers: &["russian", "harlequin"],
        keywords: &["russian", "harlequin", "patches"],
    },
    StaticTriggerRule {
        triggers: &["brussels", "sepulchral", "aunt", "doctor", "knitting"],
        keywords: &["sepulchral", "knitting", "doctor", "aunt", "black wool"],
    },
];

/// A domain trigger rule: when any trigger appears in the question, the
/// keywords are added to the keyword set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRule {
    pub triggers: Vec<String>,
    pub keywords: Vec<String>,
}

impl TriggerRule {
    /// Whether any trigger is contained in `question_folded`.
    ///
    /// `question_folded` must already be folded with [`fold_str`].
    pub fn fires(&self, question_folded: &str) -> bool {
        self.triggers
            .iter()
            .any(|t| !t.is_empty() && question_folded.contains(&fold_str(t)))
    }
}

impl From<&StaticTriggerRule> for TriggerRule {
    fn from(rule: &StaticTriggerRule) -> Self {
        Self {
            triggers: rule.triggers.iter().map(|s| s.to_string()).collect(),
            keywords: rule.keywords.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The compiled-in rule table as owned rules.
pub fn builtin_rules() -> Vec<TriggerRule> {
    HEART_OF_DARKNESS_RULES.iter().map(TriggerRule::from).collect()
}

/// Base tokens of a question: steps 1–3 of keyword extraction.
///
/// Tokens are folded char-by-char with [`fold_str`] so they match the
/// folded reference text exactly.
pub fn base_tokens(question: &str, extra_stop_words: &[String]) -> KeywordSet {
    let extra: Vec<String> = extra_stop_words.iter().map(|w| fold_str(w.trim())).collect();
    let cleaned: String = fold_str(question)
        .chars()
        .filter(|c| !STRIPPED.contains(c))
        .collect();

    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|t| !STOP_WORDS.contains(t) && !extra.iter().any(|w| w.as_str() == *t))
        .map(str::to_string)
        .collect()
}

/// Keywords contributed by the trigger rules that fire on `question`.
pub fn trigger_keywords(question: &str, rules: &[TriggerRule]) -> KeywordSet {
    let folded = fold_str(question);
    rules
        .iter()
        .filter(|rule| rule.fires(&folded))
        .flat_map(|rule| rule.keywords.iter())
        .map(|k| fold_str(k))
        .filter(|k| k.chars().count() >= MIN_TOKEN_CHARS)
        .collect()
}

/// Full keyword set for a question: base tokens ∪ trigger keywords.
pub fn extract_keywords(
    question: &str,
    rules: &[TriggerRule],
    extra_stop_words: &[String],
) -> KeywordSet {
    let mut keywords = base_tokens(question, extra_stop_words);
    keywords.extend(trigger_keywords(question, rules));
    keywords
}
