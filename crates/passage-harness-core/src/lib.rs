//! # Passage Harness Core
//!
//! Pure, I/O-free context extraction: given a question and a long reference
//! text, select a bounded set of passages to hand to a language model as
//! grounding context.
//!
//! This crate contains no tokio, filesystem I/O, or other native-only
//! dependencies. Document loading and caching policy belong to the caller.
//!
//! ## Pipeline
//!
//! ```text
//! question ──▶ keywords ──▶ locate ──▶ window ──▶ select ──▶ context
//!                              ▲                     ▲
//!                         FoldedText ────────────────┘
//! ```
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`keywords`] | Stop-word filtering and domain trigger rules |
//! | [`text`] | Case-folded character view of the reference text |
//! | [`locate`] | Exhaustive keyword occurrence scan |
//! | [`window`] | Fixed-radius windows merged into scored candidates |
//! | [`select`] | Budgeted greedy selection with head/tail fallback |
//! | [`cache`] | Content cache trait and in-memory implementation |
//! | [`extract`] | The [`extract_context`](extract::extract_context) entry point |

pub mod cache;
pub mod extract;
pub mod keywords;
pub mod locate;
pub mod select;
pub mod text;
pub mod window;
