//! # Passage Harness
//!
//! Keyword-grounded context extraction for LLM tools over a fixed reference
//! text (*Heart of Darkness* by default).
//!
//! The extraction engine lives in [`passage_harness_core`]; this crate adds
//! configuration, document loading with a process-wide cache, the tool layer
//! an agent framework calls, an HTTP tool server, and the `psg` CLI.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌───────────────────┐
//! │ FsLoader   │──▶│ CachedLoader │──▶│ extract_context   │
//! │ (tokio fs) │   │ (path cache) │   │ (core pipeline)   │
//! └────────────┘   └──────────────┘   └─────────┬─────────┘
//!                                               │
//!                         ┌─────────────────────┤
//!                         ▼                     ▼
//!                    ┌──────────┐         ┌──────────┐
//!                    │   CLI    │         │   HTTP   │
//!                    │  (psg)   │         │  tools   │
//!                    └──────────┘         └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! psg check                                  # validate config, load text
//! psg ask "What river does the story start on?"
//! psg keywords "Why does Marlow lie to the Intended?"
//! psg serve                                  # start HTTP tool server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`loader`] | Document loading and caching |
//! | [`models`] | Tool input/output types |
//! | [`traits`] | Tool trait, context, and registry |
//! | [`ask`] | CLI commands |
//! | [`server`] | HTTP tool server |

pub mod ask;
pub mod config;
pub mod loader;
pub mod models;
pub mod server;
pub mod traits;
