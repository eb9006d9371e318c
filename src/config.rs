//! TOML configuration.
//!
//! ```toml
//! [document]
//! path = "data/heart_of_darkness.txt"
//! title = "Heart of Darkness"
//!
//! [extraction]
//! max_budget = 25000
//! window_radius = 1500
//! merge = "first_overlap"
//!
//! [[extraction.triggers]]
//! triggers = ["ivory"]
//! keywords = ["ivory", "tusks"]
//!
//! [server]
//! bind = "127.0.0.1:7340"
//! ```
//!
//! Only `[document].path` is required; everything else has defaults.

use anyhow::{Context, Result};
use passage_harness_core::extract::{ExtractParams, DEFAULT_MAX_BUDGET, DEFAULT_WINDOW_RADIUS};
use passage_harness_core::keywords::{builtin_rules, TriggerRule};
use passage_harness_core::select::DEFAULT_SEPARATOR;
use passage_harness_core::window::MergePolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub document: DocumentConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DocumentConfig {
    pub path: PathBuf,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    "Heart of Darkness".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExtractionConfig {
    #[serde(default = "default_max_budget")]
    pub max_budget: usize,
    #[serde(default = "default_window_radius")]
    pub window_radius: usize,
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default)]
    pub merge: MergePolicy,
    /// Include the compiled-in trigger table.
    #[serde(default = "default_true")]
    pub builtin_triggers: bool,
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
    /// Additional trigger rules, applied after the built-in ones.
    #[serde(default)]
    pub triggers: Vec<TriggerRule>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_budget: DEFAULT_MAX_BUDGET,
            window_radius: DEFAULT_WINDOW_RADIUS,
            separator: default_separator(),
            merge: MergePolicy::default(),
            builtin_triggers: true,
            extra_stop_words: Vec::new(),
            triggers: Vec::new(),
        }
    }
}

fn default_max_budget() -> usize {
    DEFAULT_MAX_BUDGET
}
fn default_window_radius() -> usize {
    DEFAULT_WINDOW_RADIUS
}
fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}
fn default_true() -> bool {
    true
}

impl ExtractionConfig {
    /// Trigger rules in effect: built-ins (if enabled) followed by configured ones.
    pub fn rules(&self) -> Vec<TriggerRule> {
        let mut rules = if self.builtin_triggers {
            builtin_rules()
        } else {
            Vec::new()
        };
        rules.extend(self.triggers.iter().cloned());
        rules
    }

    pub fn to_params(&self) -> ExtractParams {
        ExtractParams {
            max_budget: self.max_budget,
            window_radius: self.window_radius,
            separator: self.separator.clone(),
            merge: self.merge,
            rules: self.rules(),
            extra_stop_words: self.extra_stop_words.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.document.path.as_os_str().is_empty() {
        anyhow::bail!("document.path must not be empty");
    }

    if config.extraction.max_budget == 0 {
        anyhow::bail!("extraction.max_budget must be > 0");
    }

    for (i, rule) in config.extraction.triggers.iter().enumerate() {
        if rule.triggers.iter().all(|t| t.trim().is_empty()) {
            anyhow::bail!("extraction.triggers[{}] has no triggers", i);
        }
        if rule.keywords.is_empty() {
            anyhow::bail!("extraction.triggers[{}] has no keywords", i);
        }
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(config)
}
