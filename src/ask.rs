//! `psg ask`, `psg keywords`, and `psg check`.
//!
//! Each command loads the configured reference text through a
//! [`CachedLoader`] and prints to stdout; diagnostics go to the tracing
//! subscriber on stderr.

use anyhow::{Context, Result};
use passage_harness_core::extract::extract_with_report;
use passage_harness_core::keywords::extract_keywords;
use serde::Serialize;

use crate::config::Config;
use crate::loader::CachedLoader;
use crate::models::ToolInput;

/// Per-invocation overrides for the configured extraction settings.
#[derive(Debug, Default, Clone, Copy)]
pub struct AskOverrides {
    pub budget: Option<usize>,
    pub radius: Option<usize>,
}

/// JSON shape printed by `psg ask --json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AskJson<'a> {
    question: &'a str,
    text_length: usize,
    context_length: usize,
    keywords: &'a [String],
    passages: usize,
    fallback: bool,
    context: &'a str,
}

pub async fn run_ask(
    config: &Config,
    question: &str,
    overrides: AskOverrides,
    json: bool,
) -> Result<()> {
    let question = ToolInput::Text(question.to_string()).into_question()?;

    let mut params = config.extraction.to_params();
    if let Some(budget) = overrides.budget {
        if budget == 0 {
            anyhow::bail!("--budget must be > 0");
        }
        params.max_budget = budget;
    }
    if let Some(radius) = overrides.radius {
        params.window_radius = radius;
    }

    let loader = CachedLoader::filesystem();
    let document = loader
        .load(&config.document.path)
        .await
        .context("could not load reference text")?;

    let report = extract_with_report(&question, &document, &params);
    let text_length = document.chars().count();
    let context_length = report.context.chars().count();

    if json {
        let out = AskJson {
            question: &question,
            text_length,
            context_length,
            keywords: &report.keywords,
            passages: report.passages.len(),
            fallback: report.fallback,
            context: &report.context,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("keywords: {}", report.keywords.join(", "));
    println!(
        "passages: {}{}",
        report.passages.len(),
        if report.fallback { " (fallback)" } else { "" }
    );
    println!("context: {} of {} chars", context_length, text_length);
    println!();
    println!("{}", report.context);

    Ok(())
}

pub fn run_keywords(config: &Config, question: &str) -> Result<()> {
    let extraction = &config.extraction;
    let keywords = extract_keywords(question, &extraction.rules(), &extraction.extra_stop_words);
    if keywords.is_empty() {
        println!("No keywords.");
        return Ok(());
    }
    for k in keywords {
        println!("{}", k);
    }
    Ok(())
}

pub async fn run_check(config: &Config) -> Result<()> {
    let loader = CachedLoader::filesystem();
    let document = loader
        .load(&config.document.path)
        .await
        .context("could not load reference text")?;

    println!(
        "document: {} ({}, {} chars)",
        config.document.title,
        config.document.path.display(),
        document.chars().count()
    );
    println!(
        "extraction: budget {} chars, radius {} chars, {:?} merge",
        config.extraction.max_budget, config.extraction.window_radius, config.extraction.merge
    );
    println!("trigger rules: {}", config.extraction.rules().len());
    println!("server: {}", config.server.bind);
    println!("ok");
    Ok(())
}
