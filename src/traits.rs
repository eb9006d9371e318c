//! Tool trait, execution context, and registry.
//!
//! Tools are what an LLM agent calls. Each tool declares an OpenAI
//! function-calling parameter schema and receives a [`ToolContext`] that
//! bridges to the configured reference text and extraction settings.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │             ToolRegistry             │
//! │  ┌───────────────────┐ ┌──────────┐  │
//! │  │ reference_context │ │ keywords │  │
//! │  └───────────────────┘ └──────────┘  │
//! │        + custom Rust tools           │
//! └──────────────────┬───────────────────┘
//!                    ▼
//!          run_server() → HTTP API
//! ```
//!
//! # Usage
//!
//! ```rust
//! use passage_harness::traits::ToolRegistry;
//!
//! let mut tools = ToolRegistry::with_builtins();
//! // tools.register(Box::new(MyTool::new()));
//! assert!(tools.find("reference_context").is_some());
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use passage_harness_core::extract::extract_with_report;
use passage_harness_core::keywords::extract_keywords;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::config::Config;
use crate::loader::CachedLoader;
use crate::models::{ToolInput, ToolOutput};

// ═══════════════════════════════════════════════════════════════════════
// Tool Trait
// ═══════════════════════════════════════════════════════════════════════

/// A tool that agents can discover and call.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use anyhow::Result;
/// use serde_json::{json, Value};
/// use passage_harness::traits::{Tool, ToolContext};
///
/// pub struct TitleTool;
///
/// #[async_trait]
/// impl Tool for TitleTool {
///     fn name(&self) -> &str { "title" }
///     fn description(&self) -> &str { "Name the reference text" }
///
///     fn parameters_schema(&self) -> Value {
///         json!({ "type": "object", "properties": {} })
///     }
///
///     async fn execute(&self, _params: Value, ctx: &ToolContext) -> Result<Value> {
///         Ok(json!({ "title": ctx.config().document.title }))
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Route name (`POST /tools/{name}`); lowercase with underscores.
    fn name(&self) -> &str;

    /// One-line description for agent discovery.
    fn description(&self) -> &str;

    /// Whether this tool ships with Passage Harness. Defaults to `false`.
    fn is_builtin(&self) -> bool {
        false
    }

    /// OpenAI function-calling JSON Schema for parameters.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool. The returned value is wrapped in
    /// `{ "result": ... }` by the server.
    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<Value>;
}

// ═══════════════════════════════════════════════════════════════════════
// ToolContext
// ═══════════════════════════════════════════════════════════════════════

/// Bridge from a tool invocation to the reference text.
///
/// Holds a [`CachedLoader`] so every invocation sharing the same loader
/// reads the reference text from disk at most once.
#[derive(Clone)]
pub struct ToolContext {
    config: Arc<Config>,
    loader: CachedLoader,
}

impl ToolContext {
    pub fn new(config: Arc<Config>, loader: CachedLoader) -> Self {
        Self { config, loader }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The configured reference text.
    pub async fn document(&self) -> Result<Arc<str>> {
        self.loader
            .load(&self.config.document.path)
            .await
            .context("could not load reference text")
    }

    /// Extract grounding context for `question` from the reference text.
    pub async fn answer(&self, question: &str) -> Result<ToolOutput> {
        let document = self.document().await?;
        let params = self.config.extraction.to_params();
        let report = extract_with_report(question, &document, &params);
        if report.fallback {
            warn!(question, "no passages matched; using head/tail excerpt");
        }

        Ok(ToolOutput {
            question: question.to_string(),
            text_length: document.chars().count(),
            context_length: report.context.chars().count(),
            context: report.context,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in Tool Implementations
// ═══════════════════════════════════════════════════════════════════════

fn question_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "question": { "type": "string", "description": "The user's question about the reference text" }
        },
        "required": ["question"]
    })
}

/// Built-in context extraction tool. Delegates to [`ToolContext::answer`].
pub struct ReferenceContextTool;

#[async_trait]
impl Tool for ReferenceContextTool {
    fn name(&self) -> &str {
        "reference_context"
    }

    fn description(&self) -> &str {
        "Retrieve passages of the reference text relevant to a question"
    }

    fn is_builtin(&self) -> bool {
        true
    }

    fn parameters_schema(&self) -> Value {
        question_schema()
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<Value> {
        let question = ToolInput::from_value(params)?.into_question()?;
        let output = ctx.answer(&question).await?;
        Ok(serde_json::to_value(output)?)
    }
}

/// Built-in keyword inspection tool: shows which keywords a question yields.
pub struct KeywordsTool;

#[async_trait]
impl Tool for KeywordsTool {
    fn name(&self) -> &str {
        "keywords"
    }

    fn description(&self) -> &str {
        "Show the keywords extracted from a question"
    }

    fn is_builtin(&self) -> bool {
        true
    }

    fn parameters_schema(&self) -> Value {
        question_schema()
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<Value> {
        let question = ToolInput::from_value(params)?.into_question()?;
        let extraction = &ctx.config().extraction;
        let keywords = extract_keywords(&question, &extraction.rules(), &extraction.extra_stop_words);
        Ok(serde_json::json!({ "question": question, "keywords": keywords }))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════

/// Registry for tools (built-in and custom Rust).
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// A registry pre-loaded with `reference_context` and `keywords`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ReferenceContextTool));
        registry.register(Box::new(KeywordsTool));
        registry
    }

    /// Register a tool. A later tool with the same name is shadowed by the
    /// earlier one in [`find`](ToolRegistry::find).
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Move all tools of `other` into this registry.
    pub fn extend(&mut self, other: ToolRegistry) {
        self.tools.extend(other.tools);
    }

    pub fn tools(&self) -> &[Box<dyn Tool>] {
        &self.tools
    }

    pub fn find(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
