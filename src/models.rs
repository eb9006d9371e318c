//! Tool-boundary data types.
//!
//! LLM frameworks hand tool arguments over in several shapes. [`ToolInput`]
//! accepts the shapes seen in practice, is validated once, and is then
//! reduced to the plain question string the extraction engine expects.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Tool arguments that cannot be turned into a question.
///
/// The server maps these to `400 bad_request`; every other tool failure is
/// a `500`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid tool input: expected a string or an object with a \"question\" field")]
    Shape,
    #[error("question must not be empty")]
    EmptyQuestion,
}

/// Raw tool arguments as sent by an LLM tool call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ToolInput {
    /// A bare JSON string: `"Which river?"`.
    Text(String),
    /// `{ "question": "Which river?" }`
    Question { question: String },
    /// `{ "query": "Which river?" }`
    Query { query: String },
}

impl ToolInput {
    /// Decode tool arguments from JSON.
    pub fn from_value(value: Value) -> Result<Self, InputError> {
        serde_json::from_value(value).map_err(|_| InputError::Shape)
    }

    /// The trimmed question. Fails if it is blank.
    pub fn into_question(self) -> Result<String, InputError> {
        let raw = match self {
            ToolInput::Text(s) => s,
            ToolInput::Question { question } => question,
            ToolInput::Query { query } => query,
        };
        let question = raw.trim();
        if question.is_empty() {
            return Err(InputError::EmptyQuestion);
        }
        Ok(question.to_string())
    }
}

/// Tool response packaged for the LLM.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    pub question: String,
    /// Reference text length in characters.
    pub text_length: usize,
    /// Extracted context length in characters.
    pub context_length: usize,
    pub context: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_all_shapes() {
        for value in [
            json!("Which river?"),
            json!({ "question": "Which river?" }),
            json!({ "query": "Which river?" }),
            json!({ "question": "Which river?", "locale": "en" }),
        ] {
            let q = ToolInput::from_value(value).unwrap().into_question().unwrap();
            assert_eq!(q, "Which river?");
        }
    }

    #[test]
    fn test_rejects_other_shapes() {
        for value in [json!(42), json!({ "q": "x" }), json!(["a"]), json!(null)] {
            let err = ToolInput::from_value(value).unwrap_err();
            assert!(err.to_string().contains("invalid tool input"));
        }
    }

    #[test]
    fn test_blank_question_rejected() {
        let err = ToolInput::Question {
            question: "   ".to_string(),
        }
        .into_question()
        .unwrap_err();
        assert_eq!(err, InputError::EmptyQuestion);
        assert_eq!(err.to_string(), "question must not be empty");
    }

    #[test]
    fn test_output_field_names() {
        let out = ToolOutput {
            question: "q".to_string(),
            text_length: 10,
            context_length: 3,
            context: "abc".to_string(),
        };
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v["textLength"], 10);
        assert_eq!(v["contextLength"], 3);
        assert_eq!(v["context"], "abc");
    }
}
