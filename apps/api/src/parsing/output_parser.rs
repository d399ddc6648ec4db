//! Schema-driven output handling: renders a type's JSON Schema into prompt
//! instructions, and validates the model's reply back into that type.

use std::marker::PhantomData;

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::llm_client::strip_json_fences;

/// Longest slice of the raw reply kept in an error for diagnostics.
const REPLY_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Error)]
#[error("Failed to parse model output: {source}. Got: {excerpt}")]
pub struct OutputParseError {
    #[source]
    pub source: serde_json::Error,
    pub excerpt: String,
}

/// Parses model replies into `T`, validated against `T`'s schema.
#[derive(Debug)]
pub struct SchemaOutputParser<T> {
    _target: PhantomData<T>,
}

impl<T> SchemaOutputParser<T>
where
    T: JsonSchema + DeserializeOwned,
{
    pub fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }

    /// Instructions that tell the model to answer with an instance of `T`'s schema.
    pub fn format_instructions(&self) -> String {
        let schema = schema_for!(T);
        let schema = serde_json::to_string(&schema).unwrap_or_else(|_| "{}".to_string());
        format!(
            "The output should be formatted as a JSON instance that conforms to the JSON schema below.\n\
             \n\
             As an example, for the schema {{\"properties\": {{\"foo\": {{\"title\": \"Foo\", \"description\": \"a list of strings\", \"type\": \"array\", \"items\": {{\"type\": \"string\"}}}}}}, \"required\": [\"foo\"]}}\n\
             the object {{\"foo\": [\"bar\", \"baz\"]}} is a well-formatted instance of the schema. \
             The object {{\"properties\": {{\"foo\": [\"bar\", \"baz\"]}}}} is not well-formatted.\n\
             \n\
             Here is the output schema:\n\
             ```\n\
             {schema}\n\
             ```"
        )
    }

    /// Strips code fences, falls back to the outermost `{...}` span, then deserializes.
    pub fn parse(&self, reply: &str) -> Result<T, OutputParseError> {
        let candidate = strip_json_fences(reply);
        match serde_json::from_str::<T>(candidate) {
            Ok(value) => Ok(value),
            Err(first_err) => match outermost_object(candidate) {
                Some(object) if object.len() < candidate.len() => serde_json::from_str::<T>(object)
                    .map_err(|source| OutputParseError {
                        source,
                        excerpt: excerpt(reply),
                    }),
                _ => Err(OutputParseError {
                    source: first_err,
                    excerpt: excerpt(reply),
                }),
            },
        }
    }
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn excerpt(reply: &str) -> String {
    let trimmed = reply.trim();
    match trimmed.char_indices().nth(REPLY_EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeData;

    fn parser() -> SchemaOutputParser<ResumeData> {
        SchemaOutputParser::new()
    }

    #[test]
    fn test_format_instructions_embed_schema() {
        let instructions = parser().format_instructions();
        assert!(instructions.starts_with("The output should be formatted as a JSON instance"));
        assert!(instructions.contains("\"contact_information\""));
        assert!(instructions.contains("Certification name"));
        assert!(instructions.trim_end().ends_with("```"));
    }

    #[test]
    fn test_parse_plain_json() {
        let data = parser()
            .parse(r#"{"professional_summary": "Backend engineer"}"#)
            .unwrap();
        assert_eq!(data.professional_summary.as_deref(), Some("Backend engineer"));
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = "```json\n{\"skills\": {\"technical\": [\"Rust\"]}}\n```";
        let data = parser().parse(reply).unwrap();
        assert_eq!(data.skills.unwrap().technical, vec!["Rust"]);
    }

    #[test]
    fn test_parse_json_wrapped_in_prose() {
        let reply = "Sure! Here is the parsed resume:\n{\"projects\": [{\"name\": \"ray tracer\"}]}\nLet me know.";
        let data = parser().parse(reply).unwrap();
        assert_eq!(data.projects[0].name.as_deref(), Some("ray tracer"));
    }

    #[test]
    fn test_schema_violation_is_reported_with_excerpt() {
        let reply = r#"{"certifications": [{"issuer": "CNCF"}]}"#;
        let err = parser().parse(reply).unwrap_err();
        assert!(err.to_string().contains("missing field `name`"));
        assert_eq!(err.excerpt, reply);
    }

    #[test]
    fn test_non_json_reply_fails() {
        let err = parser().parse("I cannot help with that.").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse model output"));
    }

    #[test]
    fn test_excerpt_truncates_long_replies() {
        let long = "x".repeat(REPLY_EXCERPT_CHARS + 50);
        let short = excerpt(&long);
        assert_eq!(short.len(), REPLY_EXCERPT_CHARS + 3);
        assert!(short.ends_with("..."));
    }
}
