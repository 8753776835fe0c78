//! Tolerant JSON extraction from free-form LLM output.
//!
//! Models wrap JSON in prose or markdown fences often enough that a strict parse alone is
//! not viable. The fallback chain is: strict parse → fence-stripped parse → parse of the
//! substring bounded by the first opening and last closing delimiter → `MalformedJson`.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// The top-level JSON value the caller expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Array,
    Object,
}

impl JsonShape {
    fn delimiters(self) -> (char, char) {
        match self {
            JsonShape::Array => ('[', ']'),
            JsonShape::Object => ('{', '}'),
        }
    }
}

pub const EXCERPT_CHARS: usize = 120;

#[derive(Debug, Error)]
#[error("no parsable JSON {shape:?} in LLM output: {reason} (output began: {excerpt:?})")]
pub struct MalformedJson {
    pub shape: JsonShape,
    pub reason: String,
    pub excerpt: String,
}

/// Parses `raw` as `T`, falling back through the extraction chain described above.
pub fn parse_tolerant<T: DeserializeOwned>(raw: &str, shape: JsonShape) -> Result<T, MalformedJson> {
    let trimmed = raw.trim();

    let strict_err = match serde_json::from_str::<T>(trimmed) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let unfenced = strip_json_fences(trimmed);
    if unfenced != trimmed {
        if let Ok(value) = serde_json::from_str::<T>(unfenced) {
            return Ok(value);
        }
    }

    let Some(bounded) = bounded_substring(trimmed, shape) else {
        return Err(malformed(raw, shape, strict_err.to_string()));
    };

    serde_json::from_str::<T>(bounded).map_err(|e| malformed(raw, shape, e.to_string()))
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// First opening delimiter through the last closing delimiter, inclusive.
fn bounded_substring(text: &str, shape: JsonShape) -> Option<&str> {
    let (open, close) = shape.delimiters();
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

fn malformed(raw: &str, shape: JsonShape, reason: String) -> MalformedJson {
    MalformedJson {
        shape,
        reason,
        excerpt: raw.trim().chars().take(EXCERPT_CHARS).collect(),
    }
}
