// Criteria extraction: job description text → ordered ranking criteria.
// All LLM calls go through the CompletionProvider seam.

pub mod extractor;
pub mod handlers;
pub mod prompts;
pub mod store;
