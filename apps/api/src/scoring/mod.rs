// Resume scoring: uploaded resumes × stored criteria → per-candidate score rows → CSV.
// All LLM calls go through the CompletionProvider seam.

pub mod handlers;
pub mod prompts;
pub mod report;
pub mod scorer;
