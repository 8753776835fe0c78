// Shared prompt fragments.
// Each orchestrator that calls the LLM defines its own prompts.rs alongside it;
// this file only holds the cross-cutting pieces.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Joins a role statement with the JSON-only fragment.
pub fn json_only_system(role: &str) -> String {
    format!("{role} {JSON_ONLY_SYSTEM}")
}
