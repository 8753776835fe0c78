//! Criteria extraction — job description text to an ordered list of ranking criteria.

use std::time::Duration;

use tracing::info;

use crate::criteria::prompts::{build_criteria_prompt, CRITERIA_SYSTEM_ROLE};
use crate::criteria::store::{CriteriaStore, RankingCriteria, SessionId};
use crate::errors::AppError;
use crate::llm_client::json::{parse_tolerant, JsonShape};
use crate::llm_client::prompts::json_only_system;
use crate::llm_client::{complete_within, CompletionProvider};

/// Asks the LLM for the criteria in `jd_text` and stores them as the session's active set.
///
/// Empty text is rejected before any LLM call. The store is only written on success, and
/// the write replaces the previous criteria entirely. An empty array from the LLM is stored
/// as-is; scoring against it is refused later.
pub async fn extract_criteria(
    jd_text: &str,
    llm: &dyn CompletionProvider,
    timeout: Duration,
    store: &CriteriaStore,
    session: &SessionId,
) -> Result<RankingCriteria, AppError> {
    if jd_text.trim().is_empty() {
        return Err(AppError::EmptyDocument("job description".to_string()));
    }

    let prompt = build_criteria_prompt(jd_text);
    let system = json_only_system(CRITERIA_SYSTEM_ROLE);
    let raw = complete_within(llm, &prompt, &system, timeout).await?;

    let parsed: Vec<String> = parse_tolerant(&raw, JsonShape::Array)?;
    let criteria = RankingCriteria::normalized(parsed);

    info!(
        session = session.as_str(),
        count = criteria.len(),
        "extracted ranking criteria"
    );
    store.set(session, criteria.clone());

    Ok(criteria)
}
