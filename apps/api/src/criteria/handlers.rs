//! Axum route handler for criteria extraction.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::criteria::extractor::extract_criteria;
use crate::criteria::store::{RankingCriteria, SessionId};
use crate::documents::extract_text;
use crate::errors::AppError;
use crate::routes::upload::collect_files;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExtractCriteriaResponse {
    pub criteria: RankingCriteria,
    pub session_id: String,
}

/// POST /extract-criteria
///
/// Accepts exactly one job-description file (PDF or DOCX), extracts its ranking criteria
/// and stores them as the session's active criteria, replacing any previous set.
pub async fn handle_extract_criteria(
    State(state): State<AppState>,
    session: SessionId,
    multipart: Multipart,
) -> Result<Json<ExtractCriteriaResponse>, AppError> {
    let mut files = collect_files(multipart).await?;
    let file = match files.len() {
        0 => {
            return Err(AppError::Validation(
                "a job description file is required".to_string(),
            ))
        }
        1 => files.remove(0),
        n => {
            return Err(AppError::Validation(format!(
                "expected one job description file, got {n}"
            )))
        }
    };

    let text = extract_text(&file, state.config.extraction_timeout).await?;
    let criteria = extract_criteria(
        &text,
        state.llm.as_ref(),
        state.config.llm_timeout,
        &state.criteria,
        &session,
    )
    .await?;

    Ok(Json(ExtractCriteriaResponse {
        criteria,
        session_id: session.as_str().to_string(),
    }))
}
