//! Axum route handler for resume scoring.

use axum::extract::{Multipart, Query, State};
use axum::http::header::{self, HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::criteria::store::SessionId;
use crate::errors::AppError;
use crate::routes::upload::collect_files;
use crate::scoring::report::{render_csv, CSV_CONTENT_TYPE, CSV_FILE_NAME};
use crate::scoring::scorer::{ResumeInput, ScoreReport};
use crate::state::AppState;

pub const DEGRADED_ROWS_HEADER: &str = "x-degraded-rows";

#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScoreQuery {
    #[serde(default)]
    pub format: ReportFormat,
}

/// POST /score-resumes
///
/// Scores every uploaded resume against the session's stored criteria. Returns a CSV
/// attachment by default, or the rows with their status flags when `?format=json`.
pub async fn handle_score_resumes(
    State(state): State<AppState>,
    session: SessionId,
    Query(query): Query<ScoreQuery>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let files = collect_files(multipart).await?;
    let inputs: Vec<ResumeInput> = files.into_iter().map(ResumeInput::from).collect();

    let report = state
        .scorer
        .score_resumes(&state.criteria, &session, inputs)
        .await?;

    let mut response = match query.format {
        ReportFormat::Csv => csv_response(&report)?,
        ReportFormat::Json => Json(&report).into_response(),
    };
    response.headers_mut().insert(
        HeaderName::from_static(DEGRADED_ROWS_HEADER),
        HeaderValue::from(report.degraded_count()),
    );
    Ok(response)
}

fn csv_response(report: &ScoreReport) -> Result<Response, AppError> {
    let body = render_csv(report)?;
    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={CSV_FILE_NAME}"),
            ),
        ],
        body,
    )
        .into_response())
}
