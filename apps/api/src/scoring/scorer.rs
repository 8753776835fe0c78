//! Resume scorer — scores every uploaded resume against the session's criteria.
//!
//! Each resume is an independent unit of work: text extraction, one LLM call, validation.
//! Work fans out over a bounded `JoinSet` and fans back in by upload index, so the report
//! order never depends on which LLM call finished first. A failure local to one resume
//! produces a degraded row; only batch-wide failures surface as an error.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::criteria::store::{CriteriaStore, RankingCriteria, SessionId};
use crate::documents::{extract_text, UploadedFile, DEFAULT_EXTRACTION_TIMEOUT};
use crate::errors::AppError;
use crate::llm_client::json::{parse_tolerant, JsonShape, MalformedJson, EXCERPT_CHARS};
use crate::llm_client::prompts::json_only_system;
use crate::llm_client::{complete_within, CompletionProvider};
use crate::scoring::prompts::{build_scoring_prompt, SCORE_MAX, SCORE_MIN, SCORING_SYSTEM_ROLE};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Outcome flag for one row. Anything other than `Scored` is a degraded row with zero scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Scored,
    EmptyDocument,
    UnsupportedFormat,
    ExtractionFailed,
    MalformedResponse,
    ScoreMismatch,
    ProviderError,
    InternalError,
}

impl RowStatus {
    fn from_error(err: &AppError) -> Self {
        match err {
            AppError::EmptyDocument(_) => RowStatus::EmptyDocument,
            AppError::UnsupportedFormat(_) => RowStatus::UnsupportedFormat,
            AppError::Extraction { .. } => RowStatus::ExtractionFailed,
            AppError::MalformedLlmResponse(_) => RowStatus::MalformedResponse,
            AppError::ScoreMismatch { .. } => RowStatus::ScoreMismatch,
            AppError::Provider(_) => RowStatus::ProviderError,
            _ => RowStatus::InternalError,
        }
    }

    /// Failures caused by the LLM rather than by the uploaded file.
    fn is_llm_failure(self) -> bool {
        matches!(
            self,
            RowStatus::MalformedResponse | RowStatus::ScoreMismatch | RowStatus::ProviderError
        )
    }
}

/// One candidate's scores, positionally aligned with the criteria.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeScoreRow {
    pub file_name: String,
    pub candidate_name: String,
    pub scores: Vec<u32>,
    pub total_score: u32,
    pub status: RowStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResumeScoreRow {
    fn scored(file_name: String, candidate_name: String, scores: Vec<u32>) -> Self {
        let total_score = scores.iter().sum();
        Self {
            file_name,
            candidate_name,
            scores,
            total_score,
            status: RowStatus::Scored,
            error: None,
        }
    }

    fn degraded(file_name: String, criteria_count: usize, err: &AppError) -> Self {
        Self {
            candidate_name: file_stem(&file_name),
            file_name,
            scores: vec![0; criteria_count],
            total_score: 0,
            status: RowStatus::from_error(err),
            error: Some(err.to_string()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.status != RowStatus::Scored
    }
}

/// All rows of one scoring request, in upload order.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub criteria: RankingCriteria,
    pub rows: Vec<ResumeScoreRow>,
}

impl ScoreReport {
    pub fn degraded_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_degraded()).count()
    }
}

/// Where a resume's text comes from.
#[derive(Debug, Clone)]
pub enum ResumeSource {
    #[cfg(test)]
    Text(String),
    Upload(UploadedFile),
}

#[derive(Debug, Clone)]
pub struct ResumeInput {
    pub file_name: String,
    pub source: ResumeSource,
}

impl From<UploadedFile> for ResumeInput {
    fn from(file: UploadedFile) -> Self {
        Self {
            file_name: file.file_name.clone(),
            source: ResumeSource::Upload(file),
        }
    }
}

/// Shape the LLM is asked to return.
#[derive(Debug, Deserialize)]
struct LlmScores {
    #[serde(default, alias = "candidate_name", alias = "Candidate Name")]
    name: Option<String>,
    scores: Vec<serde_json::Value>,
}

// ────────────────────────────────────────────────────────────────────────────
// Scorer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ResumeScorer {
    llm: Arc<dyn CompletionProvider>,
    timeout: Duration,
    extraction_timeout: Duration,
    concurrency: usize,
}

impl ResumeScorer {
    pub fn new(llm: Arc<dyn CompletionProvider>, timeout: Duration, concurrency: usize) -> Self {
        Self {
            llm,
            timeout,
            extraction_timeout: DEFAULT_EXTRACTION_TIMEOUT,
            concurrency: concurrency.max(1),
        }
    }

    pub fn with_extraction_timeout(mut self, extraction_timeout: Duration) -> Self {
        self.extraction_timeout = extraction_timeout;
        self
    }

    /// Scores `inputs` against the criteria stored for `session`.
    ///
    /// Fails with `NoCriteria` when the session has no criteria, or only an empty set.
    pub async fn score_resumes(
        &self,
        store: &CriteriaStore,
        session: &SessionId,
        inputs: Vec<ResumeInput>,
    ) -> Result<ScoreReport, AppError> {
        let criteria = store
            .get(session)
            .filter(|c| !c.is_empty())
            .ok_or(AppError::NoCriteria)?;
        self.score_against(criteria, inputs).await
    }

    /// Scores `inputs` against an explicit criteria list.
    pub async fn score_against(
        &self,
        criteria: RankingCriteria,
        inputs: Vec<ResumeInput>,
    ) -> Result<ScoreReport, AppError> {
        if criteria.is_empty() {
            return Err(AppError::NoCriteria);
        }
        if inputs.is_empty() {
            return Err(AppError::Validation(
                "at least one resume file is required".to_string(),
            ));
        }

        let criteria = Arc::new(criteria);
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let file_names: Vec<String> = inputs.iter().map(|i| i.file_name.clone()).collect();

        let mut tasks = JoinSet::new();
        for (index, input) in inputs.into_iter().enumerate() {
            let llm = Arc::clone(&self.llm);
            let criteria = Arc::clone(&criteria);
            let permits = Arc::clone(&permits);
            let timeouts = (self.extraction_timeout, self.timeout);
            tasks.spawn(async move {
                // The semaphore is never closed, so acquire only fails after shutdown.
                let _permit = permits.acquire_owned().await.ok();
                let outcome = score_one(llm.as_ref(), &criteria, input, timeouts).await;
                (index, outcome)
            });
        }

        let mut slots: Vec<Option<(ResumeScoreRow, Option<AppError>)>> =
            (0..file_names.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(e) => warn!("resume scoring task aborted: {e}"),
            }
        }

        let mut rows = Vec::with_capacity(slots.len());
        let mut failures = Vec::new();
        for (slot, file_name) in slots.into_iter().zip(file_names) {
            let (row, failure) = slot.unwrap_or_else(|| {
                let err = AppError::Internal(anyhow::anyhow!("scoring task aborted"));
                (ResumeScoreRow::degraded(file_name, criteria.len(), &err), Some(err))
            });
            if let Some(err) = failure {
                warn!(
                    file = %row.file_name,
                    code = err.code(),
                    "degraded resume row: {err}"
                );
                failures.push(err);
            }
            rows.push(row);
        }

        if let Some(err) = batch_failure(&rows, failures) {
            return Err(err);
        }

        let report = ScoreReport {
            criteria: Arc::unwrap_or_clone(criteria),
            rows,
        };
        info!(
            rows = report.rows.len(),
            degraded = report.degraded_count(),
            "scored resume batch"
        );
        Ok(report)
    }
}

/// Whole-request failure: every file unsupported, or every candidate failed at the LLM.
fn batch_failure(rows: &[ResumeScoreRow], failures: Vec<AppError>) -> Option<AppError> {
    if rows.iter().any(|r| !r.is_degraded()) {
        return None;
    }
    if rows.iter().all(|r| r.status == RowStatus::UnsupportedFormat) {
        let names: Vec<&str> = rows.iter().map(|r| r.file_name.as_str()).collect();
        return Some(AppError::UnsupportedFormat(names.join(", ")));
    }
    if rows.iter().all(|r| r.status.is_llm_failure()) {
        return failures.into_iter().next();
    }
    None
}

async fn score_one(
    llm: &dyn CompletionProvider,
    criteria: &RankingCriteria,
    input: ResumeInput,
    timeouts: (Duration, Duration),
) -> (ResumeScoreRow, Option<AppError>) {
    let ResumeInput { file_name, source } = input;

    match resolve_and_score(llm, criteria, source, &file_name, timeouts).await {
        Ok((name, scores)) => {
            let candidate_name = name.unwrap_or_else(|| file_stem(&file_name));
            (ResumeScoreRow::scored(file_name, candidate_name, scores), None)
        }
        Err(err) => (
            ResumeScoreRow::degraded(file_name, criteria.len(), &err),
            Some(err),
        ),
    }
}

async fn resolve_and_score(
    llm: &dyn CompletionProvider,
    criteria: &RankingCriteria,
    source: ResumeSource,
    file_name: &str,
    (extraction_timeout, llm_timeout): (Duration, Duration),
) -> Result<(Option<String>, Vec<u32>), AppError> {
    let text = match source {
        #[cfg(test)]
        ResumeSource::Text(text) => text,
        ResumeSource::Upload(file) => extract_text(&file, extraction_timeout).await?,
    };
    if text.trim().is_empty() {
        return Err(AppError::EmptyDocument(file_name.to_string()));
    }
    request_scores(llm, criteria, &text, llm_timeout).await
}

/// One LLM round-trip for one resume. Returns the candidate name, if the model found one,
/// and scores clamped into the scale.
async fn request_scores(
    llm: &dyn CompletionProvider,
    criteria: &RankingCriteria,
    resume_text: &str,
    timeout: Duration,
) -> Result<(Option<String>, Vec<u32>), AppError> {
    let prompt = build_scoring_prompt(criteria, resume_text);
    let system = json_only_system(SCORING_SYSTEM_ROLE);
    let raw = complete_within(llm, &prompt, &system, timeout).await?;

    let parsed: LlmScores = parse_tolerant(&raw, JsonShape::Object)?;

    if parsed.scores.len() != criteria.len() {
        return Err(AppError::ScoreMismatch {
            expected: criteria.len(),
            actual: parsed.scores.len(),
        });
    }

    let scores = parsed
        .scores
        .iter()
        .enumerate()
        .map(|(i, v)| {
            coerce_score(v).ok_or_else(|| MalformedJson {
                shape: JsonShape::Object,
                reason: format!("score #{} is not a number: {v}", i + 1),
                excerpt: raw.trim().chars().take(EXCERPT_CHARS).collect(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((clean_name(parsed.name), scores))
}

/// Numbers are rounded and clamped into the scale; numeric strings are accepted.
fn coerce_score(value: &serde_json::Value) -> Option<u32> {
    let raw = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.round().clamp(SCORE_MIN as f64, SCORE_MAX as f64) as u32)
}

fn clean_name(name: Option<String>) -> Option<String> {
    let name = name?.trim().to_string();
    let placeholder = name.is_empty()
        || name.eq_ignore_ascii_case("unknown")
        || name.eq_ignore_ascii_case("null")
        || name.eq_ignore_ascii_case("n/a");
    (!placeholder).then_some(name)
}

/// Filename without directories or extension, used when no candidate name is available.
fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(file_name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::{build_docx, DOCX_MIME};
    use crate::llm_client::fake::ScriptedProvider;
    use crate::llm_client::LlmError;
    use bytes::Bytes;
    use serde_json::json;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn criteria() -> RankingCriteria {
        RankingCriteria::normalized(["5+ years Python", "ML expertise", "CS degree"])
    }

    fn text(name: &str, body: &str) -> ResumeInput {
        ResumeInput {
            file_name: name.to_string(),
            source: ResumeSource::Text(body.to_string()),
        }
    }

    fn scorer(llm: ScriptedProvider) -> ResumeScorer {
        ResumeScorer::new(Arc::new(llm), TIMEOUT, 4)
    }

    /// Answers with the name/scores registered for whichever marker the resume contains.
    fn by_marker(table: &'static [(&'static str, &'static str)]) -> ScriptedProvider {
        ScriptedProvider::new(move |prompt| {
            table
                .iter()
                .find(|(marker, _)| prompt.contains(marker))
                .map(|(_, reply)| reply.to_string())
                .ok_or(LlmError::EmptyContent)
        })
    }

    #[tokio::test]
    async fn test_example_batch() {
        let llm = by_marker(&[
            ("JOHN", r#"{"name": "John Doe", "scores": [5, 4, 3]}"#),
            ("JANE", r#"{"name": "Jane Smith", "scores": [4, 5, 4]}"#),
        ]);
        let report = scorer(llm)
            .score_against(
                criteria(),
                vec![text("john.pdf", "JOHN resume"), text("jane.pdf", "JANE resume")],
            )
            .await
            .unwrap();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].candidate_name, "John Doe");
        assert_eq!(report.rows[0].scores, vec![5, 4, 3]);
        assert_eq!(report.rows[0].total_score, 12);
        assert_eq!(report.rows[1].candidate_name, "Jane Smith");
        assert_eq!(report.rows[1].total_score, 13);
        assert_eq!(report.degraded_count(), 0);
    }

    #[tokio::test]
    async fn test_order_follows_upload_not_completion() {
        let llm = by_marker(&[
            ("FIRST", r#"{"name": "First", "scores": [1, 1, 1]}"#),
            ("SECOND", r#"{"name": "Second", "scores": [2, 2, 2]}"#),
            ("THIRD", r#"{"name": "Third", "scores": [3, 3, 3]}"#),
        ])
        .with_delay(|prompt| {
            if prompt.contains("FIRST") {
                Duration::from_millis(120)
            } else if prompt.contains("SECOND") {
                Duration::from_millis(60)
            } else {
                Duration::ZERO
            }
        });

        let report = scorer(llm)
            .score_against(
                criteria(),
                vec![text("a.pdf", "FIRST"), text("b.pdf", "SECOND"), text("c.pdf", "THIRD")],
            )
            .await
            .unwrap();

        let names: Vec<_> = report.rows.iter().map(|r| r.candidate_name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_total_is_sum_of_scores() {
        let llm = ScriptedProvider::fixed(r#"{"name": "Ada", "scores": [2, 5, 1]}"#);
        let report = scorer(llm)
            .score_against(criteria(), vec![text("ada.docx", "Ada Lovelace")])
            .await
            .unwrap();
        let row = &report.rows[0];
        assert_eq!(row.total_score, row.scores.iter().sum::<u32>());
        assert_eq!(row.total_score, 8);
    }

    #[tokio::test]
    async fn test_out_of_range_and_fractional_scores_are_clamped() {
        let llm = ScriptedProvider::fixed(r#"{"name": "Ada", "scores": [9, -2, "3.6"]}"#);
        let report = scorer(llm)
            .score_against(criteria(), vec![text("ada.pdf", "resume")])
            .await
            .unwrap();
        assert_eq!(report.rows[0].scores, vec![5, 1, 4]);
        assert_eq!(report.rows[0].total_score, 10);
    }

    #[tokio::test]
    async fn test_missing_name_falls_back_to_file_stem() {
        let llm = by_marker(&[
            ("NONAME", r#"{"name": null, "scores": [3, 3, 3]}"#),
            ("UNKNOWN", r#"{"name": "Unknown", "scores": [3, 3, 3]}"#),
            ("ABSENT", r#"{"scores": [3, 3, 3]}"#),
        ]);
        let report = scorer(llm)
            .score_against(
                criteria(),
                vec![
                    text("uploads/cv_0042.pdf", "NONAME"),
                    text("r.smith.docx", "UNKNOWN"),
                    text("blank", "ABSENT"),
                ],
            )
            .await
            .unwrap();
        let names: Vec<_> = report.rows.iter().map(|r| r.candidate_name.as_str()).collect();
        assert_eq!(names, ["cv_0042", "r.smith", "blank"]);
    }

    #[tokio::test]
    async fn test_empty_resume_is_degraded_and_batch_continues() {
        let llm = ScriptedProvider::fixed(r#"{"name": "Jane Smith", "scores": [4, 5, 4]}"#);
        let provider = llm.clone();
        let report = scorer(llm)
            .score_against(
                criteria(),
                vec![text("empty.pdf", "   "), text("jane.pdf", "Jane")],
            )
            .await
            .unwrap();

        assert_eq!(report.rows[0].status, RowStatus::EmptyDocument);
        assert_eq!(report.rows[0].scores, vec![0, 0, 0]);
        assert_eq!(report.rows[0].total_score, 0);
        assert_eq!(report.rows[0].candidate_name, "empty");
        assert_eq!(report.rows[1].status, RowStatus::Scored);
        assert_eq!(report.degraded_count(), 1);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_wrong_length_is_score_mismatch_row() {
        let llm = by_marker(&[
            ("SHORT", r#"{"name": "Short", "scores": [4, 5]}"#),
            ("GOOD", r#"{"name": "Good", "scores": [4, 5, 4]}"#),
        ]);
        let report = scorer(llm)
            .score_against(criteria(), vec![text("s.pdf", "SHORT"), text("g.pdf", "GOOD")])
            .await
            .unwrap();
        assert_eq!(report.rows[0].status, RowStatus::ScoreMismatch);
        assert_eq!(report.rows[0].scores, vec![0, 0, 0]);
        assert_eq!(report.rows[1].status, RowStatus::Scored);
    }

    #[tokio::test]
    async fn test_malformed_and_provider_failures_are_isolated() {
        let llm = ScriptedProvider::new(|prompt| {
            if prompt.contains("PROSE") {
                Ok("I am unable to score this resume.".to_string())
            } else if prompt.contains("DOWN") {
                Err(LlmError::Api {
                    status: 529,
                    message: "overloaded".to_string(),
                })
            } else if prompt.contains("WORDS") {
                Ok(r#"{"name": "W", "scores": ["high", 3, 3]}"#.to_string())
            } else {
                Ok(r#"Result: {"name": "Ok", "scores": [1, 2, 3]}"#.to_string())
            }
        });
        let report = scorer(llm)
            .score_against(
                criteria(),
                vec![
                    text("p.pdf", "PROSE"),
                    text("d.pdf", "DOWN"),
                    text("w.pdf", "WORDS"),
                    text("ok.pdf", "fine"),
                ],
            )
            .await
            .unwrap();

        let statuses: Vec<_> = report.rows.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            [
                RowStatus::MalformedResponse,
                RowStatus::ProviderError,
                RowStatus::MalformedResponse,
                RowStatus::Scored
            ]
        );
        assert_eq!(report.rows[3].total_score, 6);
    }

    #[tokio::test]
    async fn test_timeout_is_candidate_failure() {
        let llm = by_marker(&[
            ("SLOW", r#"{"name": "Slow", "scores": [5, 5, 5]}"#),
            ("FAST", r#"{"name": "Fast", "scores": [1, 1, 1]}"#),
        ])
        .with_delay(|prompt| {
            if prompt.contains("SLOW") {
                Duration::from_millis(300)
            } else {
                Duration::ZERO
            }
        });
        let report = ResumeScorer::new(Arc::new(llm), Duration::from_millis(50), 2)
            .score_against(criteria(), vec![text("s.pdf", "SLOW"), text("f.pdf", "FAST")])
            .await
            .unwrap();
        assert_eq!(report.rows[0].status, RowStatus::ProviderError);
        assert!(report.rows[0].error.as_deref().unwrap().contains("timed out"));
        assert_eq!(report.rows[1].status, RowStatus::Scored);
    }

    #[tokio::test]
    async fn test_llm_calls_never_exceed_concurrency_limit() {
        let llm = ScriptedProvider::fixed(r#"{"name": "Ada", "scores": [3, 3, 3]}"#)
            .with_delay(|_| Duration::from_millis(30));
        let inputs = (0..6)
            .map(|i| text(&format!("r{i}.pdf"), &format!("resume {i}")))
            .collect();

        let report = ResumeScorer::new(Arc::new(llm.clone()), TIMEOUT, 2)
            .score_against(criteria(), inputs)
            .await
            .unwrap();

        assert_eq!(report.rows.len(), 6);
        assert_eq!(llm.calls(), 6);
        assert_eq!(llm.peak_in_flight(), 2);
    }

    #[tokio::test]
    async fn test_all_llm_failures_fail_the_request() {
        let llm = ScriptedProvider::new(|_| Err(LlmError::EmptyContent));
        let err = scorer(llm)
            .score_against(criteria(), vec![text("a.pdf", "A"), text("b.pdf", "B")])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Provider(_)));
    }

    #[tokio::test]
    async fn test_unsupported_upload_is_degraded_row() {
        let llm = ScriptedProvider::fixed(r#"{"name": "Docx Person", "scores": [2, 2, 2]}"#);
        let inputs = vec![
            ResumeInput::from(UploadedFile {
                file_name: "notes.txt".to_string(),
                content_type: Some("text/plain".to_string()),
                data: Bytes::from_static(b"plain text"),
            }),
            ResumeInput::from(UploadedFile {
                file_name: "person.docx".to_string(),
                content_type: Some(DOCX_MIME.to_string()),
                data: Bytes::from(build_docx(&["Docx Person", "Python, 6 years"])),
            }),
        ];
        let report = scorer(llm).score_against(criteria(), inputs).await.unwrap();
        assert_eq!(report.rows[0].status, RowStatus::UnsupportedFormat);
        assert_eq!(report.rows[1].candidate_name, "Docx Person");
    }

    #[tokio::test]
    async fn test_all_unsupported_fails_the_request() {
        let llm = ScriptedProvider::fixed("{}");
        let provider = llm.clone();
        let inputs = vec![ResumeInput::from(UploadedFile {
            file_name: "cv.odt".to_string(),
            content_type: None,
            data: Bytes::from_static(b"x"),
        })];
        let err = scorer(llm).score_against(criteria(), inputs).await.unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_no_criteria_is_rejected() {
        let llm = ScriptedProvider::fixed("{}");
        let provider = llm.clone();
        let store = CriteriaStore::new();
        let session = SessionId::default();
        let s = scorer(llm);

        let err = s
            .score_resumes(&store, &session, vec![text("a.pdf", "A")])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoCriteria));

        store.set(&session, RankingCriteria::default());
        let err = s
            .score_resumes(&store, &session, vec![text("a.pdf", "A")])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoCriteria));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_uses_session_criteria() {
        let llm = ScriptedProvider::new(|prompt| {
            assert!(prompt.contains("1. Rust"));
            Ok(r#"{"name": "R", "scores": [4]}"#.to_string())
        });
        let store = CriteriaStore::new();
        let session = SessionId::new("team-a");
        store.set(&session, RankingCriteria::normalized(["Rust"]));
        store.set(&SessionId::default(), criteria());

        let report = scorer(llm)
            .score_resumes(&store, &session, vec![text("r.pdf", "R")])
            .await
            .unwrap();
        assert_eq!(report.criteria.as_slice(), ["Rust"]);
        assert_eq!(report.rows[0].scores, vec![4]);
    }

    #[tokio::test]
    async fn test_empty_batch_is_validation_error() {
        let err = scorer(ScriptedProvider::fixed("{}"))
            .score_against(criteria(), vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_coerce_score() {
        assert_eq!(coerce_score(&json!(3)), Some(3));
        assert_eq!(coerce_score(&json!(0)), Some(1));
        assert_eq!(coerce_score(&json!(7)), Some(5));
        assert_eq!(coerce_score(&json!(2.4)), Some(2));
        assert_eq!(coerce_score(&json!(" 4 ")), Some(4));
        assert_eq!(coerce_score(&json!("four")), None);
        assert_eq!(coerce_score(&json!(null)), None);
        assert_eq!(coerce_score(&json!([3])), None);
    }

    #[test]
    fn test_row_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RowStatus::ScoreMismatch).unwrap(),
            "\"score_mismatch\""
        );
    }
}
