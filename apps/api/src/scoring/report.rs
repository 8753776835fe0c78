//! CSV rendering of a score report.

use anyhow::{Context, Result};

use crate::scoring::scorer::ScoreReport;

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const CSV_FILE_NAME: &str = "candidate_scores.csv";

const NAME_COLUMN: &str = "Candidate Name";
const TOTAL_COLUMN: &str = "Total Score";

/// Header `Candidate Name,<criterion…>,Total Score`, then one line per row in report order.
pub fn render_csv(report: &ScoreReport) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header = Vec::with_capacity(report.criteria.len() + 2);
    header.push(NAME_COLUMN);
    header.extend(report.criteria.as_slice().iter().map(String::as_str));
    header.push(TOTAL_COLUMN);
    wtr.write_record(&header)?;

    for row in &report.rows {
        let mut record = Vec::with_capacity(row.scores.len() + 2);
        record.push(row.candidate_name.clone());
        record.extend(row.scores.iter().map(u32::to_string));
        record.push(row.total_score.to_string());
        wtr.write_record(&record)?;
    }

    wtr.into_inner()
        .map_err(|e| anyhow::anyhow!("{}", e.error()))
        .context("failed to flush CSV report")
}
