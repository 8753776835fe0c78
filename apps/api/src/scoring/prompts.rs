// Prompt constants for resume scoring.

use crate::criteria::store::RankingCriteria;

pub const SCORE_MIN: u32 = 1;
pub const SCORE_MAX: u32 = 5;

/// Role statement for resume scoring. Combined with the JSON-only fragment at call time.
pub const SCORING_SYSTEM_ROLE: &str =
    "You are an HR expert who evaluates resumes strictly against a fixed list of criteria.";

/// Scoring prompt template. Replace `{count}`, `{min}`, `{max}` and then `{criteria}`; the
/// resume text is appended after the template, never substituted into it.
const SCORING_PROMPT_TEMPLATE: &str = r#"Evaluate the resume below against each of the {count} ranking criteria.

Scoring scale (integers only):
- {min}: no evidence of the criterion
- {max}: excellent, clearly demonstrated match

Also extract the candidate's full name from the resume. If no name can be found, use null.

Return ONLY a JSON object with this EXACT schema:
{"name": "<candidate full name>", "scores": [4, 5, 3]}

Rules:
- "scores" MUST contain exactly {count} integers, one per criterion, in the order listed.
- Do NOT include totals, explanations, or any other keys.

Ranking Criteria (in order):
{criteria}

Resume Text:
"#;

pub fn build_scoring_prompt(criteria: &RankingCriteria, resume_text: &str) -> String {
    let numbered: String = criteria
        .as_slice()
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}\n", i + 1, c))
        .collect();

    let mut prompt = SCORING_PROMPT_TEMPLATE
        .replace("{count}", &criteria.len().to_string())
        .replace("{min}", &SCORE_MIN.to_string())
        .replace("{max}", &SCORE_MAX.to_string())
        .replace("{criteria}", numbered.trim_end());
    prompt.push_str(resume_text);
    prompt
}
