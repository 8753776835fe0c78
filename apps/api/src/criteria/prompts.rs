// Prompt constants for criteria extraction.

/// Role statement for criteria extraction. Combined with the JSON-only fragment at call time.
pub const CRITERIA_SYSTEM_ROLE: &str =
    "You are an expert HR recruiter who turns job descriptions into checkable hiring criteria.";

/// Criteria extraction prompt template. Replace `{jd_text}` before sending.
pub const CRITERIA_PROMPT_TEMPLATE: &str = r#"Analyze the following job description and extract the key ranking criteria.

Each criterion must be a single, concrete, checkable requirement a resume can be scored against:
- skills and technologies ("Experience with Kubernetes")
- certifications ("AWS Certified Solutions Architect")
- years of experience ("5+ years of experience in Python development")
- qualifications and degrees ("Bachelor's degree in Computer Science")

Rules:
- One requirement per string. Do NOT merge unrelated requirements.
- Keep the wording short; do NOT add commentary.
- Preserve the order in which the requirements appear in the job description.

Return ONLY a JSON array of strings, for example:
["5+ years of experience in Python development", "Machine learning expertise"]

Job Description:
{jd_text}"#;

pub fn build_criteria_prompt(jd_text: &str) -> String {
    CRITERIA_PROMPT_TEMPLATE.replace("{jd_text}", jd_text)
}
