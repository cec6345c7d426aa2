// Instruction blocks sent alongside the inline PDF. One per analysis mode.

use crate::analysis::payload::Mode;

/// Job-match instruction template. Replace `{job_description}` before sending.
pub const JOB_MATCH_PROMPT_TEMPLATE: &str = r#"Analyze the attached Resume PDF against this Job Description:

JOB DESCRIPTION:
{job_description}

Tasks:
1. Provide a "match score" (0-100) comparing the resume to the JD.
2. Provide a "summary" which is a professional executive summary of the match/alignment.
3. Provide a "candidateProfile" which is a 2-3 sentence summary of the candidate's professional background and key strengths based ONLY on their resume.
4. Extract key statistics (e.g., years of experience, number of matching skills).
5. Provide 3-5 actionable trends or data points for visualization.
6. List specific suggestions to improve the resume for this specific job."#;

/// Plain resume-review instruction. No score or trends are expected back.
pub const PLAIN_PROMPT: &str = r#"Analyze the attached Resume PDF.
1. Provide a "candidateProfile" which is a professional summary of the candidate's skills and background.
2. Provide a "summary" describing the overall quality of the resume.
3. Extract key statistics (skills found, education level, etc.).
4. Provide general career suggestions."#;

/// Renders the mode-specific instruction block. In `job_match` mode the job
/// description is embedded verbatim.
pub fn instruction_for(mode: Mode, job_description: Option<&str>) -> String {
    match mode {
        Mode::JobMatch => JOB_MATCH_PROMPT_TEMPLATE
            .replace("{job_description}", job_description.unwrap_or_default()),
        Mode::Plain => PLAIN_PROMPT.to_string(),
    }
}
