//! Letter Generator: turns a candidate record and a job description into a
//! cover letter via one text-generation call.
//!
//! Any fault from the provider ends the attempt; there is no retry. The caller
//! decides whether to try again.

use tracing::{info, warn};

use crate::letter::prompts::{COVER_LETTER_PROMPT_TEMPLATE, NOT_SPECIFIED};
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::candidate::CandidateRecord;

/// Builds the cover-letter prompt for `record` applying to `job_description`.
pub fn build_cover_letter_prompt(record: &CandidateRecord, job_description: &str) -> String {
    let experience = record
        .experience
        .iter()
        .map(|e| {
            format!(
                "- {} at {} ({}): {}",
                e.title, e.company, e.duration, e.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let projects = record
        .projects
        .iter()
        .map(|p| format!("- {} ({}): {}", p.title, p.duration, p.description))
        .collect::<Vec<_>>()
        .join("\n");

    let education = record
        .education
        .iter()
        .map(|e| format!("{} from {}", e.degree, e.institution))
        .collect::<Vec<_>>()
        .join(", ");

    let skills = record.skills_line();
    fill_template(COVER_LETTER_PROMPT_TEMPLATE, |placeholder| {
        Some(match placeholder {
            "name" => record.name.as_str(),
            "email" => record.email.as_str(),
            "phone" => record.phone.as_str(),
            "current_role" => or_not_specified(&record.current_role),
            "years_of_experience" => or_not_specified(&record.years_of_experience),
            "skills" => or_not_specified(&skills),
            "experience" => or_not_specified(&experience),
            "projects" => or_not_specified(&projects),
            "education" => or_not_specified(&education),
            "job_description" => job_description,
            _ => return None,
        })
    })
}

/// Sends the prompt and returns the generated letter text.
pub async fn generate_cover_letter(
    generator: &dyn TextGenerator,
    record: &CandidateRecord,
    job_description: &str,
) -> Result<String, LlmError> {
    let prompt = build_cover_letter_prompt(record, job_description);
    info!(
        "Requesting cover letter for '{}' (prompt {} chars)",
        record.name,
        prompt.len()
    );

    let letter = generator
        .generate(&prompt)
        .await
        .inspect_err(|e| warn!("Cover letter generation failed: {e}"))?;

    if letter.trim().is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(letter)
}

/// Substitutes `{placeholder}`s in one pass over `template`. Inserted values are never
/// scanned again, so braces typed by the candidate survive verbatim. Unknown
/// placeholders are kept as they are.
fn fill_template<'a, F>(template: &str, value_of: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}').and_then(|close| Some((close, value_of(&after[..close])?))) {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    out
}

fn or_not_specified(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}
