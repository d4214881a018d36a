use std::fmt::Write;

use super::types::ScoringInput;

/// System instruction sent with every scoring request.
pub const SYSTEM_PROMPT: &str =
    "You are a technical recruiter. Always answer with a single valid JSON object and nothing else.";

const NOT_SPECIFIED: &str = "not specified";

/// Renders the user prompt for a scoring request.
///
/// The offer description is cut to `description_budget` characters.
pub fn render_match_prompt(input: &ScoringInput, description_budget: usize) -> String {
    let mut prompt = String::with_capacity(1024 + description_budget);

    prompt.push_str("Assess how well the candidate fits the job offer.\n\n");

    prompt.push_str("CANDIDATE:\n");
    let _ = writeln!(prompt, "Name: {}", input.subject_name);
    let _ = writeln!(prompt, "Skills: {}", join_or_unspecified(&input.subject_skills));
    let _ = writeln!(
        prompt,
        "Technologies: {}",
        join_or_unspecified(&input.subject_technologies)
    );
    let _ = writeln!(
        prompt,
        "Experience: {}",
        input
            .subject_experience
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(NOT_SPECIFIED)
    );

    prompt.push_str("\nJOB OFFER:\n");
    let _ = writeln!(prompt, "Title: {}", input.offer_title);
    let _ = writeln!(prompt, "Company: {}", input.offer_company);
    let _ = writeln!(
        prompt,
        "Description: {}",
        truncate_chars(&input.offer_description, description_budget)
    );
    let _ = writeln!(
        prompt,
        "Required skills: {}",
        join_or_unspecified(&input.offer_required_skills)
    );
    let _ = writeln!(
        prompt,
        "Required technologies: {}",
        join_or_unspecified(&input.offer_required_technologies)
    );
    let _ = writeln!(
        prompt,
        "Years of experience required: {}",
        input.offer_experience_years
    );

    prompt.push_str(
        r#"
Reply with ONLY valid JSON in exactly this shape:
{
  "match_percent": 75,
  "strong_skills": ["Python", "FastAPI"],
  "missing_skills": ["Docker", "Kubernetes"],
  "explanation": "Two or three sentences explaining the score"
}

match_percent must be an integer from 0 to 100."#,
    );

    prompt
}

fn join_or_unspecified(items: &[String]) -> String {
    if items.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        items.join(", ")
    }
}

/// Returns at most `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
