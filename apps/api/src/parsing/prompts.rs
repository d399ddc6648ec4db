// Résumé parsing prompt templates.

pub const RESUME_PARSE_SYSTEM: &str = "\
You are an expert resume parser. \
Extract information exactly as written in the resume; never invent details. \
Leave a field null (or a list empty) when the resume does not mention it.";

pub const RESUME_PARSE_PROMPT: &str = r#"You are an expert resume parser. Extract all information from the resume text.

Extract: Name, Email, Phone, Location, LinkedIn, GitHub, Portfolio, professional summary, work experience, projects, education, skills, and certifications.

{format_instructions}

Resume Text:
{resume_text}

Output:"#;

/// Fills the template. `format_instructions` is substituted first so résumé text
/// that happens to contain a placeholder is never expanded.
pub fn render_resume_prompt(format_instructions: &str, resume_text: &str) -> String {
    let (head, tail) = RESUME_PARSE_PROMPT
        .split_once("{resume_text}")
        .unwrap_or((RESUME_PARSE_PROMPT, ""));
    let head = head.replace("{format_instructions}", format_instructions);
    format!("{head}{resume_text}{tail}")
}
