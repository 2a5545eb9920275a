use super::types::{DetailLevel, PromptPair, Subject};

pub const TEACHER_ROLE: &str =
    "You are a friendly, knowledgeable teacher helping students understand concepts clearly.";

/// Response layout the model is asked to follow. The section parser anchors
/// on these headers.
pub const RESPONSE_FORMAT: &str = r#"Your response MUST be structured in exactly four sections with these exact headers:

**EXPLANATION:**
(Provide a clear conceptual explanation of the topic)

**STEPS:**
(Break down the solution into numbered steps)

**EXAMPLE:**
(Show at least one fully solved example with calculations)

**SUMMARY:**
(Provide a 2-3 sentence recap of the key points)

Use simple, student-friendly language. Make it engaging and easy to understand."#;

fn subject_clause(subject: &Subject) -> String {
    match subject {
        Subject::General => "You are teaching across various subjects.".to_string(),
        other => format!("You are teaching {}.", other.as_str()),
    }
}

fn detail_clause(level: DetailLevel) -> &'static str {
    match level {
        DetailLevel::Concise => "Keep your explanation brief and to the point.",
        DetailLevel::Detailed => "Provide a detailed explanation with clear steps and examples.",
        DetailLevel::VeryDetailed => {
            "Provide a comprehensive, teacher-level explanation with multiple examples and detailed reasoning."
        }
        DetailLevel::Unspecified => "",
    }
}

pub fn build_system_prompt(subject: &Subject, level: DetailLevel) -> String {
    format!(
        "{} {} {}\n\n{}",
        TEACHER_ROLE,
        subject_clause(subject),
        detail_clause(level),
        RESPONSE_FORMAT
    )
}

pub fn build_user_prompt(question: &str) -> String {
    format!("Please explain this question: {}", question)
}

pub fn build_prompts(question: &str, subject: &Subject, level: DetailLevel) -> PromptPair {
    PromptPair {
        system: build_system_prompt(subject, level),
        user: build_user_prompt(question),
    }
}
