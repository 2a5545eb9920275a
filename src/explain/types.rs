use std::fmt;

use serde::{Deserialize, Serialize};

/// Inbound payload for `POST /explain-question`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationRequest {
    /// Free-text question. Required; validated after trimming.
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub subject: Subject,
    #[serde(default)]
    pub detail_level: DetailLevel,
}

/// Subject the question belongs to. Unknown values are kept verbatim and
/// flow into the prompt as free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<String>")]
pub enum Subject {
    #[default]
    General,
    Mathematics,
    Physics,
    Chemistry,
    Biology,
    ComputerScience,
    English,
    Other(String),
}

impl Subject {
    pub fn as_str(&self) -> &str {
        match self {
            Subject::General => "general",
            Subject::Mathematics => "mathematics",
            Subject::Physics => "physics",
            Subject::Chemistry => "chemistry",
            Subject::Biology => "biology",
            Subject::ComputerScience => "computer-science",
            Subject::English => "english",
            Subject::Other(s) => s,
        }
    }
}

impl From<Option<String>> for Subject {
    fn from(value: Option<String>) -> Self {
        let Some(value) = value else {
            return Subject::General;
        };
        match value.as_str() {
            "" | "general" => Subject::General,
            "mathematics" => Subject::Mathematics,
            "physics" => Subject::Physics,
            "chemistry" => Subject::Chemistry,
            "biology" => Subject::Biology,
            "computer-science" => Subject::ComputerScience,
            "english" => Subject::English,
            _ => Subject::Other(value),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much depth the answer should go into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<String>")]
pub enum DetailLevel {
    Concise,
    #[default]
    Detailed,
    VeryDetailed,
    /// Sent but not one of the known levels; no detail clause is added.
    Unspecified,
}

impl DetailLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Concise => "concise",
            DetailLevel::Detailed => "detailed",
            DetailLevel::VeryDetailed => "very-detailed",
            DetailLevel::Unspecified => "unspecified",
        }
    }
}

impl From<Option<String>> for DetailLevel {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            None => DetailLevel::Detailed,
            Some("concise") => DetailLevel::Concise,
            Some("detailed") => DetailLevel::Detailed,
            Some("very-detailed") => DetailLevel::VeryDetailed,
            Some(_) => DetailLevel::Unspecified,
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four sections extracted from a model completion. Every field is
/// always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationSections {
    pub explanation: String,
    pub steps: String,
    pub example: String,
    pub summary: String,
}

/// Plain-text export, same layout the copy/download buttons produce.
impl fmt::Display for ExplanationSections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EXPLANATION:\n{}\n\nSTEPS:\n{}\n\nEXAMPLE:\n{}\n\nSUMMARY:\n{}",
            self.explanation, self.steps, self.example, self.summary
        )
    }
}

/// System/user messages built for a single model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}
