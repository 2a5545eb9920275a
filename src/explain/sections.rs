//! Splits a free-form completion into the four answer sections.
//!
//! Headers are located in order: each one is searched for only after the
//! previous section's header, so a stray "Example:" inside the explanation
//! never becomes the example section. A section's text runs up to the next
//! located header (or end of text). Headers are matched case-insensitively
//! and markdown decoration around them (`**`, `__`, `#`) is optional.

use std::sync::LazyLock;

use regex::{Match, Regex};

use super::types::ExplanationSections;

/// Sections in the order the model is asked to emit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Explanation,
    Steps,
    Example,
    Summary,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Explanation,
        Section::Steps,
        Section::Example,
        Section::Summary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Explanation => "EXPLANATION",
            Section::Steps => "STEPS",
            Section::Example => "EXAMPLE",
            Section::Summary => "SUMMARY",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// First header for this section at or after `from`. A header opening a
    /// line wins over a bold one in the middle of a line.
    fn find_header<'c>(self, content: &'c str, from: usize) -> Option<Match<'c>> {
        let (line, inline) = &HEADERS[self.index()];
        line.find_at(content, from)
            .or_else(|| inline.find_at(content, from))
    }
}

/// Header opening a line: `STEPS:`, `## Steps:`, `**STEPS:**`, `**Steps**:`.
fn line_header_pattern(label: &str) -> String {
    format!(
        r"(?im)^[ \t]*(?:#{{1,6}}[ \t]*)?(?:(?:\*\*|__)[ \t]*)?{label}[ \t]*(?:(?:\*\*|__)[ \t]*)?:(?:[ \t]*(?:\*\*|__))?"
    )
}

/// Bold header anywhere in a line: `... **STEPS:** ...`.
fn inline_header_pattern(label: &str) -> String {
    format!(
        r"(?i)(?:\*\*|__)[ \t]*{label}[ \t]*(?::[ \t]*(?:\*\*|__)|(?:\*\*|__)[ \t]*:)"
    )
}

static HEADERS: LazyLock<Vec<(Regex, Regex)>> = LazyLock::new(|| {
    Section::ALL
        .iter()
        .map(|s| {
            (
                Regex::new(&line_header_pattern(s.label())).unwrap(),
                Regex::new(&inline_header_pattern(s.label())).unwrap(),
            )
        })
        .collect()
});

/// `(start, end)` of each section's header, located in section order.
/// A section whose header is missing does not move the search position.
fn locate_headers(content: &str) -> [Option<(usize, usize)>; 4] {
    let mut cursor = 0;
    Section::ALL.map(|section| {
        let header = section.find_header(content, cursor)?;
        cursor = header.end();
        Some((header.start(), header.end()))
    })
}

fn section_text(content: &str, headers: &[Option<(usize, usize)>; 4], section: Section) -> String {
    let Some((_, start)) = headers[section.index()] else {
        return String::new();
    };
    let end = headers[section.index() + 1..]
        .iter()
        .flatten()
        .map(|&(next_start, _)| next_start)
        .next()
        .unwrap_or(content.len());

    content[start..end].trim().to_string()
}

/// Text belonging to `section`, trimmed. Empty when its header is absent.
pub fn extract_section(content: &str, section: Section) -> String {
    section_text(content, &locate_headers(content), section)
}

/// Parse a completion into sections. Never fails: when neither the
/// explanation nor the steps could be found, the whole completion becomes
/// the explanation and the other fields stay empty.
pub fn parse_sections(content: &str) -> ExplanationSections {
    let headers = locate_headers(content);
    let explanation = section_text(content, &headers, Section::Explanation);
    let steps = section_text(content, &headers, Section::Steps);

    if explanation.is_empty() && steps.is_empty() {
        return ExplanationSections {
            explanation: content.to_string(),
            ..Default::default()
        };
    }

    ExplanationSections {
        explanation,
        steps,
        example: section_text(content, &headers, Section::Example),
        summary: section_text(content, &headers, Section::Summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        let input = "**EXPLANATION:**A\n\n**STEPS:**B\n\n**EXAMPLE:**C\n\n**SUMMARY:**D";
        let sections = parse_sections(input);
        assert_eq!(
            sections,
            ExplanationSections {
                explanation: "A".into(),
                steps: "B".into(),
                example: "C".into(),
                summary: "D".into(),
            }
        );
    }

    #[test]
    fn test_parse_no_markers_falls_back() {
        let input = "The area of a circle is pi times the radius squared.";
        let sections = parse_sections(input);
        assert_eq!(sections.explanation, input);
        assert_eq!(sections.steps, "");
        assert_eq!(sections.example, "");
        assert_eq!(sections.summary, "");
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_sections(""), ExplanationSections::default());
    }

    #[test]
    fn test_missing_middle_sections_do_not_leak() {
        let input = "**EXPLANATION:**\nGravity pulls things down.\n\n**SUMMARY:**\nThings fall.";
        let sections = parse_sections(input);
        assert_eq!(sections.explanation, "Gravity pulls things down.");
        assert_eq!(sections.steps, "");
        assert_eq!(sections.example, "");
        assert_eq!(sections.summary, "Things fall.");
    }

    #[test]
    fn test_case_insensitive_and_undecorated() {
        let input = "Explanation:\nfirst\n\nsteps:\n1. a\n2. b\n\nExample:\nx = 2\n\nSummary:\ndone";
        let sections = parse_sections(input);
        assert_eq!(sections.explanation, "first");
        assert_eq!(sections.steps, "1. a\n2. b");
        assert_eq!(sections.example, "x = 2");
        assert_eq!(sections.summary, "done");
    }

    #[test]
    fn test_heading_and_colon_outside_bold() {
        let input = "## Explanation:\none\n\n**Steps**:\ntwo\n\n### **EXAMPLE:**\nthree\n\n**Summary:**\nfour";
        let sections = parse_sections(input);
        assert_eq!(sections.explanation, "one");
        assert_eq!(sections.steps, "two");
        assert_eq!(sections.example, "three");
        assert_eq!(sections.summary, "four");
    }

    #[test]
    fn test_inline_words_are_not_headers() {
        let input = "**EXPLANATION:**\nA circle, for example: a coin.\n\n**STEPS:**\n1. Measure the radius";
        let sections = parse_sections(input);
        assert_eq!(sections.explanation, "A circle, for example: a coin.");
        assert_eq!(sections.steps, "1. Measure the radius");
        assert_eq!(sections.example, "");
    }

    #[test]
    fn test_trailing_content_goes_to_summary() {
        let input = "**EXPLANATION:** a\n**STEPS:** b\n**EXAMPLE:** c\n**SUMMARY:** d\n\n\nLet me know if you have questions!\n";
        let sections = parse_sections(input);
        assert_eq!(sections.summary, "d\n\n\nLet me know if you have questions!");
    }

    #[test]
    fn test_preamble_before_first_header_is_dropped() {
        let input = "Sure! Here you go.\n\n**EXPLANATION:**\nbody\n\n**STEPS:**\n1. go";
        let sections = parse_sections(input);
        assert_eq!(sections.explanation, "body");
        assert_eq!(sections.steps, "1. go");
    }

    #[test]
    fn test_only_example_and_summary_falls_back() {
        // Fallback keys on explanation and steps only.
        let input = "**EXAMPLE:**\n2 + 2 = 4\n\n**SUMMARY:**\nAddition.";
        let sections = parse_sections(input);
        assert_eq!(sections.explanation, input);
        assert_eq!(sections.example, "");
        assert_eq!(sections.summary, "");
    }

    #[test]
    fn test_steps_without_explanation() {
        let input = "**STEPS:**\n1. one\n\n**SUMMARY:**\nok";
        let sections = parse_sections(input);
        assert_eq!(sections.explanation, "");
        assert_eq!(sections.steps, "1. one");
        assert_eq!(sections.summary, "ok");
    }

    #[test]
    fn test_example_line_inside_explanation_stays_there() {
        let input = "**EXPLANATION:**\nArea is pi r^2.\nExample: a coin.\n\n**STEPS:**\n1. Square r.\n\n**EXAMPLE:**\nr = 2 gives 4 pi.\n\n**SUMMARY:**\nDone.";
        let sections = parse_sections(input);
        assert_eq!(sections.explanation, "Area is pi r^2.\nExample: a coin.");
        assert_eq!(sections.steps, "1. Square r.");
        assert_eq!(sections.example, "r = 2 gives 4 pi.");
        assert_eq!(sections.summary, "Done.");
    }

    #[test]
    fn test_inline_bold_example_inside_steps_stays_there() {
        let input = "**EXPLANATION:**\nArea is pi r^2.\n\n**STEPS:**\n1. Square r. **Example:** r=1\n2. Multiply.\n\n**EXAMPLE:**\nr = 2 gives 4 pi.\n\n**SUMMARY:**\nDone.";
        let sections = parse_sections(input);
        assert_eq!(sections.explanation, "Area is pi r^2.");
        assert_eq!(sections.steps, "1. Square r. **Example:** r=1\n2. Multiply.");
        assert_eq!(sections.example, "r = 2 gives 4 pi.");
        assert_eq!(sections.summary, "Done.");
    }

    #[test]
    fn test_headers_inline_on_one_line() {
        let input = "Sure! **EXPLANATION:** body **STEPS:** go **SUMMARY:** end";
        let sections = parse_sections(input);
        assert_eq!(sections.explanation, "body");
        assert_eq!(sections.steps, "go");
        assert_eq!(sections.example, "");
        assert_eq!(sections.summary, "end");
    }

    #[test]
    fn test_out_of_order_header_is_ignored() {
        let input = "**SUMMARY:** early\n**EXPLANATION:** a\n**STEPS:** b";
        let sections = parse_sections(input);
        assert_eq!(sections.explanation, "a");
        assert_eq!(sections.steps, "b");
        assert_eq!(sections.summary, "");
    }

    #[test]
    fn test_extract_single_section() {
        let input = "**EXPLANATION:** x\n**EXAMPLE:** y";
        assert_eq!(extract_section(input, Section::Explanation), "x");
        assert_eq!(extract_section(input, Section::Steps), "");
        assert_eq!(extract_section(input, Section::Example), "y");
    }
}
