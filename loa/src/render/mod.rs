//! Line classification for layout rendering
//!
//! The text-generation service returns plain prose with no markup, so the
//! letter's visual structure is recovered here with ordered pattern
//! predicates over individual lines. Classification is total (every line maps
//! to exactly one role) and pure: no cross-line lookahead, no state.
//!
//! The precedence is deliberately a flat first-match-wins list so new rules
//! slot in without touching a parser. Pathological text degrades to
//! all-[`LineRole::Body`], which is expected rather than an error.

use serde::Serialize;
use tracing::debug;

/// Salutation prefixes, matched case-insensitively
const SALUTATIONS: [&str; 4] = ["dear ", "to whom", "sir", "madam"];

/// Closing prefixes, matched case-insensitively
const CLOSINGS: [&str; 4] = ["yours ", "sincerely", "faithfully", "regards"];

/// Section headers must end with a colon and stay under this many characters
const SECTION_HEADER_MAX_CHARS: usize = 50;

/// Presentational role of one letter line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineRole {
    /// Empty line, kept as vertical spacing
    Blank,
    /// Date or reference line, rendered right-aligned and emphasized
    ReferenceOrDate,
    /// Greeting line ("Dear Sir," etc.)
    Salutation,
    /// Subject line, emphasized
    Subject,
    /// Sign-off line ("Yours sincerely," etc.)
    Closing,
    /// Short trailing-colon heading, emphasized
    SectionHeader,
    /// Everything else
    Body,
}

/// A line of letter text tagged with its presentational role
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedBlock {
    pub text: String,
    pub role: LineRole,
}

/// Classify a single trimmed line
///
/// First match wins, in this order: blank, reference/date, salutation,
/// subject, closing, section header, body. `Date:` is matched
/// case-sensitively (the conventional letter form), `Ref:`/`Reference:`
/// case-insensitively.
pub fn classify_line(line: &str) -> LineRole {
    if line.is_empty() {
        return LineRole::Blank;
    }

    let lower = line.to_lowercase();

    if line.starts_with("Date:") || lower.starts_with("ref:") || lower.starts_with("reference:") {
        return LineRole::ReferenceOrDate;
    }

    if SALUTATIONS.iter().any(|prefix| lower.starts_with(prefix)) {
        return LineRole::Salutation;
    }

    if lower.starts_with("subject:") {
        return LineRole::Subject;
    }

    if CLOSINGS.iter().any(|prefix| lower.starts_with(prefix)) {
        return LineRole::Closing;
    }

    if line.ends_with(':') && line.chars().count() < SECTION_HEADER_MAX_CHARS {
        return LineRole::SectionHeader;
    }

    LineRole::Body
}

/// Convert raw letter text into an ordered sequence of classified blocks
///
/// Lines are split on explicit line breaks and trimmed before
/// classification. Never fails; empty input yields a single blank block.
pub fn render(letter_text: &str) -> Vec<ClassifiedBlock> {
    debug!(text_len = letter_text.len(), "render: called");
    letter_text
        .trim()
        .split('\n')
        .map(|line| {
            let line = line.trim();
            ClassifiedBlock {
                text: line.to_string(),
                role: classify_line(line),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(text: &str) -> Vec<LineRole> {
        render(text).iter().map(|b| b.role).collect()
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(classify_line(""), LineRole::Blank);
    }

    #[test]
    fn test_reference_and_date_lines() {
        assert_eq!(classify_line("Date: 01.01.2025"), LineRole::ReferenceOrDate);
        assert_eq!(classify_line("Ref: LOA/2024/001"), LineRole::ReferenceOrDate);
        assert_eq!(classify_line("REF: LOA/2024/001"), LineRole::ReferenceOrDate);
        assert_eq!(classify_line("Reference: LOA/2024/001"), LineRole::ReferenceOrDate);
        assert_eq!(classify_line("reference: LOA/2024/001"), LineRole::ReferenceOrDate);
    }

    #[test]
    fn test_date_prefix_is_case_sensitive() {
        // Lowercase "date:" is not the conventional letter form; it falls
        // through to the later rules (here: a short trailing-colon header)
        assert_eq!(classify_line("date:"), LineRole::SectionHeader);
        assert_eq!(classify_line("date: 01.01.2025"), LineRole::Body);
    }

    #[test]
    fn test_salutations() {
        assert_eq!(classify_line("Dear Sir,"), LineRole::Salutation);
        assert_eq!(classify_line("dear Madam,"), LineRole::Salutation);
        assert_eq!(classify_line("To Whom It May Concern"), LineRole::Salutation);
        assert_eq!(classify_line("Sir,"), LineRole::Salutation);
        assert_eq!(classify_line("Madam,"), LineRole::Salutation);
    }

    #[test]
    fn test_subject_beats_section_header() {
        // "Subject: Renewal" also looks like a short trailing-text line, but
        // rule ordering must classify it as a subject
        assert_eq!(classify_line("Subject: Renewal"), LineRole::Subject);
        assert_eq!(classify_line("SUBJECT: Renewal of Authorization"), LineRole::Subject);
        assert_eq!(classify_line("Subject:"), LineRole::Subject);
    }

    #[test]
    fn test_closings() {
        assert_eq!(classify_line("Yours sincerely,"), LineRole::Closing);
        assert_eq!(classify_line("Sincerely,"), LineRole::Closing);
        assert_eq!(classify_line("Faithfully yours,"), LineRole::Closing);
        assert_eq!(classify_line("Regards,"), LineRole::Closing);
    }

    #[test]
    fn test_section_headers() {
        assert_eq!(classify_line("Terms:"), LineRole::SectionHeader);
        assert_eq!(classify_line("Payment Details:"), LineRole::SectionHeader);

        // A long trailing-colon line stays body
        let long = format!("{}:", "x".repeat(60));
        assert_eq!(classify_line(&long), LineRole::Body);
    }

    #[test]
    fn test_body_fallback() {
        assert_eq!(classify_line("This letter authorizes installation."), LineRole::Body);
        assert_eq!(classify_line("J. Doe"), LineRole::Body);
    }

    #[test]
    fn test_plain_prose_renders_all_body() {
        let text = "First paragraph of plain prose.\nAnother plain line.\nAnd a third one.";
        assert_eq!(roles(text), vec![LineRole::Body, LineRole::Body, LineRole::Body]);
    }

    #[test]
    fn test_empty_input_yields_single_blank_block() {
        let blocks = render("");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].role, LineRole::Blank);

        let blocks = render("   \n  ");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].role, LineRole::Blank);
    }

    #[test]
    fn test_lines_are_trimmed() {
        let blocks = render("   Dear Sir,   \n\n  Terms:  ");
        assert_eq!(blocks[0].text, "Dear Sir,");
        assert_eq!(blocks[0].role, LineRole::Salutation);
        assert_eq!(blocks[1].role, LineRole::Blank);
        assert_eq!(blocks[2].text, "Terms:");
        assert_eq!(blocks[2].role, LineRole::SectionHeader);
    }

    #[test]
    fn test_full_letter_classification() {
        let letter = "Date: 01.01.2025\n\
                      \n\
                      Dear Sir,\n\
                      Subject: Authorization for Hoarding\n\
                      Terms:\n\
                      This letter authorizes installation.\n\
                      \n\
                      Yours sincerely,\n\
                      J. Doe";

        assert_eq!(
            roles(letter),
            vec![
                LineRole::ReferenceOrDate,
                LineRole::Blank,
                LineRole::Salutation,
                LineRole::Subject,
                LineRole::SectionHeader,
                LineRole::Body,
                LineRole::Blank,
                LineRole::Closing,
                LineRole::Body,
            ]
        );
    }

    #[test]
    fn test_blocks_preserve_order_and_text() {
        let blocks = render("Dear Sir,\nThis letter authorizes installation.");
        assert_eq!(blocks[0].text, "Dear Sir,");
        assert_eq!(blocks[1].text, "This letter authorizes installation.");
    }
}
