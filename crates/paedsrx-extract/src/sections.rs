//! Heading-anchored capture of free-text note sections.

use std::sync::LazyLock;

use paedsrx_core::models::patient::NoteSections;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    PresentingComplaint,
    History,
    Examination,
    Assessment,
    Plan,
}

impl Section {
    fn assign(self, sections: &mut NoteSections, text: String) {
        let slot = match self {
            Section::PresentingComplaint => &mut sections.presenting_complaint,
            Section::History => &mut sections.history,
            Section::Examination => &mut sections.examination,
            Section::Assessment => &mut sections.assessment,
            Section::Plan => &mut sections.plan,
        };
        *slot = Some(text);
    }
}

/// Heading variants per section, tried in order. A variant that is a
/// prefix of another comes after it.
const HEADINGS: &[(Section, &[&str])] = &[
    (
        Section::PresentingComplaint,
        &[r"presenting[ \t]+complaint", r"chief[ \t]+complaint", r"cc"],
    ),
    (
        Section::History,
        &[r"history[ \t]+of[ \t]+present[ \t]+illness", r"history", r"hpi"],
    ),
    (
        Section::Examination,
        &[r"examination", r"physical[ \t]+exam(?:ination)?", r"pe"],
    ),
    (
        Section::Assessment,
        &[r"assessment", r"diagnosis", r"impression"],
    ),
    (Section::Plan, &[r"plan", r"treatment", r"management"]),
];

/// A heading is a whole word at the start of a line, with or without a
/// trailing colon. Body text may follow on the same line.
fn heading_pattern(variants: &str) -> String {
    format!(r"(?im)^[ \t]*(?:{variants})\b[ \t]*:?")
}

static SECTION_HEADINGS: LazyLock<Vec<(Section, Vec<Regex>)>> = LazyLock::new(|| {
    HEADINGS
        .iter()
        .map(|(section, variants)| {
            let regexes = variants
                .iter()
                .map(|v| Regex::new(&heading_pattern(v)).unwrap())
                .collect();
            (*section, regexes)
        })
        .collect()
});

static ANY_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    let all = HEADINGS
        .iter()
        .flat_map(|(_, variants)| variants.iter().copied())
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&heading_pattern(&all)).unwrap()
});

/// An empty line, including one that opens the body.
static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\n)[ \t]*\n").unwrap());

/// Capture every recognised section of `text`. Sections without a heading,
/// or whose heading is followed by nothing, stay absent.
pub fn capture(text: &str) -> NoteSections {
    let mut sections = NoteSections::default();
    for (section, variants) in SECTION_HEADINGS.iter() {
        let body = variants.iter().find_map(|heading| {
            heading
                .find_iter(text)
                .find_map(|m| capture_after(text, m.end()))
        });
        if let Some(body) = body {
            section.assign(&mut sections, body);
        }
    }
    sections
}

fn capture_after(text: &str, start: usize) -> Option<String> {
    let rest = text[start..].trim_start_matches([' ', '\t']);
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    let mut end = rest.len();
    if let Some(m) = BLANK_LINE.find(rest) {
        end = end.min(m.start());
    }
    if let Some(m) = ANY_HEADING.find(rest) {
        end = end.min(m.start());
    }
    let captured = rest[..end].trim();
    (!captured.is_empty()).then(|| captured.to_string())
}
