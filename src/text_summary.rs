//! Text summary builder for CLI output.
//!
//! Formats an analysis result as human-readable sections for text mode and the TUI.
//! Backend strings are passed through [`terminal_safe`] so they cannot emit escape
//! sequences or rewrite earlier lines.

use crate::model::{AnalysisResult, SwotCategory};

/// One titled output region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Section {
    pub title: String,
    pub items: Vec<String>,
}

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Replace control characters (ESC, CR, BEL, ...) with U+FFFD.
/// Newlines and tabs collapse to a single space so one item stays on one line.
pub(crate) fn terminal_safe(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\n' | '\t' => ' ',
            c if c.is_control() => '\u{FFFD}',
            c => c,
        })
        .collect()
}

fn plain(items: &[String]) -> Vec<String> {
    items.iter().map(|s| terminal_safe(s)).collect()
}

/// Build the ordered output regions for `result`.
pub(crate) fn build_sections(result: &AnalysisResult) -> Vec<Section> {
    let mut sections = vec![
        Section {
            title: "Discovered Links".into(),
            items: plain(&result.discovered_links),
        },
        Section {
            title: "Contacts".into(),
            items: plain(result.contacts()),
        },
        Section {
            title: "Leadership".into(),
            items: result
                .leadership
                .iter()
                .map(|entry| terminal_safe(&entry.flattened()))
                .collect(),
        },
        Section {
            title: "Technology Stack".into(),
            items: plain(result.tech_stack()),
        },
    ];
    for category in SwotCategory::ALL {
        sections.push(Section {
            title: format!("SWOT - {}", category.title()),
            items: plain(result.swot.items(category)),
        });
    }
    sections
}

/// Build a text summary of all regions.
pub(crate) fn build_text_summary(result: &AnalysisResult) -> TextSummary {
    let mut lines = Vec::new();
    if let Some(url) = result.url.as_deref() {
        lines.push(format!("Analysis Results for {}", terminal_safe(url)));
        lines.push(String::new());
    }
    for section in build_sections(result) {
        lines.push(format!("{}:", section.title));
        if section.items.is_empty() {
            lines.push("  (none)".into());
        }
        for item in section.items {
            lines.push(format!("  - {item}"));
        }
        lines.push(String::new());
    }
    TextSummary { lines }
}
