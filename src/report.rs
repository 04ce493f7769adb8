//! Standalone HTML report.
//!
//! Every backend string is untrusted: visible text goes through [`escape_html`], link
//! targets through [`safe_href`]. Each list field becomes one `<ul id=...>` region with one
//! `<li>` per element, in input order.

use crate::model::{AnalysisResult, LeadershipEntry, SwotCategory};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

/// Escape text for use in element content or a quoted attribute value.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Validate a link target and return it attribute-escaped.
///
/// Only absolute `http`/`https` URLs are accepted, so `javascript:` and `data:` targets
/// never reach an `href`.
pub fn safe_href(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let parsed = url::Url::parse(trimmed).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(escape_html(trimmed)),
        _ => None,
    }
}

fn anchor(href: &str, label: &str) -> String {
    format!(
        r#"<a href="{href}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        escape_html(label)
    )
}

fn render_link_item(link: &str) -> String {
    match safe_href(link) {
        Some(href) => anchor(&href, link),
        None => escape_html(link),
    }
}

fn render_leadership_item(entry: &LeadershipEntry) -> String {
    let mut item = escape_html(entry.label());
    if let Some(href) = entry.linkedin().and_then(safe_href) {
        item.push_str(" - ");
        item.push_str(&anchor(&href, "LinkedIn"));
    }
    item
}

/// Render one list region. `items` are already-escaped HTML fragments.
fn render_list<I>(id: &str, items: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = format!("<ul id=\"{id}\">");
    for item in items {
        let _ = write!(out, "<li>{item}</li>");
    }
    out.push_str("</ul>");
    out
}

pub fn render_links(links: &[String]) -> String {
    render_list("links", links.iter().map(|l| render_link_item(l)))
}

pub fn render_text_list(id: &str, items: &[String]) -> String {
    render_list(id, items.iter().map(|s| escape_html(s)))
}

pub fn render_leadership(entries: &[LeadershipEntry]) -> String {
    render_list("leadership", entries.iter().map(render_leadership_item))
}

/// Render the results container (all output regions) as an HTML fragment.
pub fn render_results(result: &AnalysisResult) -> String {
    let mut out = String::from("<div id=\"results\">\n");
    match result.url.as_deref() {
        Some(url) => {
            let _ = writeln!(out, "<h2>Analysis Results for {}</h2>", escape_html(url));
        }
        None => out.push_str("<h2>Analysis Results</h2>\n"),
    }
    let _ = writeln!(
        out,
        "<section><h3>Discovered Links</h3>{}</section>",
        render_links(&result.discovered_links)
    );
    let _ = writeln!(
        out,
        "<section><h3>Contacts</h3>{}</section>",
        render_text_list("contacts", result.contacts())
    );
    let _ = writeln!(
        out,
        "<section><h3>Leadership</h3>{}</section>",
        render_leadership(&result.leadership)
    );
    let _ = writeln!(
        out,
        "<section><h3>Technology Stack</h3>{}</section>",
        render_text_list("tech-stack", result.tech_stack())
    );
    out.push_str("<section class=\"swot\"><h3>SWOT Analysis</h3>\n");
    for category in SwotCategory::ALL {
        let _ = writeln!(
            out,
            "<div><h4>{}</h4>{}</div>",
            category.title(),
            render_text_list(category.region_id(), result.swot.items(category))
        );
    }
    out.push_str("</section>\n</div>\n");
    out
}

/// Render a complete standalone HTML page.
pub fn render_report(result: &AnalysisResult, generated_at: &str) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Company Analysis</title>\n</head>\n<body>\n",
    );
    out.push_str(&render_results(result));
    let _ = writeln!(
        out,
        "<footer>Generated {}</footer>",
        escape_html(generated_at)
    );
    out.push_str("</body>\n</html>\n");
    out
}

/// Write the HTML report to `path`.
pub fn write_report(path: &Path, result: &AnalysisResult) -> Result<()> {
    let generated_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "now".into());
    let html = render_report(result, &generated_at);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).context("create report directory")?;
        }
    }
    std::fs::write(path, html).with_context(|| format!("write report {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Swot;

    #[test]
    fn markup_in_list_items_is_rendered_as_text() {
        let html = render_text_list(
            "tech-stack",
            &["<img src=x onerror=alert(1)>".to_string()],
        );
        assert_eq!(
            html,
            "<ul id=\"tech-stack\"><li>&lt;img src=x onerror=alert(1)&gt;</li></ul>"
        );
        assert!(!html.contains("<img"));
    }

    #[test]
    fn script_in_swot_is_escaped() {
        let result = AnalysisResult {
            swot: Swot {
                threats: vec!["<script>alert('x')</script>".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let html = render_results(&result);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"));
    }

    #[test]
    fn links_open_in_new_context_and_keep_order() {
        let html = render_links(&[
            "https://b.example/".to_string(),
            "https://a.example/".to_string(),
            "https://b.example/".to_string(),
        ]);
        assert_eq!(html.matches("target=\"_blank\"").count(), 3);
        let b = html.find("b.example").unwrap();
        let a = html.find("a.example").unwrap();
        assert!(b < a);
    }

    #[test]
    fn attribute_breaking_link_is_not_linked() {
        let html = render_links(&["javascript:alert(1)".to_string()]);
        assert!(!html.contains("<a "));
        assert!(html.contains("<li>javascript:alert(1)</li>"));

        let html = render_links(&["\" onmouseover=\"alert(1)".to_string()]);
        assert!(!html.contains("<a "));
        assert!(html.contains("&quot; onmouseover=&quot;alert(1)"));
    }

    #[test]
    fn href_keeps_backend_value() {
        assert_eq!(
            safe_href(" https://LinkedIn.com ").as_deref(),
            Some("https://LinkedIn.com")
        );
        assert_eq!(
            safe_href("https://acme.example/a?x=1&y=2").as_deref(),
            Some("https://acme.example/a?x=1&amp;y=2")
        );
    }

    #[test]
    fn quotes_in_link_cannot_escape_href() {
        let href = safe_href("https://acme.example/?q=\"x\"").unwrap();
        assert!(!href.contains('"'));
    }

    #[test]
    fn leadership_link_only_when_present() {
        let entries = vec![
            LeadershipEntry::PlainName("Jane <b>Doe</b>".into()),
            LeadershipEntry::ProfileWithLink {
                profile: "John Roe - CTO".into(),
                linkedin: Some("https://www.linkedin.com/in/jroe".into()),
            },
            LeadershipEntry::ProfileWithLink {
                profile: "Ann Poe".into(),
                linkedin: Some(String::new()),
            },
            LeadershipEntry::ProfileWithLink {
                profile: "Max Moe".into(),
                linkedin: None,
            },
        ];
        let html = render_leadership(&entries);
        assert_eq!(html.matches("<a ").count(), 1);
        assert!(html.contains(
            r#"<a href="https://www.linkedin.com/in/jroe" target="_blank" rel="noopener noreferrer">LinkedIn</a>"#
        ));
        assert!(html.contains("<li>Jane &lt;b&gt;Doe&lt;/b&gt;</li>"));
        assert!(html.contains("<li>Ann Poe</li>"));
        assert!(html.contains("<li>Max Moe</li>"));
    }

    #[test]
    fn missing_optional_fields_render_empty_regions() {
        let html = render_results(&AnalysisResult::default());
        assert!(html.contains("<ul id=\"contacts\"></ul>"));
        assert!(html.contains("<ul id=\"tech-stack\"></ul>"));
        for category in SwotCategory::ALL {
            assert!(html.contains(&format!("<ul id=\"{}\"></ul>", category.region_id())));
        }
    }

    #[test]
    fn report_is_a_full_page() {
        let page = render_report(&AnalysisResult::default(), "2024-01-01T00:00:00Z");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<footer>Generated 2024-01-01T00:00:00Z</footer>"));
        assert!(page.trim_end().ends_with("</html>"));
    }

    #[test]
    fn write_report_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.html");
        write_report(&path, &AnalysisResult::default()).unwrap();
        let page = std::fs::read_to_string(&path).unwrap();
        assert!(page.contains("<div id=\"results\">"));
    }
}
