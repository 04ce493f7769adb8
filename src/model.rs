use serde::{Deserialize, Serialize};

/// Connection settings for the analysis backend, built from CLI arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub endpoint: String,
    pub user_agent: String,
}

impl ClientConfig {
    /// Full URL of the analyze endpoint (base URL without trailing slash + endpoint).
    pub fn analyze_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }
}

/// Request body sent to `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub url: String,
}

/// One leadership entry. The backend sends either a bare string or a profile record;
/// the shape is resolved here once so renderers never re-inspect it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LeadershipEntry {
    PlainName(String),
    ProfileWithLink {
        profile: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        linkedin: Option<String>,
    },
}

impl LeadershipEntry {
    /// Visible text of the entry (name or profile line).
    pub fn label(&self) -> &str {
        match self {
            LeadershipEntry::PlainName(name) => name,
            LeadershipEntry::ProfileWithLink { profile, .. } => profile,
        }
    }

    /// LinkedIn URL, only when present and non-blank.
    pub fn linkedin(&self) -> Option<&str> {
        match self {
            LeadershipEntry::PlainName(_) => None,
            LeadershipEntry::ProfileWithLink { linkedin, .. } => linkedin
                .as_deref()
                .map(str::trim)
                .filter(|link| !link.is_empty()),
        }
    }

    /// Single-string form used by text output and CSV rows.
    pub fn flattened(&self) -> String {
        match self.linkedin() {
            Some(link) => format!("{} (LinkedIn: {})", self.label(), link),
            None => self.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Swot {
    #[serde(rename = "Strengths", default)]
    pub strengths: Vec<String>,
    #[serde(rename = "Weaknesses", default)]
    pub weaknesses: Vec<String>,
    #[serde(rename = "Opportunities", default)]
    pub opportunities: Vec<String>,
    #[serde(rename = "Threats", default)]
    pub threats: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwotCategory {
    Strengths,
    Weaknesses,
    Opportunities,
    Threats,
}

impl SwotCategory {
    pub const ALL: [SwotCategory; 4] = [
        SwotCategory::Strengths,
        SwotCategory::Weaknesses,
        SwotCategory::Opportunities,
        SwotCategory::Threats,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SwotCategory::Strengths => "Strengths",
            SwotCategory::Weaknesses => "Weaknesses",
            SwotCategory::Opportunities => "Opportunities",
            SwotCategory::Threats => "Threats",
        }
    }

    /// Region id used by the HTML report.
    pub fn region_id(self) -> &'static str {
        match self {
            SwotCategory::Strengths => "swot-strengths",
            SwotCategory::Weaknesses => "swot-weaknesses",
            SwotCategory::Opportunities => "swot-opportunities",
            SwotCategory::Threats => "swot-threats",
        }
    }
}

impl Swot {
    pub fn items(&self, category: SwotCategory) -> &[String] {
        match category {
            SwotCategory::Strengths => &self.strengths,
            SwotCategory::Weaknesses => &self.weaknesses,
            SwotCategory::Opportunities => &self.opportunities,
            SwotCategory::Threats => &self.threats,
        }
    }
}

/// Parsed body of a successful `/analyze` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub discovered_links: Vec<String>,
    // Not every backend variant reports contacts or tech stack; `None` means "not provided".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<String>>,
    #[serde(default)]
    pub leadership: Vec<LeadershipEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,
    #[serde(default)]
    pub swot: Swot,
}

impl AnalysisResult {
    pub fn contacts(&self) -> &[String] {
        self.contacts.as_deref().unwrap_or_default()
    }

    pub fn tech_stack(&self) -> &[String] {
        self.tech_stack.as_deref().unwrap_or_default()
    }
}

/// Outcome of decoding a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendReply {
    Analysis(AnalysisResult),
    Error(String),
}

/// Decode a response body. A non-empty `error` string takes precedence over every other
/// field; an empty one is treated as absent.
pub fn parse_response(body: &[u8]) -> serde_json::Result<BackendReply> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if let Some(msg) = value.get("error").and_then(|v| v.as_str()) {
        if !msg.is_empty() {
            return Ok(BackendReply::Error(msg.to_string()));
        }
    }
    let result: AnalysisResult = serde_json::from_value(value)?;
    Ok(BackendReply::Analysis(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leadership_entries_resolve_both_shapes() {
        let body = br#"{
            "leadership": [
                "Jane Doe - CEO",
                {"profile": "John Roe - CTO", "linkedin": "https://www.linkedin.com/in/jroe"},
                {"profile": "Ann Poe - Founder", "linkedin": ""},
                {"profile": "Max Moe - Director"}
            ]
        }"#;
        let BackendReply::Analysis(result) = parse_response(body).unwrap() else {
            panic!("expected analysis");
        };
        assert_eq!(
            result.leadership[0],
            LeadershipEntry::PlainName("Jane Doe - CEO".into())
        );
        assert_eq!(
            result.leadership[1].linkedin(),
            Some("https://www.linkedin.com/in/jroe")
        );
        assert_eq!(result.leadership[2].linkedin(), None);
        assert_eq!(result.leadership[3].linkedin(), None);
        assert_eq!(result.leadership[3].label(), "Max Moe - Director");
    }

    #[test]
    fn flattened_appends_link_only_when_present() {
        let with = LeadershipEntry::ProfileWithLink {
            profile: "John Roe".into(),
            linkedin: Some("https://linkedin.com/in/jr".into()),
        };
        let without = LeadershipEntry::ProfileWithLink {
            profile: "Ann Poe".into(),
            linkedin: Some("   ".into()),
        };
        assert_eq!(with.flattened(), "John Roe (LinkedIn: https://linkedin.com/in/jr)");
        assert_eq!(without.flattened(), "Ann Poe");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let body = br#"{"discovered_links": ["https://a.example"], "swot": {"Strengths": ["x"]}}"#;
        let BackendReply::Analysis(result) = parse_response(body).unwrap() else {
            panic!("expected analysis");
        };
        assert!(result.contacts.is_none());
        assert!(result.contacts().is_empty());
        assert!(result.tech_stack().is_empty());
        assert!(result.leadership.is_empty());
        assert_eq!(result.swot.strengths, vec!["x".to_string()]);
        assert!(result.swot.threats.is_empty());
    }

    #[test]
    fn non_empty_error_wins() {
        let body = br#"{"error": "Timeout", "discovered_links": ["https://a.example"]}"#;
        assert_eq!(
            parse_response(body).unwrap(),
            BackendReply::Error("Timeout".into())
        );
    }

    #[test]
    fn empty_error_is_ignored() {
        let body = br#"{"error": "", "tech_stack": ["React"]}"#;
        let BackendReply::Analysis(result) = parse_response(body).unwrap() else {
            panic!("expected analysis");
        };
        assert_eq!(result.tech_stack(), ["React".to_string()]);
    }

    #[test]
    fn non_json_body_is_an_error() {
        assert!(parse_response(b"<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn wrong_shape_is_an_error() {
        assert!(parse_response(br#"{"discovered_links": "not-a-list"}"#).is_err());
    }

    #[test]
    fn analyze_url_joins_without_double_slash() {
        let cfg = ClientConfig {
            base_url: "http://localhost:5000/".into(),
            endpoint: "/analyze".into(),
            user_agent: "test".into(),
        };
        assert_eq!(cfg.analyze_url(), "http://localhost:5000/analyze");
    }
}
