use super::AnalyzeError;
use crate::model::{parse_response, AnalysisResult, AnalyzeRequest, BackendReply, ClientConfig};
use anyhow::{Context, Result};
use reqwest::header::{HeaderValue, CONTENT_TYPE};

/// HTTP client for the analysis backend. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    analyze_url: String,
}

impl AnalysisClient {
    pub fn new(cfg: &ClientConfig) -> Result<Self> {
        // No request timeout: the call runs until the transport gives up.
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            analyze_url: cfg.analyze_url(),
        })
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }

    /// Submit `url` for analysis.
    ///
    /// The body is decoded whatever the HTTP status; backend failures arrive as
    /// `{"error": ...}` bodies on 4xx/5xx responses.
    pub async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalyzeError> {
        let body = AnalyzeRequest {
            url: url.to_string(),
        };
        log::debug!("POST {} url={}", self.analyze_url, url);

        let resp = self
            .http
            .post(&self.analyze_url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        log::debug!("analyze response: HTTP {} ({} bytes)", status, bytes.len());

        match parse_response(&bytes) {
            Ok(BackendReply::Analysis(result)) => Ok(result),
            Ok(BackendReply::Error(msg)) => Err(AnalyzeError::Backend(msg)),
            Err(source) => Err(AnalyzeError::Decode { status, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> AnalysisClient {
        AnalysisClient::new(&ClientConfig {
            base_url: server.uri(),
            endpoint: "/analyze".into(),
            user_agent: "company-analyzer-cli/test".into(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn posts_url_as_json_and_decodes_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({ "url": "https://acme.example" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "url": "https://acme.example",
                "discovered_links": ["https://acme.example/about"],
                "leadership": ["Jane Doe - CEO"],
                "swot": {"Strengths": ["Brand"], "Weaknesses": [], "Opportunities": [], "Threats": []}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .analyze("https://acme.example")
            .await
            .unwrap();
        assert_eq!(result.discovered_links, vec!["https://acme.example/about"]);
        assert_eq!(result.swot.strengths, vec!["Brand"]);
    }

    #[tokio::test]
    async fn error_body_on_server_error_is_a_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({ "error": "Timeout" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .analyze("https://acme.example")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::Backend(ref m) if m == "Timeout"));
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .analyze("https://acme.example")
            .await
            .unwrap_err();
        match err {
            AnalyzeError::Decode { status, .. } => assert_eq!(status.as_u16(), 502),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        // Nothing listens on port 1.
        let client = AnalysisClient::new(&ClientConfig {
            base_url: "http://127.0.0.1:1".into(),
            endpoint: "/analyze".into(),
            user_agent: "company-analyzer-cli/test".into(),
        })
        .unwrap();

        let err = client.analyze("https://acme.example").await.unwrap_err();
        assert!(matches!(err, AnalyzeError::Transport(_)));
    }
}
