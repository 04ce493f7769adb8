mod backend;

pub use backend::AnalysisClient;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single `/analyze` call.
///
/// All variants are terminal for the triggering submission; nothing is retried.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Request could not be sent or the response body could not be read.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON or did not match the response schema.
    #[error("Invalid response from backend (HTTP {status}): {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    /// The backend answered with a non-empty `error` field. Displayed verbatim.
    #[error("{0}")]
    Backend(String),

    /// The task running the request panicked or was cancelled before it produced an outcome.
    #[error("Analysis task failed: {0}")]
    Task(String),
}

impl AnalyzeError {
    /// Message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            AnalyzeError::Backend(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_displays_verbatim() {
        let err = AnalyzeError::Backend("Timeout".into());
        assert_eq!(err.to_string(), "Timeout");
        assert_eq!(err.user_message(), "Timeout");
    }

    #[test]
    fn decode_error_mentions_status() {
        let source = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let err = AnalyzeError::Decode {
            status: StatusCode::BAD_GATEWAY,
            source,
        };
        assert!(err.user_message().contains("502"));
    }

    #[tokio::test]
    async fn panicked_task_becomes_task_error() {
        let join_err = tokio::spawn(async { panic!("boom") }).await.unwrap_err();
        let err = AnalyzeError::Task(join_err.to_string());
        assert!(err.user_message().starts_with("Analysis task failed:"));
    }
}
