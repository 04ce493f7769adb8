//! Session state shared by the request controller and the CSV exporter.
//!
//! Holds the single-slot "latest result" cache and the visibility flags of the output
//! regions. Both submit and export take this by reference; nothing here is global.

use crate::engine::AnalyzeError;
use crate::model::AnalysisResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading { url: String },
    Ready,
    Failed(String),
}

/// Visibility of the controls and output regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub phase: Phase,
    pub submit_enabled: bool,
    pub loading_visible: bool,
    pub results_visible: bool,
    pub export_visible: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            submit_enabled: true,
            loading_visible: false,
            results_visible: false,
            export_visible: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    latest: Option<AnalysisResult>,
    view: ViewState,
}

impl Session {
    pub fn latest(&self) -> Option<&AnalysisResult> {
        self.latest.as_ref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Result to show in the result regions, if they are visible.
    pub fn displayed(&self) -> Option<&AnalysisResult> {
        if self.view.results_visible {
            self.latest.as_ref()
        } else {
            None
        }
    }

    /// Enter the loading state for `raw_url`.
    ///
    /// Returns the trimmed URL to submit, or `None` when the input is blank or a
    /// submission is already outstanding. In the `None` case the state is untouched.
    pub fn begin_submit(&mut self, raw_url: &str) -> Option<String> {
        let url = raw_url.trim();
        if url.is_empty() || !self.view.submit_enabled {
            return None;
        }
        self.view = ViewState {
            phase: Phase::Loading {
                url: url.to_string(),
            },
            submit_enabled: false,
            loading_visible: true,
            results_visible: false,
            export_visible: false,
        };
        Some(url.to_string())
    }

    /// Apply the outcome of the outstanding submission. Submit is re-enabled on every path.
    pub fn complete(&mut self, outcome: Result<AnalysisResult, AnalyzeError>) {
        match outcome {
            Ok(result) => {
                self.latest = Some(result);
                self.view = ViewState {
                    phase: Phase::Ready,
                    submit_enabled: true,
                    loading_visible: false,
                    results_visible: true,
                    export_visible: true,
                };
            }
            Err(err) => {
                self.view = ViewState {
                    phase: Phase::Failed(err.user_message()),
                    submit_enabled: true,
                    loading_visible: false,
                    results_visible: false,
                    export_visible: false,
                };
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view.phase, Phase::Loading { .. })
    }
}
