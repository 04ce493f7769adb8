//! Request/render controller.
//!
//! Owns the submit lifecycle: loading state, the single backend call, and applying the
//! outcome to the session. Interactive front ends drive it through [`run_controller`].

use crate::engine::{AnalysisClient, AnalyzeError};
use crate::model::AnalysisResult;
use crate::session::Session;
use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Commands emitted by UI layers.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    Submit(String),
    Quit,
}

/// Events emitted back to UI layers.
#[derive(Debug)]
pub(crate) enum AppEvent {
    Info(String),
    // Boxed to keep the event small; AnalysisResult is large.
    AnalysisFinished(Box<Result<AnalysisResult, AnalyzeError>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SubmitOutcome {
    /// Blank URL or a submission already outstanding; no request was sent.
    Ignored,
    Rendered,
    Failed(String),
}

/// Run one analysis for `raw_url` against `session`.
pub(crate) async fn submit_analysis(
    session: &mut Session,
    client: &AnalysisClient,
    raw_url: &str,
) -> SubmitOutcome {
    let Some(url) = session.begin_submit(raw_url) else {
        log::debug!("submit ignored: blank url or request in flight");
        return SubmitOutcome::Ignored;
    };

    let outcome = client.analyze(&url).await;
    let reported = match &outcome {
        Ok(_) => SubmitOutcome::Rendered,
        Err(e) => {
            log::error!("analysis of {url} failed: {e:?}");
            SubmitOutcome::Failed(e.user_message())
        }
    };
    session.complete(outcome);
    reported
}

/// Serve submit commands from a UI thread, one analysis at a time.
///
/// A `Submit` that arrives while a request is outstanding is rejected with an info event.
/// `Quit` (or a closed command channel) aborts the outstanding request and returns at once.
pub(crate) async fn run_controller(
    client: AnalysisClient,
    event_tx: UnboundedSender<AppEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let mut in_flight: Option<tokio::task::JoinHandle<Result<AnalysisResult, AnalyzeError>>> =
        None;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UiCommand::Submit(url)) => {
                        if in_flight.is_some() {
                            let _ = event_tx.send(AppEvent::Info(
                                "Analysis already in progress…".into(),
                            ));
                            continue;
                        }
                        log::info!("submitting {url} for analysis");
                        let client = client.clone();
                        in_flight = Some(tokio::spawn(async move { client.analyze(&url).await }));
                    }
                    Some(UiCommand::Quit) | None => {
                        if let Some(handle) = in_flight.take() {
                            log::info!("quit requested; aborting analysis in flight");
                            handle.abort();
                        }
                        break Ok(());
                    }
                }
            }
            // Poll the handle in place; taking it before this branch wins would drop it
            // when another branch is selected.
            join_res = async {
                match in_flight.as_mut() {
                    Some(h) => h.await,
                    None => futures::future::pending().await,
                }
            } => {
                in_flight = None;
                // A task that panicked still completes the submission so submit is re-enabled.
                let outcome = join_res
                    .unwrap_or_else(|e| Err(AnalyzeError::Task(e.to_string())));
                if let Err(e) = &outcome {
                    log::error!("analysis failed: {e:?}");
                }
                let _ = event_tx.send(AppEvent::AnalysisFinished(Box::new(outcome)));
            }
        }
    }
}
