//! Application-level orchestration utilities.
//!
//! This module owns the submit lifecycle (loading state, backend call, outcome) and
//! post-analysis processing such as report and CSV exports. UI/CLI layers call into
//! this module to keep responsibilities separated.

mod controller;
mod post_process;

pub(crate) use controller::{run_controller, submit_analysis, AppEvent, SubmitOutcome, UiCommand};
pub(crate) use post_process::process_analysis_completion;
