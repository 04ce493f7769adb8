//! Post-analysis processing utilities.
//!
//! Handles the exports requested on the command line after an analysis succeeds.

use crate::cli::Cli;
use crate::export;
use crate::report;
use crate::session::Session;

/// Result of post-analysis processing, ready for presentation layers.
pub(crate) struct ProcessedAnalysis {
    pub export_messages: Vec<String>,
    pub failed: bool,
}

/// Write the HTML report and CSV export requested by `args`, if any.
pub(crate) fn process_analysis_completion(args: &Cli, session: &Session) -> ProcessedAnalysis {
    let mut export_messages = Vec::new();
    let mut failed = false;

    if let Some(report_path) = args.html.as_deref() {
        match session.latest() {
            Some(result) => match report::write_report(report_path, result) {
                Ok(()) => export_messages.push(format!("Wrote report: {}", report_path.display())),
                Err(e) => {
                    failed = true;
                    export_messages.push(format!("Report failed: {e:#}"));
                }
            },
            None => {
                failed = true;
                export_messages.push("Report failed: no analysis result".into());
            }
        }
    }
    if let Some(export_path) = args.export_csv.as_deref() {
        match export::export_csv(session, export_path) {
            Ok(p) => export_messages.push(format!("Exported CSV: {}", p.display())),
            Err(e) => {
                failed = true;
                export_messages.push(format!("Export CSV failed: {e:#}"));
            }
        }
    }

    ProcessedAnalysis {
        export_messages,
        failed,
    }
}
