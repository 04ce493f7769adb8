use crate::engine::AnalysisClient;
use crate::export::DEFAULT_CSV_FILE;
use crate::model::ClientConfig;
use crate::orchestrator::{process_analysis_completion, submit_analysis, SubmitOutcome};
use crate::session::Session;
use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use std::io::Write;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "company-analyzer-cli",
    version,
    about = "Analyze a company website through the analysis service, with optional TUI"
)]
pub struct Cli {
    /// Company website to analyze (submitted on launch in TUI mode)
    pub url: Option<String>,

    /// Base URL of the analysis service
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    pub base_url: String,

    /// Print JSON result and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Print text summary and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Write an HTML report of the result to this path
    #[arg(long)]
    pub html: Option<std::path::PathBuf>,

    /// Export the result as CSV (defaults to company_analysis.csv)
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_CSV_FILE)]
    pub export_csv: Option<std::path::PathBuf>,

    /// Log level (off, error, warn, info, debug, trace); RUST_LOG is used as the base
    #[arg(long)]
    pub log_level: Option<LevelFilter>,
}

impl Cli {
    pub fn is_interactive(&self) -> bool {
        !self.json && !self.text
    }

    /// Effective log level. The TUI owns the terminal, so it logs nothing unless asked.
    pub fn effective_log_level(&self) -> LevelFilter {
        match self.log_level {
            Some(level) => level,
            None if self.is_interactive() && cfg!(feature = "tui") => LevelFilter::Off,
            None => LevelFilter::Warn,
        }
    }
}

pub async fn run(args: Cli) -> Result<()> {
    if args.json && args.text {
        return Err(anyhow::anyhow!("--json and --text cannot be used together"));
    }

    if args.is_interactive() {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            // Fallback when built without TUI support.
            return run_once(args, false).await;
        }
    }

    let json = args.json;
    run_once(args, json).await
}

/// Build a `ClientConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> ClientConfig {
    ClientConfig {
        base_url: args.base_url.clone(),
        endpoint: "/analyze".into(),
        user_agent: format!("company-analyzer-cli/{}", env!("CARGO_PKG_VERSION")),
    }
}

/// Analyze the URL given on the command line once, print the result and run exports.
async fn run_once(args: Cli, json: bool) -> Result<()> {
    let client = AnalysisClient::new(&build_config(&args))?;
    log::debug!("using analysis service at {}", client.analyze_url());
    let mut session = Session::default();
    let raw_url = args.url.clone().unwrap_or_default();

    let outcome = submit_analysis(&mut session, &client, &raw_url).await;
    let result = match outcome {
        SubmitOutcome::Ignored => {
            log::warn!("no URL given; nothing to analyze");
            return Ok(());
        }
        SubmitOutcome::Failed(msg) => return Err(anyhow::anyhow!(msg)),
        SubmitOutcome::Rendered => session
            .latest()
            .context("analysis succeeded without a stored result")?,
    };

    let (out_tx, out_handle) = spawn_output_writer();
    if json {
        let out = serde_json::to_string_pretty(result)?;
        let _ = out_tx.send(OutputLine::Stdout(out));
    } else {
        let summary = crate::text_summary::build_text_summary(result);
        for line in summary.lines {
            let _ = out_tx.send(OutputLine::Stdout(line));
        }
    }

    let processed = process_analysis_completion(&args, &session);
    for msg in processed.export_messages {
        let _ = out_tx.send(OutputLine::Stderr(msg));
    }

    drop(out_tx);
    let _ = out_handle.await;

    if processed.failed {
        return Err(anyhow::anyhow!("one or more exports failed"));
    }
    Ok(())
}
