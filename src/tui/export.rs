use crate::export::{export_csv, ExportError, DEFAULT_CSV_FILE};
use anyhow::{Context, Result};
use std::sync::mpsc as std_mpsc;
use std::sync::OnceLock;
use std::time::Duration;

use super::state::UiState;

// Global clipboard manager channel - initialized once on first use
static CLIPBOARD_SENDER: OnceLock<std_mpsc::Sender<String>> = OnceLock::new();

/// Export the latest result as `company_analysis.csv` in the current directory.
/// Returns the absolute path of the exported file.
pub fn export_latest_csv(state: &UiState) -> Result<std::path::PathBuf, ExportError> {
    if state.session.latest().is_none() {
        return Err(ExportError::NoData);
    }
    let current_dir = std::env::current_dir().context("get current directory")?;
    export_csv(&state.session, &current_dir.join(DEFAULT_CSV_FILE))
}

/// Export and report the outcome on the status line.
///
/// Only offered while a successful result is on screen; the stored result stays hidden
/// during loading and after a failure.
pub fn export_and_show_path(state: &mut UiState) {
    if state.session.latest().is_some() && !state.session.view().export_visible {
        state.info = "Export unavailable until the current analysis succeeds".into();
        return;
    }
    match export_latest_csv(state) {
        Ok(p) => {
            state.last_exported_path = Some(p.to_string_lossy().to_string());
            state.info = format!("Exported CSV: {} (Ctrl-Y to copy path)", p.display());
        }
        Err(ExportError::NoData) => {
            state.info = ExportError::NoData.to_string();
        }
        Err(e) => {
            state.info = format!("CSV export failed: {e:#}");
        }
    }
}

/// Initialize the clipboard manager thread if not already initialized.
/// Each clipboard instance is kept alive for a while so clipboard managers on Linux
/// can read the contents after we move on.
fn init_clipboard_manager() -> Result<&'static std_mpsc::Sender<String>> {
    CLIPBOARD_SENDER.get_or_init(|| {
        let (tx, rx) = std_mpsc::channel::<String>();

        std::thread::spawn(move || {
            use arboard::Clipboard;

            for text in rx {
                if let Ok(mut clipboard) = Clipboard::new() {
                    if clipboard.set_text(&text).is_ok() {
                        std::thread::sleep(Duration::from_secs(2));
                    }
                }
            }
        });

        tx
    });

    CLIPBOARD_SENDER
        .get()
        .ok_or_else(|| anyhow::anyhow!("Failed to initialize clipboard manager"))
}

/// Queue `text` for the clipboard without blocking the UI thread.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let sender = init_clipboard_manager()?;
    sender
        .send(text.to_string())
        .map_err(|_| anyhow::anyhow!("Clipboard manager channel closed"))?;
    Ok(())
}

/// Copy the last exported path and report the outcome on the status line.
pub fn copy_exported_path(state: &mut UiState) {
    let Some(path) = state.last_exported_path.clone() else {
        state.info = "No exported file path to copy. Export a file first (Ctrl-E)".into();
        return;
    };
    match copy_to_clipboard(&path) {
        Ok(()) => {
            let display_path = if path.chars().count() > 60 {
                let head: String = path.chars().take(57).collect();
                format!("{head}...")
            } else {
                path
            };
            state.info = format!("✓ Copied to clipboard: {}", display_path);
        }
        Err(e) => {
            state.info = format!("Clipboard copy failed: {e:#}");
        }
    }
}
