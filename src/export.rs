//! Sectioned CSV export of the latest analysis result.
//!
//! Layout: for each section a title row, one row per element, then a blank line.
//! Every field is quoted and embedded quotes are doubled, so the file reopens cleanly
//! in spreadsheet tools. The output depends only on the result, so repeated exports of
//! the same result are byte-identical.

use crate::model::{AnalysisResult, SwotCategory};
use crate::session::Session;
use anyhow::Context;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CSV_FILE: &str = "company_analysis.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No data to export. Run an analysis first.")]
    NoData,

    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

fn section_rows(result: &AnalysisResult) -> Vec<(String, Vec<String>)> {
    let mut sections = vec![(
        "Discovered Links".to_string(),
        result.discovered_links.clone(),
    )];
    // Backends that do not report contacts get no Contacts section at all.
    if let Some(contacts) = result.contacts.as_ref() {
        sections.push(("Contacts".to_string(), contacts.clone()));
    }
    sections.push((
        "Leadership".to_string(),
        result.leadership.iter().map(|e| e.flattened()).collect(),
    ));
    for category in SwotCategory::ALL {
        sections.push((
            format!("SWOT-{}", category.title()),
            result.swot.items(category).to_vec(),
        ));
    }
    sections
}

/// Build the CSV payload for `result`.
pub fn build_csv(result: &AnalysisResult) -> anyhow::Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    for (title, rows) in section_rows(result) {
        {
            let mut writer = csv::WriterBuilder::new()
                .quote_style(csv::QuoteStyle::Always)
                .terminator(csv::Terminator::Any(b'\n'))
                .has_headers(false)
                .from_writer(&mut buf);
            writer
                .write_record([title.as_str()])
                .context("write section title")?;
            for row in &rows {
                writer.write_record([row.as_str()]).context("write csv row")?;
            }
            writer.flush().context("flush csv writer")?;
        }
        buf.push(b'\n');
    }
    String::from_utf8(buf).context("csv output is not utf-8")
}

/// Export the session's latest result to `path`.
///
/// Fails with [`ExportError::NoData`] before touching the filesystem when no analysis has
/// succeeded yet.
pub fn export_csv(session: &Session, path: &Path) -> Result<PathBuf, ExportError> {
    let result = session.latest().ok_or(ExportError::NoData)?;
    let payload = build_csv(result)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create export directory {}", parent.display()))?;
        }
    }
    std::fs::write(path, payload)
        .with_context(|| format!("write csv export {}", path.display()))?;
    log::info!("exported csv to {}", path.display());
    Ok(path.to_path_buf())
}
