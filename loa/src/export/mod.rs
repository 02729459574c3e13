//! Document artifact and transcript exports
//!
//! The docx assembly is pure (blocks in, bytes out); the helpers here wrap it
//! with file writes for the CLI layer, alongside the plain-text and
//! JSON-transcript exports.

mod docx;

pub use docx::{DEFAULT_DOCX_FILENAME, ExportError, build_document, export_docx};

use std::fs;
use std::path::Path;

use eyre::{Context, Result};
use tracing::info;

use crate::letter::Turn;
use crate::render::ClassifiedBlock;

/// Write the document artifact for the given blocks
pub fn write_docx(path: impl AsRef<Path>, blocks: &[ClassifiedBlock]) -> Result<()> {
    let path = path.as_ref();
    let bytes = export_docx(blocks)?;
    fs::write(path, bytes).context(format!("Failed to write document to {}", path.display()))?;
    info!(?path, "Document written");
    Ok(())
}

/// Write the current letter text verbatim
pub fn write_text(path: impl AsRef<Path>, letter: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, letter).context(format!("Failed to write letter text to {}", path.display()))?;
    info!(?path, "Letter text written");
    Ok(())
}

/// Write the conversation transcript as a JSON array of {role, content} records
pub fn write_transcript(path: impl AsRef<Path>, turns: &[Turn]) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(turns).context("Failed to serialize transcript")?;
    fs::write(path, json).context(format!("Failed to write transcript to {}", path.display()))?;
    info!(?path, turn_count = turns.len(), "Transcript written");
    Ok(())
}
