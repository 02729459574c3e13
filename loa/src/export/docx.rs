//! Word-document assembly from classified blocks
//!
//! Each block becomes one paragraph, in block order. Presentation follows the
//! block role: date/reference lines are right-aligned and bold, subject lines
//! and section headers are bold, everything else is a plain paragraph.

use docx_rs::{AlignmentType, Docx, PageMargin, Paragraph, Run};
use thiserror::Error;
use tracing::debug;

use crate::render::{ClassifiedBlock, LineRole};

/// Default filename for the exported artifact
pub const DEFAULT_DOCX_FILENAME: &str = "letter_of_authorization.docx";

/// Page margin in twentieths of a point (1 inch on every side)
const MARGIN_TWIPS: i32 = 1440;

/// Errors from document export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to pack document archive: {0}")]
    Pack(String),
}

/// Map one classified block to a styled paragraph
fn paragraph_for(block: &ClassifiedBlock) -> Paragraph {
    match block.role {
        LineRole::Blank => Paragraph::new(),
        LineRole::ReferenceOrDate => Paragraph::new()
            .add_run(Run::new().add_text(block.text.as_str()).bold())
            .align(AlignmentType::Right),
        LineRole::Subject | LineRole::SectionHeader => {
            Paragraph::new().add_run(Run::new().add_text(block.text.as_str()).bold())
        }
        LineRole::Salutation | LineRole::Closing | LineRole::Body => {
            Paragraph::new().add_run(Run::new().add_text(block.text.as_str()))
        }
    }
}

/// Assemble the in-memory document: one paragraph per block, fixed margins
pub fn build_document(blocks: &[ClassifiedBlock]) -> Docx {
    debug!(block_count = blocks.len(), "build_document: called");
    let mut doc = Docx::new().page_margin(
        PageMargin::new()
            .top(MARGIN_TWIPS)
            .bottom(MARGIN_TWIPS)
            .left(MARGIN_TWIPS)
            .right(MARGIN_TWIPS),
    );

    for block in blocks {
        doc = doc.add_paragraph(paragraph_for(block));
    }

    doc
}

/// Serialize classified blocks into document artifact bytes
pub fn export_docx(blocks: &[ClassifiedBlock]) -> Result<Vec<u8>, ExportError> {
    debug!(block_count = blocks.len(), "export_docx: called");
    let mut cursor = std::io::Cursor::new(Vec::new());
    build_document(blocks)
        .build()
        .pack(&mut cursor)
        .map_err(|e| ExportError::Pack(e.to_string()))?;

    Ok(cursor.into_inner())
}
