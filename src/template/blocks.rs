//! Block extraction
//!
//! Blocks are flat: a start marker while another block is open re-targets
//! accumulation to the new name, and an end marker always closes the most
//! recently opened block.

use indexmap::IndexMap;

use crate::document::Document;
use crate::error::CompileError;

use super::lexer::{block_start, scan_line, END_BLOCK};

/// A named block with the raw lines it spans, markers included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    pub lines: Vec<String>,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    /// Raw text of the block, markers included
    pub fn raw(&self) -> String {
        self.lines.concat()
    }

    /// Text between the block's start marker and its end marker
    pub fn content(&self) -> String {
        block_content(&self.name, &self.raw()).to_string()
    }
}

/// Blocks of one document keyed by name, in order of first appearance
pub type Blocks = IndexMap<String, Block>;

enum State {
    Outside,
    Inside(String),
}

/// Extract every block from a document
///
/// When a name occurs twice, the last occurrence wins.
pub fn extract_blocks(doc: &Document) -> Result<Blocks, CompileError> {
    let mut blocks = Blocks::new();
    let mut state = State::Outside;

    for (line_idx, (offset, line)) in doc.lines_with_offsets().enumerate() {
        let markers = scan_line(line).map_err(|span| CompileError::BlockSyntax {
            file: doc.filename().to_string(),
            line_no: line_idx + 1,
            line: line.trim_end().to_string(),
            span: offset + span.start..offset + span.end,
        })?;

        if let Some(name) = markers.start {
            blocks.insert(name.to_string(), Block::new(name));
            state = State::Inside(name.to_string());
        }

        match &state {
            State::Inside(name) => {
                if let Some(block) = blocks.get_mut(name) {
                    block.lines.push(line.to_string());
                }
            }
            State::Outside if markers.end => {
                log::warn!(
                    "{}:{}: ignoring {} outside of any block",
                    doc.filename(),
                    line_idx + 1,
                    END_BLOCK
                );
            }
            State::Outside => {}
        }

        if markers.end {
            state = State::Outside;
        }
    }

    Ok(blocks)
}

/// Text between a named block's start marker and the first end marker after it
///
/// A missing start marker reads from the beginning of `raw`, a missing end
/// marker reads to its end.
pub fn block_content<'a>(name: &str, raw: &'a str) -> &'a str {
    let marker = block_start(name);
    let start = raw.find(&marker).map_or(0, |i| i + marker.len());
    let end = raw[start..].find(END_BLOCK).map_or(raw.len(), |i| start + i);
    &raw[start..end]
}
