//! Error types for template compilation

use std::io;
use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::sections::TagError;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors that abort a compilation run
#[derive(Error, Debug)]
pub enum CompileError {
    /// A line contains a block directive without a valid block name
    #[error("malformed block directive in {file} at line {line_no}: {line}")]
    BlockSyntax {
        file: String,
        line_no: usize,
        line: String,
        span: Span,
    },

    /// A template, base template or input document could not be read
    #[error("cannot read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// An output document could not be written
    #[error("cannot write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Two input documents map to the same output file
    #[error(
        "'{}' and '{}' both compile to '{}'",
        first.display(),
        second.display(),
        output.display()
    )]
    OutputCollision {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    /// The site configuration is not valid TOML
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Tag registration failed
    #[error(transparent)]
    Tag(#[from] TagError),
}

impl CompileError {
    /// Create a read error for the given path
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a write error for the given path
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Whether this is the fatal block syntax error
    pub fn is_block_syntax(&self) -> bool {
        matches!(self, CompileError::BlockSyntax { .. })
    }

    /// Name of the file a block syntax error points into
    pub fn file(&self) -> Option<&str> {
        match self {
            CompileError::BlockSyntax { file, .. } => Some(file),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// `source` must be the full text of the file the error points into.
    /// Errors without a source location are formatted with their `Display` text.
    pub fn format(&self, source: &str) -> String {
        match self {
            CompileError::BlockSyntax {
                file,
                line_no,
                span,
                ..
            } => {
                let mut buf = Vec::new();
                let message = format!("malformed block directive at line {}", line_no);
                let written = Report::build(ReportKind::Error, file.as_str(), span.start)
                    .with_message(&message)
                    .with_label(
                        Label::new((file.as_str(), span.clone()))
                            .with_message("expected `{% block <name> %}`")
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((file.as_str(), Source::from(source)), &mut buf);
                match written {
                    Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
                    Err(_) => self.to_string(),
                }
            }
            other => other.to_string(),
        }
    }
}
