//! Lexer for template directives using logos
//!
//! Only directive markers are significant; everything else on a line lexes as
//! plain text.

use logos::Logos;

use crate::error::Span;

/// Opening marker of a block, without the name
pub const BLOCK_PREFIX: &str = "{% block ";

/// Closing marker of every block
pub const END_BLOCK: &str = "{% endblock %}";

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token<'a> {
    /// `{% block name %}`
    #[regex(r"\{% block \w+ %\}", |lex| {
        let s = lex.slice();
        &s[BLOCK_PREFIX.len()..s.len() - 3]
    })]
    BlockStart(&'a str),

    /// A block directive that did not match the named form
    #[token("{% block ")]
    MalformedBlock,

    #[token("{% endblock %}")]
    BlockEnd,

    /// `{% extends "file" %}`
    #[regex(r#"\{% extends "[^"\n]+" %\}"#, |lex| {
        let s = lex.slice();
        &s["{% extends \"".len()..s.len() - "\" %}".len()]
    })]
    Extends(&'a str),

    #[regex(r"[^{]+")]
    Text,

    #[token("{")]
    Brace,
}

/// Block markers found on a single line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineMarkers<'a> {
    /// Name of the first well-formed block start on the line
    pub start: Option<&'a str>,
    /// Whether the line closes a block
    pub end: bool,
}

/// Scan one line for block markers
///
/// Returns the span of the offending directive when the line contains a block
/// directive but no well-formed `{% block name %}`.
pub fn scan_line(line: &str) -> Result<LineMarkers<'_>, Span> {
    let mut markers = LineMarkers::default();

    for token in Token::lexer(line) {
        match token {
            Ok(Token::BlockStart(name)) => {
                if markers.start.is_none() {
                    markers.start = Some(name);
                }
            }
            Ok(Token::BlockEnd) => markers.end = true,
            _ => {}
        }
    }

    // Directives logos cannot close still count as block directives.
    match (markers.start, line.find(BLOCK_PREFIX)) {
        (None, Some(pos)) => Err(pos..pos + BLOCK_PREFIX.len()),
        _ => Ok(markers),
    }
}

/// Base filename named by an extends directive
///
/// The trimmed line must consist of exactly one `{% extends "file" %}`.
pub fn extends_target(line: &str) -> Option<&str> {
    let line = line.trim();
    let mut lexer = Token::lexer(line);
    match (lexer.next(), lexer.span()) {
        (Some(Ok(Token::Extends(name))), span) if span == (0..line.len()) => Some(name),
        _ => None,
    }
}

/// The start marker for a named block
pub fn block_start(name: &str) -> String {
    format!("{}{} %}}", BLOCK_PREFIX, name)
}
