//! Template inheritance
//!
//! A template may name a base template on its first line and override the
//! base's blocks:
//!
//! ```text
//! {% extends "base.html" %}
//! {% block title %}About{% endblock %}
//! ```
//!
//! Resolution splices each overriding block into the base and reduces the
//! remaining blocks to their default content, leaving no block markers behind.

mod blocks;
mod inheritance;
pub mod lexer;
mod source;

pub use blocks::{block_content, extract_blocks, Block, Blocks};
pub use inheritance::{base_name, merge_blocks, resolve_inheritance, strip_default_blocks};
pub use source::{FsSource, MemorySource, TemplateSource};
