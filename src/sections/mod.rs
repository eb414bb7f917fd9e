//! Document sections and placeholder substitution
//!
//! Input documents are split into named sections, optionally seeded by tag
//! functions, and the sections are substituted into `{{name}}` placeholders
//! of the resolved page template.

mod parser;
mod registry;
mod substitute;

pub use parser::{
    parse_sections, SectionParser, Sections, FILENAME_SECTION, NO_SECTION, SECTION_DELIMITER,
};
pub use registry::{TagError, TagFn, TagRegistry};
pub use substitute::substitute;
