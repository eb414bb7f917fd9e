//! Tag registry for computed sections

use std::fmt;

use thiserror::Error;

use super::parser::Sections;

/// Errors that can occur while registering tags
#[derive(Debug, Error)]
pub enum TagError {
    /// A tag with this name is already registered
    #[error("duplicate tag definition: {name}")]
    Duplicate { name: String },
}

/// A function computing a section from the sections seeded before it
pub type TagFn = Box<dyn Fn(&Sections) -> String>;

struct Tag {
    name: String,
    function: TagFn,
}

/// Ordered set of tag functions, invoked once per document
#[derive(Default)]
pub struct TagRegistry {
    tags: Vec<Tag>,
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagRegistry")
            .field("tags", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl TagRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag function under `name`
    pub fn register<F>(&mut self, name: impl Into<String>, function: F) -> Result<(), TagError>
    where
        F: Fn(&Sections) -> String + 'static,
    {
        let name = name.into();
        if self.contains(&name) {
            return Err(TagError::Duplicate { name });
        }
        self.tags.push(Tag {
            name,
            function: Box::new(function),
        });
        Ok(())
    }

    /// Register a tag that always yields the same text
    pub fn register_constant(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), TagError> {
        let value = value.into();
        self.register(name, move |_| value.clone())
    }

    /// Check if a tag exists
    pub fn contains(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// Tag names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Run every tag in registration order
    ///
    /// Each tag sees the sections produced by the tags before it.
    pub fn seed(&self) -> Sections {
        let mut sections = Sections::new();
        for tag in &self.tags {
            let value = (tag.function)(&sections);
            log::trace!("tag '{}' produced {} bytes", tag.name, value.len());
            sections.insert(tag.name.clone(), value);
        }
        sections
    }
}
