//! Compilation pipeline: template resolution, section parsing, substitution
//! and output

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::document::Document;
use crate::error::CompileError;
use crate::sections::{substitute, SectionParser, Sections, TagRegistry};
use crate::template::{resolve_inheritance, FsSource, TemplateSource};

/// Sections destined for one output file
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Output filename, relative to the output directory
    pub filename: String,
    pub sections: Sections,
}

/// A fully substituted output document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub filename: String,
    pub content: String,
}

/// Expands the page built from one input document into the pages to write
pub type Preprocessor = Box<dyn Fn(Page) -> Vec<Page>>;

/// Compiles input documents against the configured page template
pub struct Compiler {
    config: SiteConfig,
    source: Box<dyn TemplateSource>,
    registry: TagRegistry,
    preprocessor: Option<Preprocessor>,
    /// Output paths written so far, with the input each came from
    written: RefCell<HashMap<PathBuf, PathBuf>>,
}

impl std::fmt::Debug for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiler")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("preprocessor", &self.preprocessor.is_some())
            .finish()
    }
}

impl Compiler {
    /// Create a compiler reading templates from `config.template_dir`
    ///
    /// The configured static sections are registered as tags.
    pub fn new(config: SiteConfig) -> Result<Self, CompileError> {
        let mut registry = TagRegistry::new();
        config.register_sections(&mut registry)?;
        let source = FsSource::with_base_path(config.template_dir.clone());

        Ok(Self {
            config,
            source: Box::new(source),
            registry,
            preprocessor: None,
            written: RefCell::new(HashMap::new()),
        })
    }

    /// Read templates from another source
    pub fn with_source(mut self, source: impl TemplateSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Install a preprocessor for pages built from input documents
    pub fn with_preprocessor<F>(mut self, preprocessor: F) -> Self
    where
        F: Fn(Page) -> Vec<Page> + 'static,
    {
        self.preprocessor = Some(Box::new(preprocessor));
        self
    }

    /// Register a tag function, run after all previously registered tags
    pub fn register_tag<F>(
        &mut self,
        name: impl Into<String>,
        function: F,
    ) -> Result<(), CompileError>
    where
        F: Fn(&Sections) -> String + 'static,
    {
        Ok(self.registry.register(name, function)?)
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    /// The source templates are read from
    pub fn source(&self) -> &dyn TemplateSource {
        self.source.as_ref()
    }

    /// Read the configured page template and resolve its inheritance
    pub fn resolve_template(&self) -> Result<String, CompileError> {
        let name = self.config.template.as_str();
        let template = Document::new(name, self.source.read(name)?);
        resolve_inheritance(&template, self.source.as_ref())
    }

    /// Build the pages for one input document
    pub fn pages(&self, doc: &Document) -> Vec<Page> {
        let sections = SectionParser::with_registry(&self.registry).parse(doc, true);
        let page = Page {
            filename: self.config.output_filename(doc.filename()),
            sections,
        };
        match &self.preprocessor {
            Some(preprocess) => preprocess(page),
            None => vec![page],
        }
    }

    /// Substitute one input document into an already resolved template
    pub fn render(&self, template: &str, doc: &Document) -> Vec<RenderedPage> {
        self.pages(doc)
            .into_iter()
            .map(|page| RenderedPage {
                content: substitute(template, &page.sections),
                filename: page.filename,
            })
            .collect()
    }

    /// Resolve the page template and render one input document
    pub fn compile_document(&self, doc: &Document) -> Result<Vec<RenderedPage>, CompileError> {
        let template = self.resolve_template()?;
        Ok(self.render(&template, doc))
    }

    /// Compile one input file and write its output files
    ///
    /// Returns the paths written. Fails without writing anything when an
    /// output path was already written for a different input file.
    pub fn compile_file(&self, path: &Path) -> Result<Vec<PathBuf>, CompileError> {
        log::info!("processing {}", path.display());
        let template = self.resolve_template()?;
        let text = fs::read_to_string(path).map_err(|e| CompileError::read(path, e))?;
        let doc = Document::new(path.display().to_string(), text);

        let pages = self.render(&template, &doc);
        for page in &pages {
            self.claim_output(&self.config.output_dir.join(&page.filename), path)?;
        }
        pages.iter().map(|page| self.write_page(page)).collect()
    }

    /// Compile input files in order, stopping at the first error
    pub fn compile_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Result<Vec<PathBuf>, CompileError> {
        let mut written = Vec::new();
        for path in paths {
            written.extend(self.compile_file(path.as_ref())?);
        }
        Ok(written)
    }

    /// Record `output` as produced by `input`, rejecting a second input
    fn claim_output(&self, output: &Path, input: &Path) -> Result<(), CompileError> {
        let mut written = self.written.borrow_mut();
        match written.get(output) {
            Some(first) if first != input => Err(CompileError::OutputCollision {
                output: output.to_path_buf(),
                first: first.clone(),
                second: input.to_path_buf(),
            }),
            _ => {
                written.insert(output.to_path_buf(), input.to_path_buf());
                Ok(())
            }
        }
    }

    fn write_page(&self, page: &RenderedPage) -> Result<PathBuf, CompileError> {
        let dir = &self.config.output_dir;
        fs::create_dir_all(dir).map_err(|e| CompileError::write(dir, e))?;

        let path = dir.join(&page.filename);
        fs::write(&path, &page.content).map_err(|e| CompileError::write(&path, e))?;
        log::info!("wrote {}", path.display());
        Ok(path)
    }
}
