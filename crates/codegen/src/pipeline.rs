//! The generation driver: loads documents, renders the three artifact
//! texts, and writes them under the output root.

use crate::class;
use crate::error::CodegenError;
use crate::idl;
use crate::sql;
use common::config::GeneratorConfig;
use schema::loader::ParsedDocument;
use schema::{SchemaDocument, SchemaLoader, TypeRegistry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// The three rendered texts for one document. Purely derived; rendering is
/// infallible once the document has resolved.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub document: String,
    pub sql: String,
    pub idl: String,
    pub class: String,
}

impl ArtifactSet {
    /// Output file name and contents per backend.
    pub fn files(&self) -> [(String, &str); 3] {
        [
            (format!("{}.sql", self.document), self.sql.as_str()),
            (format!("{}.proto", self.document), self.idl.as_str()),
            (format!("{}_class.rs", self.document), self.class.as_str()),
        ]
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, CodegenError)>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Generator {
    config: GeneratorConfig,
    loader: SchemaLoader,
    registry: TypeRegistry,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        let registry = TypeRegistry::new();
        Self {
            config,
            loader: SchemaLoader::new(registry.clone()),
            registry,
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn loader(&self) -> &SchemaLoader {
        &self.loader
    }

    pub fn render(&self, doc: &SchemaDocument) -> ArtifactSet {
        ArtifactSet {
            document: doc.name.clone(),
            sql: sql::render_document(doc),
            idl: idl::render_document(doc, &self.registry),
            class: class::render_document(doc, &self.registry),
        }
    }

    pub fn write(&self, artifacts: &ArtifactSet) -> Result<Vec<PathBuf>, CodegenError> {
        fs::create_dir_all(&self.config.output_root).map_err(|source| {
            CodegenError::ArtifactWrite {
                path: self.config.output_root.clone(),
                source,
            }
        })?;
        let mut written = Vec::with_capacity(3);
        for (file, contents) in artifacts.files() {
            let path = self.config.output_root.join(file);
            fs::write(&path, contents).map_err(|source| CodegenError::ArtifactWrite {
                path: path.clone(),
                source,
            })?;
            info!("wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    /// Compile one document end to end. All three artifacts are rendered
    /// before anything is written, so a parse or resolution failure leaves
    /// no partial output for the document.
    pub fn generate_path(&self, path: &Path) -> Result<Vec<PathBuf>, CodegenError> {
        let doc = self.loader.load_path(path)?;
        let artifacts = self.render(&doc);
        self.write(&artifacts)
    }

    /// Two-phase batch run: phase one parses every document and registers
    /// every enum it declares; phase two resolves and emits. Tables may
    /// therefore reference enums from any document in the batch, whatever
    /// the argument order. A failing document is recorded and skipped; the
    /// rest of the batch still generates.
    pub fn run(&self, paths: &[PathBuf]) -> RunSummary {
        self.execute(paths, true)
    }

    /// Same two phases as [`Generator::run`] but stops before writing
    /// anything, for validation-only invocations.
    pub fn check(&self, paths: &[PathBuf]) -> RunSummary {
        self.execute(paths, false)
    }

    fn execute(&self, paths: &[PathBuf], write: bool) -> RunSummary {
        let mut summary = RunSummary::default();

        let mut parsed: Vec<(PathBuf, ParsedDocument)> = Vec::with_capacity(paths.len());
        for path in paths {
            match self.loader.parse_path(path) {
                Ok(doc) => {
                    self.loader.register_enums(&doc);
                    parsed.push((path.clone(), doc));
                }
                Err(e) => summary.failures.push((path.clone(), e.into())),
            }
        }

        for (path, doc) in parsed {
            let result = doc
                .resolve(&self.registry)
                .map_err(CodegenError::from)
                .and_then(|doc| {
                    let artifacts = self.render(&doc);
                    if write {
                        self.write(&artifacts)
                    } else {
                        Ok(Vec::new())
                    }
                });
            match result {
                Ok(mut written) => summary.written.append(&mut written),
                Err(e) => summary.failures.push((path, e)),
            }
        }
        summary
    }
}
