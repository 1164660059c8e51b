pub mod error;
pub mod loader;

use std::path::PathBuf;

/// Resolved generator settings handed to the driver.
///
/// Both roots are explicit; nothing is discovered from process state. The
/// source root is where schema documents live, the output root is where the
/// SQL/proto/class artifacts are written.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub source_root: PathBuf,
    pub output_root: PathBuf,
}

impl GeneratorConfig {
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(".", ".")
    }
}
