use crate::config::error::ConfigError;
use crate::config::GeneratorConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const PROJECT_FILE: &str = "schemaforge.yml";

/// On-disk shape of `schemaforge.yml`.
#[derive(Debug, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    pub project_name: Option<String>,
    pub source_root: PathBuf,
    pub output_root: PathBuf,
}

/// Read the project file and resolve its roots.
///
/// `config_path` may point at the file itself or at the directory holding
/// it. Relative roots in the file resolve against the file's directory so
/// the CLI behaves the same from any working directory.
pub fn read_config(config_path: Option<PathBuf>) -> Result<GeneratorConfig, ConfigError> {
    let file_path = match config_path {
        Some(path) if path.is_dir() => path.join(PROJECT_FILE),
        Some(path) => path,
        None => PROJECT_FILE.into(),
    };

    if !file_path.exists() {
        return Err(ConfigError::incorrect_path(&file_path));
    }

    let file = fs::File::open(&file_path)?;
    let project: ProjectFile = serde_yaml::from_reader(file)?;

    let config_root = file_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(GeneratorConfig {
        source_root: resolve_path(&config_root, &project.source_root),
        output_root: resolve_path(&config_root, &project.output_root),
    })
}

fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
