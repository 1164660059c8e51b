use clap::Args;
use codegen::Generator;
use common::config::loader::{read_config, PROJECT_FILE};
use common::config::GeneratorConfig;
use common::error::ForgeError;
use common::utils::paths_with_ext;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Schema documents to compile; defaults to every .yml under the source root
    pub documents: Vec<PathBuf>,

    /// Directory scanned for documents when none are listed
    #[arg(long, value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    /// Directory the artifacts are written to
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Compile every requested document, regenerating all three artifacts per
/// document. Failures are reported per document; any failure makes the
/// whole invocation exit non-zero.
pub fn handle_generate(args: &GenerateArgs, config_path: Option<PathBuf>) -> Result<(), ForgeError> {
    let config = resolve_config(
        args.source_root.as_deref(),
        args.out_dir.as_deref(),
        config_path,
    )?;
    let documents = collect_documents(&args.documents, &config);
    if documents.is_empty() {
        return Err(ForgeError::generate_msg(format!(
            "no schema documents found under '{}'",
            config.source_root.display()
        )));
    }

    let total = documents.len();
    let generator = Generator::new(config);
    let summary = generator.run(&documents);
    for (path, err) in &summary.failures {
        error!("{}: {}", path.display(), err);
    }
    if summary.is_success() {
        info!(
            "generated {} artifacts from {} documents",
            summary.written.len(),
            total
        );
        Ok(())
    } else {
        Err(ForgeError::generate_msg(format!(
            "{} of {} documents failed",
            summary.failures.len(),
            total
        )))
    }
}

/// Settings precedence: explicit flags beat the project file, which beats
/// the defaults. The project file is only required when `-c` names it.
pub(crate) fn resolve_config(
    source_root: Option<&Path>,
    out_dir: Option<&Path>,
    config_path: Option<PathBuf>,
) -> Result<GeneratorConfig, ForgeError> {
    let base = match &config_path {
        Some(_) => read_config(config_path).map_err(ForgeError::config)?,
        None if Path::new(PROJECT_FILE).exists() => {
            read_config(None).map_err(ForgeError::config)?
        }
        None => GeneratorConfig::default(),
    };
    Ok(GeneratorConfig {
        source_root: source_root.map(Path::to_path_buf).unwrap_or(base.source_root),
        output_root: out_dir.map(Path::to_path_buf).unwrap_or(base.output_root),
    })
}

pub(crate) fn collect_documents(explicit: &[PathBuf], config: &GeneratorConfig) -> Vec<PathBuf> {
    if explicit.is_empty() {
        paths_with_ext(&config.source_root, "yml")
    } else {
        explicit.to_vec()
    }
}
