use crate::commands::generate::{collect_documents, resolve_config};
use clap::Args;
use codegen::Generator;
use common::error::ForgeError;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema documents to validate; defaults to every .yml under the source root
    pub documents: Vec<PathBuf>,

    /// Directory scanned for documents when none are listed
    #[arg(long, value_name = "DIR")]
    pub source_root: Option<PathBuf>,
}

/// Parse and resolve the documents without writing artifacts.
pub fn handle_check(args: &CheckArgs, config_path: Option<PathBuf>) -> Result<(), ForgeError> {
    let config = resolve_config(args.source_root.as_deref(), None, config_path)?;
    let documents = collect_documents(&args.documents, &config);
    if documents.is_empty() {
        return Err(ForgeError::generate_msg(format!(
            "no schema documents found under '{}'",
            config.source_root.display()
        )));
    }

    let total = documents.len();
    let generator = Generator::new(config);
    let summary = generator.check(&documents);
    for (path, err) in &summary.failures {
        error!("{}: {}", path.display(), err);
    }
    if summary.is_success() {
        info!("{} documents ok", total);
        Ok(())
    } else {
        Err(ForgeError::generate_msg(format!(
            "{} of {} documents failed",
            summary.failures.len(),
            total
        )))
    }
}
