use clap::Args;
use common::error::ForgeError;
use schema::{SchemaLoader, TypeRegistry};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Documents to inspect; enum documents listed anywhere register first
    pub documents: Vec<PathBuf>,
}

/// Print the resolved metadata of every table and enum in the given
/// documents as pretty JSON, keyed by declaration name.
pub fn handle_inspect(args: &InspectArgs) -> Result<(), ForgeError> {
    if args.documents.is_empty() {
        return Err(ForgeError::generate_msg("no documents to inspect"));
    }

    let loader = SchemaLoader::new(TypeRegistry::new());
    let mut parsed = Vec::with_capacity(args.documents.len());
    for path in &args.documents {
        let doc = loader.parse_path(path).map_err(ForgeError::generate)?;
        loader.register_enums(&doc);
        parsed.push(doc);
    }

    let mut report = serde_json::Map::new();
    for doc in &parsed {
        let resolved = doc.resolve(loader.registry()).map_err(ForgeError::generate)?;
        for def in resolved.enums() {
            report.insert(def.name.clone(), json!({ "members": def.members }));
        }
        for table in resolved.tables() {
            report.insert(table.name.clone(), table.describe());
        }
    }

    let rendered =
        serde_json::to_string_pretty(&Value::Object(report)).map_err(ForgeError::generate)?;
    println!("{rendered}");
    Ok(())
}
