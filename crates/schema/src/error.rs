use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// Malformed document structure, reported at the level where the shape
    /// broke down.
    #[error("document '{document}': {reason}")]
    Parse { document: String, reason: String },

    #[error("table '{table}', column '{column}': {reason}")]
    ColumnParse {
        table: String,
        column: String,
        reason: String,
    },

    /// A base type that is neither a builtin nor a registered enum.
    #[error("unknown type '{tag}' for column '{column}' in table '{table}'")]
    UnknownType {
        table: String,
        column: String,
        tag: String,
    },

    #[error("failed to read '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid yaml in '{document}'")]
    Yaml {
        document: String,
        #[source]
        source: serde_yaml::Error,
    },
}
