use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Top-level error surfaced by the CLI entry points.
#[derive(Debug)]
pub enum ForgeError {
    Config(Box<dyn Error + Send + Sync>),   // carries *why* configuration failed
    Generate(Box<dyn Error + Send + Sync>), // carries *why* generation failed
}

impl ForgeError {
    pub fn config(e: impl Error + Send + Sync + 'static) -> Self {
        Self::Config(Box::new(e))
    }

    pub fn generate(e: impl Error + Send + Sync + 'static) -> Self {
        Self::Generate(Box::new(e))
    }

    pub fn generate_msg(msg: impl Into<String>) -> Self {
        Self::Generate(msg.into().into())
    }
}

impl Display for ForgeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ForgeError::Config(e) => write!(f, "configuration failed: {e}"),
            ForgeError::Generate(e) => write!(f, "generation failed: {e}"),
        }
    }
}

impl Error for ForgeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ForgeError::Config(e) => Some(&**e),
            ForgeError::Generate(e) => Some(&**e),
        }
    }
}
