use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What a [`crate::template::Resolver`] was asked to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Template,
    Image,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Template => write!(f, "template"),
            AssetKind::Image => write!(f, "image"),
        }
    }
}

/// Errors that abort a badge or sign run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind} '{name}' does not exist")]
    Resolution { kind: AssetKind, name: String },

    #[error("cannot substitute template: {0}")]
    SubstitutionPrecondition(String),

    #[error("unable to render {}: {reason}", .input.display())]
    Render { input: PathBuf, reason: String },

    #[error("imposition failed: {0}")]
    Imposition(String),

    #[error("{0}")]
    InputValidation(String),

    #[error("{tool} executable '{program}' not found on PATH")]
    ToolNotFound { tool: &'static str, program: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}
