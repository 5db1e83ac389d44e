//! Error types for the content layer

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading content
#[derive(Error, Debug)]
pub enum ContentError {
    /// The content directory itself could not be opened or enumerated
    #[error("content source unavailable at {path:?}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single post exists but its front-matter is malformed
    #[error("failed to parse post `{slug}`: {source}")]
    Parse {
        slug: String,
        #[source]
        source: ParseError,
    },

    /// A single post exists but could not be read
    #[error("failed to read post `{slug}`: {source}")]
    Read {
        slug: String,
        #[source]
        source: io::Error,
    },
}

impl ContentError {
    /// Slug of the offending post, if the error is scoped to one
    pub fn slug(&self) -> Option<&str> {
        match self {
            ContentError::SourceUnavailable { .. } => None,
            ContentError::Parse { slug, .. } | ContentError::Read { slug, .. } => Some(slug),
        }
    }
}

/// Front-matter parse failures
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("missing front-matter block")]
    MissingFrontMatter,

    #[error("front-matter block is not closed with `---`")]
    UnterminatedFrontMatter,

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid date `{0}`")]
    InvalidDate(String),
}
