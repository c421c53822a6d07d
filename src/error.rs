use std::fmt;

use thiserror::Error;

use crate::tags::Position;

/// Diagnostic reported when the syntax tree of a file cannot be built cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub message: String,
    pub position: Position,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.position.line, self.position.column, self.message
        )
    }
}

#[derive(Error, Debug)]
pub enum TagsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{failure}")]
    Parse { path: String, failure: ParseFailure },

    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),

    #[error("Grammar error: {0}")]
    Grammar(String),

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Invalid exclude pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TagsError {
    /// True for failures that only affect a single file or path of a batch.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            TagsError::Parse { .. }
                | TagsError::Read { .. }
                | TagsError::UnsupportedLanguage(_)
                | TagsError::Walk(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TagsError>;
