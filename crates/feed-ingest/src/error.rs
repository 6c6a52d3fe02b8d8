use std::path::PathBuf;

use feed_model::FeedError;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read sheet {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("sheet {sheet} has no `{column}` column")]
    MissingColumn { sheet: String, column: &'static str },

    #[error("{0}")]
    Unavailable(String),
}

impl SourceError {
    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

impl From<SourceError> for FeedError {
    fn from(error: SourceError) -> Self {
        FeedError::source_unavailable(error.to_string())
    }
}
