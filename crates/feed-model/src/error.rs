use thiserror::Error;

/// Failures that abort a whole compile cycle.
///
/// The previous snapshot stays published whenever one of these is returned.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("row source unavailable: {message}")]
    SourceUnavailable { message: String },

    #[error("failed to serialize feed: {message}")]
    Serialization { message: String },
}

impl FeedError {
    pub fn source_unavailable(message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Failures local to one product group. The group is skipped, the cycle continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupFailure {
    #[error("group {product_code} is missing required field {missing}")]
    Validation {
        product_code: String,
        missing: &'static str,
    },

    #[error("group {product_code} could not be built: {message}")]
    Build {
        product_code: String,
        message: String,
    },
}

impl GroupFailure {
    pub fn product_code(&self) -> &str {
        match self {
            Self::Validation { product_code, .. } | Self::Build { product_code, .. } => {
                product_code
            }
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
