use std::fmt;

use thiserror::Error;

/// Failure to turn catalog data into a consistent set of records.
///
/// Any of these aborts the whole load; a catalog is never partially built.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Failed to read {source_name}: {source}")]
    Unreadable {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {source_name} structure: {reason}")]
    Malformed { source_name: String, reason: String },

    #[error("{source_name} record {index} missing required '{key}' field")]
    MissingKey {
        source_name: String,
        index: usize,
        key: &'static str,
    },

    #[error("Duplicate {key} '{value}' in {source_name}")]
    DuplicateKey {
        source_name: String,
        key: &'static str,
        value: String,
    },
}

/// Pipeline stage that produced a [`PipelineError::TransformFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decode,
    Quantize,
    Remap,
    Encode,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Decode => "decode",
            Stage::Quantize => "quantize",
            Stage::Remap => "remap",
            Stage::Encode => "encode",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

/// Underlying library error behind a failed stage.
#[derive(Debug, Error)]
pub enum TransformCause {
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Png(#[from] png::EncodingError),

    #[error(transparent)]
    Dither(#[from] eink_dither::DitherError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Catalog error: {0}")]
    CatalogLoad(#[from] CatalogLoadError),

    #[error("Model '{0}' not found in models data")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{stage} stage failed ({context}): {source}")]
    TransformFailure {
        stage: Stage,
        context: String,
        #[source]
        source: TransformCause,
    },
}

impl PipelineError {
    pub fn invalid(message: impl Into<String>) -> Self {
        PipelineError::InvalidInput(message.into())
    }

    /// Wrap a library error with the stage it interrupted.
    pub fn transform(
        stage: Stage,
        context: impl Into<String>,
        source: impl Into<TransformCause>,
    ) -> Self {
        PipelineError::TransformFailure {
            stage,
            context: context.into(),
            source: source.into(),
        }
    }

    /// The failed stage, if this is a transform failure.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::TransformFailure { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
