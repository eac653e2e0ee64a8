//! Error types for mcmaker-edit.
//!
//! Errors split into two exit-code classes:
//! - Rejections (exit code 2): invalid arguments and collisions
//! - Runtime errors (exit code 1): unreadable sources, encoding, output writes

use mcmaker_render::RenderError;
use thiserror::Error;

/// The top-level error type for builder operations.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A required parameter was missing or empty.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The operation's source content could not be read.
    #[error("read {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// The operation would overwrite content that is already set.
    #[error("collision: {0}")]
    Conflict(#[from] ConflictError),

    /// Pruning left nothing to render.
    #[error("empty machineconfig")]
    EmptyDocument,

    #[error("render: {0}")]
    Render(RenderError),

    #[error("write output: {0}")]
    Write(#[source] std::io::Error),
}

/// Duplicate submissions caught by the merge rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictError {
    #[error("unit contents collision for {unit}")]
    UnitContents { unit: String },

    #[error("drop-in name collision for {dropin} in {unit}")]
    DropinName { unit: String, dropin: String },
}

impl From<RenderError> for BuildError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Empty => BuildError::EmptyDocument,
            other => BuildError::Render(other),
        }
    }
}

impl BuildError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        BuildError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by the caller's input rather than the environment.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            BuildError::InvalidArgument { .. } | BuildError::Conflict(_)
        )
    }

    /// Returns the recommended exit code for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_rejection() { 2 } else { 1 }
    }
}

/// Result type alias using BuildError.
pub type BuildResult<T> = Result<T, BuildError>;
