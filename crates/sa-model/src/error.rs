//! Error types for the sa-model crate.

use sa_core::SchemaError;
use sa_render::TypeError;

/// Errors that can occur during a generation run.
///
/// The run has no retry policy: any of these aborts the export and no
/// partial output is delivered.
///
/// # Examples
///
/// ```
/// use sa_model::GenerateError;
/// use sa_render::TypeError;
///
/// let err = GenerateError::from(TypeError::unsupported("location", "POINT"));
/// assert!(err.to_string().contains("POINT"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A column's type could not be resolved.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// The schema snapshot is structurally inconsistent.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Delivering the generated text to a sink failed.
    #[error("failed to deliver output: {0}")]
    Io(#[from] std::io::Error),
}
