//! Result alias used throughout the workspace.

use crate::VitrineError;

/// Shorthand for `Result<T, VitrineError>`.
pub type VitrineResult<T> = Result<T, VitrineError>;
