//! Error types shared by every layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type used across the catalog.
///
/// Each variant carries enough context to render an HTTP response: the
/// status comes from [`status_code`](Self::status_code) and the stable
/// machine-readable code from [`error_code`](Self::error_code).
#[derive(Error, Debug)]
pub enum VitrineError {
    /// A read targeted a record that does not exist. Mutations never
    /// produce this; an unknown id there is a silent no-op.
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Request input failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A write collided with existing state, e.g. a duplicate key.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The database rejected or failed an operation.
    #[error("database error: {0}")]
    Database(String),

    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The cache backend failed. These are surfaced to the caller,
    /// never swallowed.
    #[error("cache error: {0}")]
    Cache(String),

    /// Anything that should not happen in normal operation.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapper for errors from code that reports through `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VitrineError {
    /// HTTP status this error renders as.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            _ => 500,
        }
    }

    /// Stable machine-readable code for API clients.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for VitrineError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // 1062 is MySQL's duplicate-key code, 23505 the SQLSTATE
                // equivalent.
                match db_err.code().as_deref() {
                    Some("1062" | "23505") => Self::Conflict(db_err.message().to_string()),
                    _ => Self::Database(err.to_string()),
                }
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for VitrineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {err}"))
    }
}

/// Error payload rendered in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    /// Present only for validation failures with per-field detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// One field's validation failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl ErrorResponse {
    /// Renders an error into the API payload shape.
    #[must_use]
    pub fn from_error(error: &VitrineError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    /// Attaches per-field validation detail.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&VitrineError> for ErrorResponse {
    fn from(error: &VitrineError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_variant_semantics() {
        assert_eq!(VitrineError::not_found("Product", 1).status_code(), 404);
        assert_eq!(VitrineError::validation("blank title").status_code(), 400);
        assert_eq!(VitrineError::conflict("duplicate").status_code(), 409);
        assert_eq!(VitrineError::Database("down".into()).status_code(), 500);
        assert_eq!(VitrineError::Cache("down".into()).status_code(), 500);
        assert_eq!(VitrineError::internal("oops").status_code(), 500);
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(
            VitrineError::not_found("Product", 1).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            VitrineError::validation("bad").error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(VitrineError::conflict("dup").error_code(), "CONFLICT");
        assert_eq!(
            VitrineError::Database("db".into()).error_code(),
            "DATABASE_ERROR"
        );
        assert_eq!(VitrineError::Cache("c".into()).error_code(), "CACHE_ERROR");
        assert_eq!(
            VitrineError::Configuration("c".into()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(VitrineError::internal("e").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn not_found_message_names_the_resource() {
        let err = VitrineError::not_found("Product", "123");
        assert!(err.to_string().contains("Product"));
        assert!(err.to_string().contains("123"));
    }

    #[test]
    fn response_payload_carries_code_and_message() {
        let err = VitrineError::not_found("Product", 1);
        let payload = ErrorResponse::from_error(&err);
        assert_eq!(payload.code, "NOT_FOUND");
        assert!(!payload.message.is_empty());
        assert!(payload.details.is_none());
    }

    #[test]
    fn details_attach_to_the_payload() {
        let payload = ErrorResponse::from_error(&VitrineError::validation("bad input"))
            .with_details(vec![FieldError {
                field: "title".to_string(),
                message: "must not be blank".to_string(),
                code: "not_blank".to_string(),
            }]);
        assert_eq!(payload.details.unwrap().len(), 1);
    }

    #[test]
    fn serde_json_errors_become_internal() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: VitrineError = json_err.into();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
