//! Survey-specific error types.

use crate::domain::foundation::{ErrorCode, SurveyId, ValidationError};

/// Errors raised by the survey authoring use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyError {
    /// Survey was not found, or is inactive where activity is required.
    NotFound(SurveyId),
    /// Actor lacks the required capability or ownership.
    Forbidden,
    /// Input failed domain validation.
    ValidationFailed { field: String, message: String },
    /// Storage-level uniqueness violation outside the upsert path.
    Conflict(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl SurveyError {
    pub fn not_found(id: SurveyId) -> Self {
        SurveyError::NotFound(id)
    }

    pub fn forbidden() -> Self {
        SurveyError::Forbidden
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SurveyError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        SurveyError::Conflict(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SurveyError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SurveyError::NotFound(_) => ErrorCode::SurveyNotFound,
            SurveyError::Forbidden => ErrorCode::Forbidden,
            SurveyError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SurveyError::Conflict(_) => ErrorCode::Conflict,
            SurveyError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SurveyError::NotFound(id) => format!("Survey not found or inactive: {}", id),
            SurveyError::Forbidden => "Permission denied".to_string(),
            SurveyError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SurveyError::Conflict(msg) => format!("Conflict: {}", msg),
            SurveyError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SurveyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SurveyError {}

impl From<ValidationError> for SurveyError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::TooLong { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
            ValidationError::DuplicateOrder { field, .. } => field.clone(),
        };
        SurveyError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_taxonomy() {
        assert_eq!(
            SurveyError::not_found(SurveyId::new()).code(),
            ErrorCode::SurveyNotFound
        );
        assert_eq!(SurveyError::forbidden().code(), ErrorCode::Forbidden);
        assert_eq!(
            SurveyError::validation("title", "empty").code(),
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            SurveyError::conflict("duplicate").code(),
            ErrorCode::Conflict
        );
    }

    #[test]
    fn validation_error_converts_with_field() {
        let err: SurveyError = ValidationError::empty_field("title").into();
        match err {
            SurveyError::ValidationFailed { field, .. } => assert_eq!(field, "title"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
