//! Response-side error types (sessions, answers).

use crate::domain::foundation::{AnswerOptionId, ErrorCode, QuestionId, SurveyId};

/// Errors raised by the progress resolver and answer recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// Survey missing or inactive; the two are deliberately indistinguishable.
    SurveyNotFound(SurveyId),
    /// Question exists but is not part of the given survey, or does not exist.
    QuestionNotInSurvey {
        question_id: QuestionId,
        survey_id: SurveyId,
    },
    /// Option exists but is not one of the question's options, or does not exist.
    OptionNotInQuestion {
        option_id: AnswerOptionId,
        question_id: QuestionId,
    },
    /// Session state transition that is not allowed.
    InvalidState(String),
    /// Storage uniqueness violation outside the upsert path.
    Conflict(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl ResponseError {
    pub fn survey_not_found(id: SurveyId) -> Self {
        ResponseError::SurveyNotFound(id)
    }

    pub fn question_not_in_survey(question_id: QuestionId, survey_id: SurveyId) -> Self {
        ResponseError::QuestionNotInSurvey {
            question_id,
            survey_id,
        }
    }

    pub fn option_not_in_question(option_id: AnswerOptionId, question_id: QuestionId) -> Self {
        ResponseError::OptionNotInQuestion {
            option_id,
            question_id,
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        ResponseError::InvalidState(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ResponseError::Conflict(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ResponseError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ResponseError::SurveyNotFound(_) => ErrorCode::SurveyNotFound,
            ResponseError::QuestionNotInSurvey { .. } => ErrorCode::ValidationFailed,
            ResponseError::OptionNotInQuestion { .. } => ErrorCode::ValidationFailed,
            ResponseError::InvalidState(_) => ErrorCode::ValidationFailed,
            ResponseError::Conflict(_) => ErrorCode::Conflict,
            ResponseError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ResponseError::SurveyNotFound(id) => {
                format!("Survey not found or inactive: {}", id)
            }
            ResponseError::QuestionNotInSurvey {
                question_id,
                survey_id,
            } => format!(
                "Question {} does not belong to survey {}",
                question_id, survey_id
            ),
            ResponseError::OptionNotInQuestion {
                option_id,
                question_id,
            } => format!(
                "Answer option {} does not belong to question {}",
                option_id, question_id
            ),
            ResponseError::InvalidState(msg) => format!("Invalid state: {}", msg),
            ResponseError::Conflict(msg) => format!("Conflict: {}", msg),
            ResponseError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ResponseError {}
