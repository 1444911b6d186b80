//! HTTP DTOs for the survey endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::NextQuestionResult;
use crate::domain::survey::{AnswerOption, AnswerOptionDraft, Question, QuestionDraft, Survey};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a survey with nested questions and options.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSurveyRequest {
    pub title: String,
    #[serde(default)]
    pub questions: Vec<QuestionRequest>,
}

/// One question in a create request.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRequest {
    pub text: String,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub answer_options: Vec<AnswerOptionRequest>,
}

/// One answer option in a create request.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerOptionRequest {
    pub text: String,
    #[serde(default)]
    pub order: Option<u32>,
}

impl From<QuestionRequest> for QuestionDraft {
    fn from(req: QuestionRequest) -> Self {
        QuestionDraft {
            text: req.text,
            order: req.order,
            options: req
                .answer_options
                .into_iter()
                .map(|o| AnswerOptionDraft {
                    text: o.text,
                    order: o.order,
                })
                .collect(),
        }
    }
}

/// Request body for answer submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_id: Uuid,
    pub answer_option_id: Uuid,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Error payload returned for all failed requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// An answer option in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOptionResponse {
    pub id: Uuid,
    pub text: String,
    pub order: u32,
}

/// A question with its options in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: Uuid,
    pub text: String,
    pub order: u32,
    pub answer_options: Vec<AnswerOptionResponse>,
}

/// A survey with its nested questions in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyResponse {
    pub id: Uuid,
    pub title: String,
    pub author_id: String,
    pub is_active: bool,
    pub question_count: usize,
    pub questions: Vec<QuestionResponse>,
    pub created_at: String,
    pub updated_at: String,
}

/// Progress block in next-question responses.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    pub answered: u64,
    pub total: u64,
    pub percentage: f64,
}

/// Response for the next-question endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct NextQuestionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionResponse>,
    pub progress: ProgressResponse,
    pub is_completed: bool,
    pub session_id: Uuid,
}

/// Response for a recorded answer.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub id: Uuid,
    pub session_id: Uuid,
    pub question_id: Uuid,
    pub answer_option_id: Uuid,
    pub answered_at: String,
}

impl From<&AnswerOption> for AnswerOptionResponse {
    fn from(option: &AnswerOption) -> Self {
        Self {
            id: *option.id().as_uuid(),
            text: option.text().to_string(),
            order: option.order(),
        }
    }
}

impl From<&Question> for QuestionResponse {
    fn from(question: &Question) -> Self {
        Self {
            id: *question.id().as_uuid(),
            text: question.text().to_string(),
            order: question.order(),
            answer_options: question.options().iter().map(Into::into).collect(),
        }
    }
}

impl From<&Survey> for SurveyResponse {
    fn from(survey: &Survey) -> Self {
        Self {
            id: *survey.id().as_uuid(),
            title: survey.title().to_string(),
            author_id: survey.author_id().to_string(),
            is_active: survey.is_active(),
            question_count: survey.question_count(),
            questions: survey.questions().iter().map(Into::into).collect(),
            created_at: survey.created_at().to_string(),
            updated_at: survey.updated_at().to_string(),
        }
    }
}

impl From<&NextQuestionResult> for NextQuestionResponse {
    fn from(result: &NextQuestionResult) -> Self {
        Self {
            question: result.question.as_ref().map(Into::into),
            progress: ProgressResponse {
                answered: result.progress.answered,
                total: result.progress.total,
                percentage: result.progress.percentage,
            },
            is_completed: result.is_completed,
            session_id: *result.session.id().as_uuid(),
        }
    }
}
