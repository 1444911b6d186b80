//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the survey domain.

mod actor;
mod errors;
mod ids;
mod timestamp;

pub use actor::Actor;
pub use errors::{ErrorCode, ValidationError};
pub use ids::{AnswerId, AnswerOptionId, QuestionId, SessionId, SurveyId, UserId};
pub use timestamp::Timestamp;
