//! HTTP boundary - axum handlers, DTOs, and routes.
//!
//! Thin translation layer: DTOs in, use case handlers invoked, domain
//! error codes mapped to HTTP statuses. Authentication is delegated to an
//! upstream collaborator (see `auth`).

mod auth;
mod dto;
mod handlers;
mod routes;

pub use auth::{RequireActor, CAN_AUTHOR_HEADER, USER_ID_HEADER};
pub use dto::{
    AnswerOptionRequest, AnswerResponse, CreateSurveyRequest, ErrorResponse,
    NextQuestionResponse, QuestionRequest, SubmitAnswerRequest, SurveyResponse,
};
pub use handlers::ApiState;
pub use routes::{api_routes, survey_routes};
