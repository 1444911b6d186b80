//! HTTP routes for the survey endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_survey, get_survey, list_surveys, next_question, submit_answer, survey_statistics,
    ApiState,
};

/// Creates the survey router with all endpoints.
pub fn survey_routes(state: ApiState) -> Router {
    Router::new()
        .route("/", post(create_survey))
        .route("/", get(list_surveys))
        .route("/:id", get(get_survey))
        .route("/:id/next-question", get(next_question))
        .route("/:id/submit-answer", post(submit_answer))
        .route("/:id/statistics", get(survey_statistics))
        .with_state(state)
}

/// Full API router, nested under /api.
pub fn api_routes(state: ApiState) -> Router {
    Router::new().nest("/api/surveys", survey_routes(state))
}
