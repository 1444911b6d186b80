//! HTTP handlers for the survey endpoints.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    CreateSurveyCommand, CreateSurveyHandler, GetSurveyHandler, GetSurveyQuery,
    ListSurveysHandler, ListSurveysQuery, NextQuestionHandler, NextQuestionQuery,
    SubmitAnswerCommand, SubmitAnswerHandler, SurveyStatisticsHandler, SurveyStatisticsQuery,
};
use crate::domain::foundation::{
    AnswerOptionId, ErrorCode, QuestionId, SurveyId,
};

use super::auth::RequireActor;
use super::dto::{
    AnswerResponse, CreateSurveyRequest, ErrorResponse, NextQuestionResponse,
    SubmitAnswerRequest, SurveyResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// All use case handlers the HTTP boundary dispatches to.
#[derive(Clone)]
pub struct ApiState {
    pub create_survey: Arc<CreateSurveyHandler>,
    pub list_surveys: Arc<ListSurveysHandler>,
    pub get_survey: Arc<GetSurveyHandler>,
    pub next_question: Arc<NextQuestionHandler>,
    pub submit_answer: Arc<SubmitAnswerHandler>,
    pub survey_statistics: Arc<SurveyStatisticsHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/surveys - Create a survey
pub async fn create_survey(
    State(state): State<ApiState>,
    RequireActor(actor): RequireActor,
    Json(req): Json<CreateSurveyRequest>,
) -> Response {
    let cmd = CreateSurveyCommand {
        actor,
        title: req.title,
        questions: req.questions.into_iter().map(Into::into).collect(),
    };

    match state.create_survey.handle(cmd).await {
        Ok(survey) => {
            (StatusCode::CREATED, Json(SurveyResponse::from(&survey))).into_response()
        }
        Err(e) => error_response(e.code(), e.message()),
    }
}

/// GET /api/surveys - List surveys visible to the caller
pub async fn list_surveys(
    State(state): State<ApiState>,
    RequireActor(actor): RequireActor,
) -> Response {
    match state.list_surveys.handle(ListSurveysQuery { actor }).await {
        Ok(surveys) => {
            let body: Vec<SurveyResponse> = surveys.iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(e.code(), e.message()),
    }
}

/// GET /api/surveys/:id - Fetch one survey
pub async fn get_survey(
    State(state): State<ApiState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
) -> Response {
    let survey_id = match parse_id::<SurveyId>(&id, "survey id") {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match state
        .get_survey
        .handle(GetSurveyQuery { actor, survey_id })
        .await
    {
        Ok(survey) => (StatusCode::OK, Json(SurveyResponse::from(&survey))).into_response(),
        Err(e) => error_response(e.code(), e.message()),
    }
}

/// GET /api/surveys/:id/next-question - Resolve the respondent's next question
pub async fn next_question(
    State(state): State<ApiState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
) -> Response {
    let survey_id = match parse_id::<SurveyId>(&id, "survey id") {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match state
        .next_question
        .handle(NextQuestionQuery { actor, survey_id })
        .await
    {
        Ok(result) => {
            (StatusCode::OK, Json(NextQuestionResponse::from(&result))).into_response()
        }
        Err(e) => error_response(e.code(), e.message()),
    }
}

/// POST /api/surveys/:id/submit-answer - Record one answer
pub async fn submit_answer(
    State(state): State<ApiState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Response {
    let survey_id = match parse_id::<SurveyId>(&id, "survey id") {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let cmd = SubmitAnswerCommand {
        actor,
        survey_id,
        question_id: QuestionId::from_uuid(req.question_id),
        answer_option_id: AnswerOptionId::from_uuid(req.answer_option_id),
    };

    match state.submit_answer.handle(cmd).await {
        Ok(answer) => {
            let body = AnswerResponse {
                id: *answer.id().as_uuid(),
                session_id: *answer.session_id().as_uuid(),
                question_id: *answer.question_id().as_uuid(),
                answer_option_id: *answer.selected_option_id().as_uuid(),
                answered_at: answer.answered_at().to_string(),
            };
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(e) => error_response(e.code(), e.message()),
    }
}

/// GET /api/surveys/:id/statistics - Owner-only aggregated statistics
pub async fn survey_statistics(
    State(state): State<ApiState>,
    RequireActor(actor): RequireActor,
    Path(id): Path<String>,
) -> Response {
    let survey_id = match parse_id::<SurveyId>(&id, "survey id") {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match state
        .survey_statistics
        .handle(SurveyStatisticsQuery { actor, survey_id })
        .await
    {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => error_response(e.code(), e.to_string()),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error translation
// ════════════════════════════════════════════════════════════════════════════

/// Maps domain error codes onto HTTP statuses.
pub fn error_response(code: ErrorCode, message: String) -> Response {
    let status = match code {
        ErrorCode::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::SurveyNotFound
        | ErrorCode::QuestionNotFound
        | ErrorCode::AnswerOptionNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(%code, %message, "request failed");
    }

    // Server-side detail stays out of 5xx bodies.
    let body = if status.is_server_error() {
        "Internal server error".to_string()
    } else {
        message
    };

    (
        status,
        Json(ErrorResponse {
            error: body,
            code: code.to_string(),
        }),
    )
        .into_response()
}

fn parse_id<T: FromStr<Err = uuid::Error>>(raw: &str, what: &str) -> Result<T, Response> {
    raw.parse::<T>().map_err(|_| {
        error_response(
            ErrorCode::ValidationFailed,
            format!("Invalid {}: {}", what, raw),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_422() {
        let resp = error_response(ErrorCode::ValidationFailed, "bad".to_string());
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn not_found_maps_to_404() {
        let resp = error_response(ErrorCode::SurveyNotFound, "gone".to_string());
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let resp = error_response(ErrorCode::Forbidden, "no".to_string());
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn conflict_maps_to_409() {
        let resp = error_response(ErrorCode::Conflict, "dup".to_string());
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let resp = error_response(ErrorCode::DatabaseError, "secret detail".to_string());
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_uuid_is_rejected() {
        assert!(parse_id::<SurveyId>("not-a-uuid", "survey id").is_err());
    }

    #[test]
    fn good_uuid_parses() {
        let id = SurveyId::new();
        let parsed: SurveyId = parse_id(&id.to_string(), "survey id").unwrap();
        assert_eq!(parsed, id);
    }
}
