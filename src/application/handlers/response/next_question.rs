//! NextQuestionHandler - Progress resolver for a respondent's session.

use std::sync::Arc;

use crate::domain::foundation::{Actor, SurveyId};
use crate::domain::response::{Progress, ResponseError, SurveySession};
use crate::domain::survey::Question;
use crate::ports::{ResponseRepository, SurveyRepository};

/// Query for the next unanswered question in a survey.
#[derive(Debug, Clone)]
pub struct NextQuestionQuery {
    pub actor: Actor,
    pub survey_id: SurveyId,
}

/// Resolved progression state for the respondent's session.
#[derive(Debug, Clone)]
pub struct NextQuestionResult {
    /// Lowest-order unanswered question; None when completed or when the
    /// survey has no questions.
    pub question: Option<Question>,
    pub progress: Progress,
    pub is_completed: bool,
    pub session: SurveySession,
}

/// Handler resolving where a respondent is within a survey.
pub struct NextQuestionHandler {
    surveys: Arc<dyn SurveyRepository>,
    responses: Arc<dyn ResponseRepository>,
}

impl NextQuestionHandler {
    pub fn new(surveys: Arc<dyn SurveyRepository>, responses: Arc<dyn ResponseRepository>) -> Self {
        Self { surveys, responses }
    }

    pub async fn handle(
        &self,
        query: NextQuestionQuery,
    ) -> Result<NextQuestionResult, ResponseError> {
        // Missing and inactive surveys are indistinguishable here.
        let survey = self
            .surveys
            .find_active_by_id(&query.survey_id)
            .await
            .map_err(|e| ResponseError::infrastructure(e.message()))?
            .ok_or_else(|| ResponseError::survey_not_found(query.survey_id))?;

        // Reuses the unique incomplete session; creates it on first fetch.
        let session = self
            .responses
            .get_or_create_active_session(&query.actor.id, survey.id())
            .await?;

        let answered = self.responses.answered_question_ids(session.id()).await?;

        // Questions come back ascending by order; the first unanswered one
        // is the next question.
        let question = survey
            .questions()
            .iter()
            .find(|q| !answered.contains(q.id()))
            .cloned();

        let progress = Progress::new(answered.len() as u64, survey.question_count() as u64);
        let is_completed = progress.is_complete();

        Ok(NextQuestionResult {
            question: if is_completed { None } else { question },
            progress,
            is_completed,
            session,
        })
    }
}
