//! SubmitAnswerHandler - Records one answer, detecting completion.

use std::sync::Arc;

use crate::domain::foundation::{Actor, AnswerOptionId, QuestionId, SurveyId};
use crate::domain::response::{ResponseError, UserAnswer};
use crate::ports::{RecordAnswer, ResponseRepository, SurveyRepository};

/// Command to submit (or change) an answer to one question.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub actor: Actor,
    pub survey_id: SurveyId,
    pub question_id: QuestionId,
    pub answer_option_id: AnswerOptionId,
}

/// Handler recording answers and flipping session completion.
pub struct SubmitAnswerHandler {
    surveys: Arc<dyn SurveyRepository>,
    responses: Arc<dyn ResponseRepository>,
}

impl SubmitAnswerHandler {
    pub fn new(surveys: Arc<dyn SurveyRepository>, responses: Arc<dyn ResponseRepository>) -> Self {
        Self { surveys, responses }
    }

    pub async fn handle(&self, cmd: SubmitAnswerCommand) -> Result<UserAnswer, ResponseError> {
        // Missing and inactive surveys are indistinguishable.
        let survey = self
            .surveys
            .find_active_by_id(&cmd.survey_id)
            .await
            .map_err(|e| ResponseError::infrastructure(e.message()))?
            .ok_or_else(|| ResponseError::survey_not_found(cmd.survey_id))?;

        // The question must belong to this survey, the option to that
        // question. The repository re-checks both inside its transaction.
        let question = survey
            .question(&cmd.question_id)
            .ok_or_else(|| {
                ResponseError::question_not_in_survey(cmd.question_id, cmd.survey_id)
            })?;
        question.option(&cmd.answer_option_id).ok_or_else(|| {
            ResponseError::option_not_in_question(cmd.answer_option_id, cmd.question_id)
        })?;

        let answer = self
            .responses
            .record_answer(RecordAnswer {
                user_id: cmd.actor.id.clone(),
                survey_id: cmd.survey_id,
                question_id: cmd.question_id,
                selected_option_id: cmd.answer_option_id,
            })
            .await?;

        Ok(answer)
    }
}
