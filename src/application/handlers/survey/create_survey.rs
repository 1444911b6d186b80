//! CreateSurveyHandler - Command handler for authoring a new survey.

use std::sync::Arc;

use crate::domain::foundation::{Actor, SurveyId};
use crate::domain::survey::{QuestionDraft, Survey, SurveyError};
use crate::ports::SurveyRepository;

/// Command to create a survey with nested questions and options.
#[derive(Debug, Clone)]
pub struct CreateSurveyCommand {
    pub actor: Actor,
    pub title: String,
    pub questions: Vec<QuestionDraft>,
}

/// Handler for survey creation.
pub struct CreateSurveyHandler {
    repository: Arc<dyn SurveyRepository>,
}

impl CreateSurveyHandler {
    pub fn new(repository: Arc<dyn SurveyRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateSurveyCommand) -> Result<Survey, SurveyError> {
        // 1. Capability check: only authors create surveys
        cmd.actor
            .require_author()
            .map_err(|_| SurveyError::forbidden())?;

        // 2. Build the aggregate; all structural validation happens here
        let survey = Survey::create(
            SurveyId::new(),
            cmd.actor.id.clone(),
            cmd.title,
            cmd.questions,
        )?;

        // 3. Persist atomically: survey + questions + options or nothing
        self.repository.create(&survey).await?;

        tracing::info!(
            survey_id = %survey.id(),
            author = %survey.author_id(),
            questions = survey.question_count(),
            "survey created"
        );

        Ok(survey)
    }
}
