//! GetSurveyHandler - Query handler for retrieving one survey.

use std::sync::Arc;

use crate::domain::foundation::{Actor, SurveyId};
use crate::domain::survey::{Survey, SurveyError};
use crate::ports::SurveyRepository;

/// Query to fetch a survey with its questions and options.
#[derive(Debug, Clone)]
pub struct GetSurveyQuery {
    pub actor: Actor,
    pub survey_id: SurveyId,
}

/// Handler for retrieving survey details.
pub struct GetSurveyHandler {
    repository: Arc<dyn SurveyRepository>,
}

impl GetSurveyHandler {
    pub fn new(repository: Arc<dyn SurveyRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetSurveyQuery) -> Result<Survey, SurveyError> {
        let survey = self
            .repository
            .find_by_id(&query.survey_id)
            .await?
            .ok_or_else(|| SurveyError::not_found(query.survey_id))?;

        // A deactivated survey stays visible to its author only; everyone
        // else sees the same NotFound as for a missing survey.
        if !survey.is_active() && !survey.is_owner(&query.actor.id) {
            return Err(SurveyError::not_found(query.survey_id));
        }

        Ok(survey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::InMemorySurveyRepository;
    use crate::domain::foundation::{ErrorCode, UserId};

    fn owner() -> Actor {
        Actor::author(UserId::new("author-1").unwrap())
    }

    fn other() -> Actor {
        Actor::respondent(UserId::new("resp-1").unwrap())
    }

    fn survey(active: bool) -> Survey {
        let mut s = Survey::create(
            SurveyId::new(),
            owner().id,
            "Visible?".to_string(),
            vec![],
        )
        .unwrap();
        if !active {
            s.deactivate();
        }
        s
    }

    #[tokio::test]
    async fn active_survey_is_visible_to_anyone() {
        let s = survey(true);
        let repo = Arc::new(InMemorySurveyRepository::with(vec![s.clone()]));
        let handler = GetSurveyHandler::new(repo);

        let found = handler
            .handle(GetSurveyQuery {
                actor: other(),
                survey_id: *s.id(),
            })
            .await
            .unwrap();
        assert_eq!(found.id(), s.id());
    }

    #[tokio::test]
    async fn inactive_survey_is_not_found_for_non_owner() {
        let s = survey(false);
        let repo = Arc::new(InMemorySurveyRepository::with(vec![s.clone()]));
        let handler = GetSurveyHandler::new(repo);

        let err = handler
            .handle(GetSurveyQuery {
                actor: other(),
                survey_id: *s.id(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SurveyNotFound);
    }

    #[tokio::test]
    async fn inactive_survey_stays_visible_to_owner() {
        let s = survey(false);
        let repo = Arc::new(InMemorySurveyRepository::with(vec![s.clone()]));
        let handler = GetSurveyHandler::new(repo);

        let found = handler
            .handle(GetSurveyQuery {
                actor: owner(),
                survey_id: *s.id(),
            })
            .await
            .unwrap();
        assert!(!found.is_active());
    }

    #[tokio::test]
    async fn missing_survey_is_not_found() {
        let repo = Arc::new(InMemorySurveyRepository::new());
        let handler = GetSurveyHandler::new(repo);

        let err = handler
            .handle(GetSurveyQuery {
                actor: owner(),
                survey_id: SurveyId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SurveyNotFound);
    }
}
