//! ListSurveysHandler - Query handler for browsing surveys.

use std::sync::Arc;

use crate::domain::foundation::Actor;
use crate::domain::survey::{Survey, SurveyError};
use crate::ports::SurveyRepository;

/// Query to list surveys visible to the actor.
#[derive(Debug, Clone)]
pub struct ListSurveysQuery {
    pub actor: Actor,
}

/// Handler for survey listings.
///
/// Authors see their own surveys in any state; respondents browse the
/// active catalogue.
pub struct ListSurveysHandler {
    repository: Arc<dyn SurveyRepository>,
}

impl ListSurveysHandler {
    pub fn new(repository: Arc<dyn SurveyRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListSurveysQuery) -> Result<Vec<Survey>, SurveyError> {
        if query.actor.can_author {
            self.repository.list_by_author(&query.actor.id).await
        } else {
            self.repository.list_active().await
        }
    }
}
