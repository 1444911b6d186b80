//! SurveyStatisticsHandler - Aggregated statistics for the survey owner.

use std::sync::Arc;

use crate::domain::foundation::{Actor, SurveyId};
use crate::domain::response::{
    average_completion_secs, rank_popular_answers, OptionCount, QuestionStatistics,
    SurveyStatistics,
};
use crate::ports::{StatisticsError, StatisticsReader, SurveyRepository};

/// Query for a survey's aggregated statistics.
#[derive(Debug, Clone)]
pub struct SurveyStatisticsQuery {
    pub actor: Actor,
    pub survey_id: SurveyId,
}

/// Handler assembling survey statistics from storage tallies.
pub struct SurveyStatisticsHandler {
    surveys: Arc<dyn SurveyRepository>,
    reader: Arc<dyn StatisticsReader>,
}

impl SurveyStatisticsHandler {
    pub fn new(surveys: Arc<dyn SurveyRepository>, reader: Arc<dyn StatisticsReader>) -> Self {
        Self { surveys, reader }
    }

    pub async fn handle(
        &self,
        query: SurveyStatisticsQuery,
    ) -> Result<SurveyStatistics, StatisticsError> {
        // Statistics exist for any survey that exists, active or not.
        let survey = self
            .surveys
            .find_by_id(&query.survey_id)
            .await
            .map_err(|e| StatisticsError::Database(e.message()))?
            .ok_or(StatisticsError::SurveyNotFound(query.survey_id))?;

        // Owner-only view.
        if !survey.is_owner(&query.actor.id) {
            return Err(StatisticsError::Forbidden);
        }

        let counts = self.reader.session_counts(survey.id()).await?;
        let durations = self.reader.completion_durations_secs(survey.id()).await?;
        let tallies = self.reader.answer_tallies(survey.id()).await?;

        // Per-question distributions follow the survey's question order.
        let questions = survey
            .questions()
            .iter()
            .map(|question| {
                let option_counts: Vec<OptionCount> = tallies
                    .iter()
                    .filter(|t| &t.question_id == question.id())
                    .map(|t| OptionCount {
                        option_id: t.option_id,
                        option_text: t.option_text.clone(),
                        count: t.count,
                    })
                    .collect();
                let (total_answers, popular_answers) = rank_popular_answers(option_counts);

                QuestionStatistics {
                    question_id: *question.id(),
                    question_text: question.text().to_string(),
                    question_order: question.order(),
                    total_answers,
                    popular_answers,
                }
            })
            .collect();

        Ok(SurveyStatistics {
            survey_id: *survey.id(),
            survey_title: survey.title().to_string(),
            total_responses: counts.total,
            completed_responses: counts.completed,
            average_completion_time: average_completion_secs(&durations),
            questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{
        fixture_survey, InMemoryResponseRepository, InMemorySurveyRepository,
    };
    use crate::domain::foundation::UserId;
    use crate::ports::{RecordAnswer, ResponseRepository};

    fn owner() -> Actor {
        Actor::author(UserId::new("author-1").unwrap())
    }

    fn setup(
        surveys: Vec<crate::domain::survey::Survey>,
    ) -> (SurveyStatisticsHandler, Arc<InMemoryResponseRepository>) {
        let survey_repo = Arc::new(InMemorySurveyRepository::with(surveys));
        let responses = Arc::new(InMemoryResponseRepository::new(survey_repo.clone()));
        (
            SurveyStatisticsHandler::new(survey_repo, responses.clone()),
            responses,
        )
    }

    #[tokio::test]
    async fn zero_response_survey_reports_zeros() {
        let survey = fixture_survey("author-1", 2, 2);
        let (handler, _) = setup(vec![survey.clone()]);

        let stats = handler
            .handle(SurveyStatisticsQuery {
                actor: owner(),
                survey_id: *survey.id(),
            })
            .await
            .unwrap();

        assert_eq!(stats.total_responses, 0);
        assert_eq!(stats.completed_responses, 0);
        assert_eq!(stats.average_completion_time, None);
        assert_eq!(stats.questions.len(), 2);
        for q in &stats.questions {
            assert_eq!(q.total_answers, 0);
            assert!(q.popular_answers.is_empty());
        }
    }

    #[tokio::test]
    async fn two_respondents_split_question_fifty_fifty() {
        let survey = fixture_survey("author-1", 1, 2);
        let (handler, responses) = setup(vec![survey.clone()]);
        let q = &survey.questions()[0];

        for (user, option) in [("resp-1", 0), ("resp-2", 1)] {
            responses
                .record_answer(RecordAnswer {
                    user_id: UserId::new(user).unwrap(),
                    survey_id: *survey.id(),
                    question_id: *q.id(),
                    selected_option_id: *q.options()[option].id(),
                })
                .await
                .unwrap();
        }

        let stats = handler
            .handle(SurveyStatisticsQuery {
                actor: owner(),
                survey_id: *survey.id(),
            })
            .await
            .unwrap();

        assert_eq!(stats.total_responses, 2);
        assert_eq!(stats.completed_responses, 2);
        let question = &stats.questions[0];
        assert_eq!(question.total_answers, 2);
        assert_eq!(question.popular_answers.len(), 2);
        assert!(question.popular_answers.iter().all(|p| p.count == 1));
        assert!(question
            .popular_answers
            .iter()
            .all(|p| p.percentage == 50.0));
    }

    #[tokio::test]
    async fn average_completion_time_over_completed_sessions() {
        let survey = fixture_survey("author-1", 1, 2);
        let (handler, responses) = setup(vec![survey.clone()]);
        let q = &survey.questions()[0];

        responses
            .record_answer(RecordAnswer {
                user_id: UserId::new("resp-1").unwrap(),
                survey_id: *survey.id(),
                question_id: *q.id(),
                selected_option_id: *q.options()[0].id(),
            })
            .await
            .unwrap();

        let stats = handler
            .handle(SurveyStatisticsQuery {
                actor: owner(),
                survey_id: *survey.id(),
            })
            .await
            .unwrap();

        assert_eq!(stats.completed_responses, 1);
        // completed instantly in-memory; the mean exists and is >= 0
        let avg = stats.average_completion_time.expect("one completed session");
        assert!(avg >= 0.0);
    }

    #[tokio::test]
    async fn incomplete_sessions_count_as_responses() {
        let survey = fixture_survey("author-1", 2, 2);
        let (handler, responses) = setup(vec![survey.clone()]);
        let q = &survey.questions()[0];

        // One answer out of two questions: session stays incomplete.
        responses
            .record_answer(RecordAnswer {
                user_id: UserId::new("resp-1").unwrap(),
                survey_id: *survey.id(),
                question_id: *q.id(),
                selected_option_id: *q.options()[0].id(),
            })
            .await
            .unwrap();

        let stats = handler
            .handle(SurveyStatisticsQuery {
                actor: owner(),
                survey_id: *survey.id(),
            })
            .await
            .unwrap();

        assert_eq!(stats.total_responses, 1);
        assert_eq!(stats.completed_responses, 0);
        assert_eq!(stats.average_completion_time, None);
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let survey = fixture_survey("author-1", 1, 2);
        let (handler, _) = setup(vec![survey.clone()]);

        let err = handler
            .handle(SurveyStatisticsQuery {
                actor: Actor::author(UserId::new("author-2").unwrap()),
                survey_id: *survey.id(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StatisticsError::Forbidden));
    }

    #[tokio::test]
    async fn missing_survey_is_not_found() {
        let (handler, _) = setup(vec![]);

        let err = handler
            .handle(SurveyStatisticsQuery {
                actor: owner(),
                survey_id: SurveyId::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StatisticsError::SurveyNotFound(_)));
    }

    #[tokio::test]
    async fn deactivated_survey_still_reports_to_owner() {
        let mut survey = fixture_survey("author-1", 1, 2);
        survey.deactivate();
        let (handler, _) = setup(vec![survey.clone()]);

        let stats = handler
            .handle(SurveyStatisticsQuery {
                actor: owner(),
                survey_id: *survey.id(),
            })
            .await
            .unwrap();
        assert_eq!(stats.survey_id, *survey.id());
    }
}
