//! In-memory port implementations backing the handler tests.
//!
//! Mirror the storage semantics the Postgres adapters provide: the
//! single-active-session invariant, answer upsert keyed by
//! (session, question), and the completion transition.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::{QuestionId, SessionId, SurveyId, UserId};
use crate::domain::response::{ResponseError, SurveySession, UserAnswer};
use crate::domain::survey::{
    AnswerOptionDraft, QuestionDraft, Survey, SurveyError,
};
use crate::ports::{
    AnswerTally, RecordAnswer, ResponseRepository, SessionCounts, StatisticsError,
    StatisticsReader, SurveyRepository,
};

/// Builds a survey with `questions` questions of `options` options each.
pub fn fixture_survey(author: &str, questions: usize, options: usize) -> Survey {
    let drafts = (0..questions)
        .map(|q| QuestionDraft {
            text: format!("Question {}", q),
            order: Some(q as u32),
            options: (0..options)
                .map(|o| AnswerOptionDraft {
                    text: format!("Option {}.{}", q, o),
                    order: Some(o as u32),
                })
                .collect(),
        })
        .collect();

    Survey::create(
        SurveyId::new(),
        UserId::new(author).unwrap(),
        "Fixture survey".to_string(),
        drafts,
    )
    .unwrap()
}

/// Vec-backed SurveyRepository.
pub struct InMemorySurveyRepository {
    surveys: Mutex<Vec<Survey>>,
    fail: bool,
}

impl InMemorySurveyRepository {
    pub fn new() -> Self {
        Self {
            surveys: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn with(surveys: Vec<Survey>) -> Self {
        Self {
            surveys: Mutex::new(surveys),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            surveys: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.surveys.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl SurveyRepository for InMemorySurveyRepository {
    async fn create(&self, survey: &Survey) -> Result<(), SurveyError> {
        if self.fail {
            return Err(SurveyError::infrastructure("simulated save failure"));
        }
        self.surveys.lock().unwrap().push(survey.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SurveyId) -> Result<Option<Survey>, SurveyError> {
        Ok(self
            .surveys
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }

    async fn find_active_by_id(&self, id: &SurveyId) -> Result<Option<Survey>, SurveyError> {
        Ok(self
            .surveys
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id && s.is_active())
            .cloned())
    }

    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Survey>, SurveyError> {
        Ok(self
            .surveys
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.author_id() == author_id)
            .cloned()
            .collect())
    }

    async fn list_active(&self) -> Result<Vec<Survey>, SurveyError> {
        Ok(self
            .surveys
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.is_active())
            .cloned()
            .collect())
    }
}

/// Vec-backed ResponseRepository + StatisticsReader sharing one store.
pub struct InMemoryResponseRepository {
    surveys: Arc<InMemorySurveyRepository>,
    sessions: Mutex<Vec<SurveySession>>,
    answers: Mutex<Vec<UserAnswer>>,
}

impl InMemoryResponseRepository {
    pub fn new(surveys: Arc<InMemorySurveyRepository>) -> Self {
        Self {
            surveys,
            sessions: Mutex::new(Vec::new()),
            answers: Mutex::new(Vec::new()),
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn answer_count(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    pub fn find_session(&self, id: &SessionId) -> Option<SurveySession> {
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id)
            .cloned()
    }

    fn get_or_create(&self, user_id: &UserId, survey_id: &SurveyId) -> SurveySession {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(existing) = sessions
            .iter()
            .find(|s| s.user_id() == user_id && s.survey_id() == survey_id && !s.is_completed())
        {
            return existing.clone();
        }
        let session = SurveySession::start(SessionId::new(), *survey_id, user_id.clone());
        sessions.push(session.clone());
        session
    }
}

#[async_trait]
impl ResponseRepository for InMemoryResponseRepository {
    async fn get_or_create_active_session(
        &self,
        user_id: &UserId,
        survey_id: &SurveyId,
    ) -> Result<SurveySession, ResponseError> {
        Ok(self.get_or_create(user_id, survey_id))
    }

    async fn answered_question_ids(
        &self,
        session_id: &SessionId,
    ) -> Result<HashSet<QuestionId>, ResponseError> {
        Ok(self
            .answers
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.session_id() == session_id)
            .map(|a| *a.question_id())
            .collect())
    }

    async fn record_answer(&self, cmd: RecordAnswer) -> Result<UserAnswer, ResponseError> {
        // Re-check references like the Postgres transaction does.
        let survey = self
            .surveys
            .find_active_by_id(&cmd.survey_id)
            .await
            .map_err(|e| ResponseError::infrastructure(e.message()))?
            .ok_or_else(|| ResponseError::survey_not_found(cmd.survey_id))?;
        let question = survey.question(&cmd.question_id).ok_or_else(|| {
            ResponseError::question_not_in_survey(cmd.question_id, cmd.survey_id)
        })?;
        question.option(&cmd.selected_option_id).ok_or_else(|| {
            ResponseError::option_not_in_question(cmd.selected_option_id, cmd.question_id)
        })?;

        let session = self.get_or_create(&cmd.user_id, &cmd.survey_id);

        let answer = {
            let mut answers = self.answers.lock().unwrap();
            match answers
                .iter_mut()
                .find(|a| a.session_id() == session.id() && a.question_id() == &cmd.question_id)
            {
                Some(existing) => {
                    existing.reselect(cmd.selected_option_id);
                    existing.clone()
                }
                None => {
                    let answer = UserAnswer::record(
                        crate::domain::foundation::AnswerId::new(),
                        *session.id(),
                        cmd.question_id,
                        cmd.selected_option_id,
                        cmd.survey_id,
                        cmd.user_id.clone(),
                    );
                    answers.push(answer.clone());
                    answer
                }
            }
        };

        let answered = self.answered_question_ids(session.id()).await?.len();
        if answered >= survey.question_count() {
            let mut sessions = self.sessions.lock().unwrap();
            if let Some(stored) = sessions.iter_mut().find(|s| s.id() == session.id()) {
                if !stored.is_completed() {
                    stored.complete()?;
                }
            }
        }

        Ok(answer)
    }
}

#[async_trait]
impl StatisticsReader for InMemoryResponseRepository {
    async fn session_counts(&self, survey_id: &SurveyId) -> Result<SessionCounts, StatisticsError> {
        let sessions = self.sessions.lock().unwrap();
        let for_survey: Vec<_> = sessions
            .iter()
            .filter(|s| s.survey_id() == survey_id)
            .collect();
        Ok(SessionCounts {
            total: for_survey.len() as u64,
            completed: for_survey.iter().filter(|s| s.is_completed()).count() as u64,
        })
    }

    async fn completion_durations_secs(
        &self,
        survey_id: &SurveyId,
    ) -> Result<Vec<f64>, StatisticsError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.survey_id() == survey_id && s.is_completed())
            .filter_map(|s| s.completion_time())
            .collect())
    }

    async fn answer_tallies(
        &self,
        survey_id: &SurveyId,
    ) -> Result<Vec<AnswerTally>, StatisticsError> {
        let survey = self
            .surveys
            .find_by_id(survey_id)
            .await
            .map_err(|e| StatisticsError::Database(e.message()))?
            .ok_or(StatisticsError::SurveyNotFound(*survey_id))?;

        let answers = self.answers.lock().unwrap();
        let mut tallies: Vec<AnswerTally> = Vec::new();
        for answer in answers.iter().filter(|a| a.survey_id() == survey_id) {
            match tallies.iter_mut().find(|t| {
                t.question_id == *answer.question_id() && t.option_id == *answer.selected_option_id()
            }) {
                Some(tally) => tally.count += 1,
                None => {
                    let text = survey
                        .question(answer.question_id())
                        .and_then(|q| q.option(answer.selected_option_id()))
                        .map(|o| o.text().to_string())
                        .unwrap_or_default();
                    tallies.push(AnswerTally {
                        question_id: *answer.question_id(),
                        option_id: *answer.selected_option_id(),
                        option_text: text,
                        count: 1,
                    });
                }
            }
        }
        Ok(tallies)
    }
}
