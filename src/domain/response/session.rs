//! Survey session entity: one respondent's attempt at a survey.

use serde::{Deserialize, Serialize};

use super::ResponseError;
use crate::domain::foundation::{SessionId, SurveyId, Timestamp, UserId};

/// One in-progress or finished attempt by a user at a survey.
///
/// # Invariants
///
/// - At most one incomplete session exists per (user, survey); the storage
///   layer enforces this with a partial unique index.
/// - `InProgress -> Completed` is the only transition and it is terminal.
/// - `completed_at` is set exactly when the transition happens, so
///   `completed_at >= started_at` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySession {
    id: SessionId,
    survey_id: SurveyId,
    user_id: UserId,
    started_at: Timestamp,
    completed_at: Option<Timestamp>,
    is_completed: bool,
}

impl SurveySession {
    /// Starts a new incomplete session.
    pub fn start(id: SessionId, survey_id: SurveyId, user_id: UserId) -> Self {
        Self {
            id,
            survey_id,
            user_id,
            started_at: Timestamp::now(),
            completed_at: None,
            is_completed: false,
        }
    }

    /// Reconstitutes a session from persistence (no validation).
    pub fn reconstitute(
        id: SessionId,
        survey_id: SurveyId,
        user_id: UserId,
        started_at: Timestamp,
        completed_at: Option<Timestamp>,
        is_completed: bool,
    ) -> Self {
        Self {
            id,
            survey_id,
            user_id,
            started_at,
            completed_at,
            is_completed,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn survey_id(&self) -> &SurveyId {
        &self.survey_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Marks the session completed, stamping `completed_at`.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the session is already completed
    pub fn complete(&mut self) -> Result<(), ResponseError> {
        if self.is_completed {
            return Err(ResponseError::invalid_state(
                "session is already completed",
            ));
        }
        self.is_completed = true;
        self.completed_at = Some(Timestamp::now());
        Ok(())
    }

    /// Seconds spent from start to completion, if completed.
    pub fn completion_time(&self) -> Option<f64> {
        self.completed_at
            .map(|done| done.duration_since(&self.started_at).num_milliseconds() as f64 / 1000.0)
    }
}
