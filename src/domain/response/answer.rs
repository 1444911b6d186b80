//! User answer entity: one selected option for one question in one session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AnswerId, AnswerOptionId, QuestionId, SessionId, SurveyId, Timestamp, UserId,
};

/// A respondent's answer to a question within a session.
///
/// Unique per (session, question); resubmitting replaces the selected
/// option and timestamp rather than adding a second row. The survey and
/// user references are denormalized copies of the session's, kept so the
/// statistics reader can group answers without joining through sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAnswer {
    id: AnswerId,
    session_id: SessionId,
    question_id: QuestionId,
    selected_option_id: AnswerOptionId,
    survey_id: SurveyId,
    user_id: UserId,
    answered_at: Timestamp,
}

impl UserAnswer {
    /// Records a new answer.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        id: AnswerId,
        session_id: SessionId,
        question_id: QuestionId,
        selected_option_id: AnswerOptionId,
        survey_id: SurveyId,
        user_id: UserId,
    ) -> Self {
        Self {
            id,
            session_id,
            question_id,
            selected_option_id,
            survey_id,
            user_id,
            answered_at: Timestamp::now(),
        }
    }

    /// Reconstitutes an answer from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: AnswerId,
        session_id: SessionId,
        question_id: QuestionId,
        selected_option_id: AnswerOptionId,
        survey_id: SurveyId,
        user_id: UserId,
        answered_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            question_id,
            selected_option_id,
            survey_id,
            user_id,
            answered_at,
        }
    }

    pub fn id(&self) -> &AnswerId {
        &self.id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    pub fn selected_option_id(&self) -> &AnswerOptionId {
        &self.selected_option_id
    }

    pub fn survey_id(&self) -> &SurveyId {
        &self.survey_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn answered_at(&self) -> &Timestamp {
        &self.answered_at
    }

    /// Replaces the selected option, stamping a fresh answered_at.
    ///
    /// Upsert semantics for resubmission before completion.
    pub fn reselect(&mut self, option_id: AnswerOptionId) {
        self.selected_option_id = option_id;
        self.answered_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reselect_replaces_option_and_restamps() {
        let mut answer = UserAnswer::record(
            AnswerId::new(),
            SessionId::new(),
            QuestionId::new(),
            AnswerOptionId::new(),
            SurveyId::new(),
            UserId::new("resp-1").unwrap(),
        );
        let first_stamp = *answer.answered_at();

        let replacement = AnswerOptionId::new();
        answer.reselect(replacement);

        assert_eq!(answer.selected_option_id(), &replacement);
        assert!(!answer.answered_at().is_before(&first_stamp));
    }
}
