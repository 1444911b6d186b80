//! Response repository port (sessions and answers, write side).

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::foundation::{AnswerOptionId, QuestionId, SessionId, SurveyId, UserId};
use crate::domain::response::{ResponseError, SurveySession, UserAnswer};

/// Input for the transactional answer recording sequence.
#[derive(Debug, Clone)]
pub struct RecordAnswer {
    pub user_id: UserId,
    pub survey_id: SurveyId,
    pub question_id: QuestionId,
    pub selected_option_id: AnswerOptionId,
}

/// Repository port for session and answer persistence.
///
/// Implementations must honor the single-active-session invariant: at most
/// one incomplete session per (user, survey), enforced with an atomic
/// conditional insert (unique constraint at the storage level), never a
/// read-then-write sequence.
#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// The unique incomplete session for (user, survey), created on first
    /// use with `started_at = now`. Repeated calls return the same row;
    /// concurrent callers converge on one row.
    async fn get_or_create_active_session(
        &self,
        user_id: &UserId,
        survey_id: &SurveyId,
    ) -> Result<SurveySession, ResponseError>;

    /// Ids of the questions already answered within a session.
    async fn answered_question_ids(
        &self,
        session_id: &SessionId,
    ) -> Result<HashSet<QuestionId>, ResponseError>;

    /// Records one answer as a single atomic transaction:
    /// get-or-create the incomplete session, upsert the answer keyed by
    /// (session, question), recount answered vs total, and mark the session
    /// completed (stamping `completed_at`) once every question is answered.
    ///
    /// A failure anywhere rolls the whole sequence back; no partial state
    /// survives. The caller validates that the question belongs to the
    /// survey and the option to the question before invoking this;
    /// implementations re-check those references inside the transaction.
    async fn record_answer(&self, cmd: RecordAnswer) -> Result<UserAnswer, ResponseError>;
}
