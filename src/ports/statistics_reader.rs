//! Read-only port for statistics queries.

use async_trait::async_trait;

use crate::domain::foundation::{AnswerOptionId, QuestionId, SurveyId};

/// Session counts for a survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionCounts {
    /// All sessions, complete and incomplete.
    pub total: u64,
    /// Sessions with the completion flag set.
    pub completed: u64,
}

/// One (question, option) tally from the denormalized answers table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerTally {
    pub question_id: QuestionId,
    pub option_id: AnswerOptionId,
    pub option_text: String,
    pub count: u64,
}

/// Read-only port for survey statistics.
///
/// Reads run at the storage engine's default consistency; slight staleness
/// under concurrent writes is acceptable.
#[async_trait]
pub trait StatisticsReader: Send + Sync {
    /// Total and completed session counts for a survey.
    async fn session_counts(&self, survey_id: &SurveyId) -> Result<SessionCounts, StatisticsError>;

    /// Elapsed seconds for each completed session that has both timestamps.
    async fn completion_durations_secs(
        &self,
        survey_id: &SurveyId,
    ) -> Result<Vec<f64>, StatisticsError>;

    /// Answer counts grouped by (question, selected option) across the
    /// whole survey, in one pass over the denormalized answers table.
    async fn answer_tallies(&self, survey_id: &SurveyId)
        -> Result<Vec<AnswerTally>, StatisticsError>;
}

/// Errors that can occur during statistics reads.
#[derive(Debug, thiserror::Error)]
pub enum StatisticsError {
    #[error("Survey not found: {0}")]
    SurveyNotFound(SurveyId),

    #[error("Unauthorized access to survey statistics")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(String),
}

impl StatisticsError {
    pub fn code(&self) -> crate::domain::foundation::ErrorCode {
        use crate::domain::foundation::ErrorCode;
        match self {
            StatisticsError::SurveyNotFound(_) => ErrorCode::SurveyNotFound,
            StatisticsError::Forbidden => ErrorCode::Forbidden,
            StatisticsError::Database(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<sqlx::Error> for StatisticsError {
    fn from(err: sqlx::Error) -> Self {
        StatisticsError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_conversion_from_sqlx() {
        let err: StatisticsError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StatisticsError::Database(_)));
    }

    #[test]
    fn error_messages_name_the_survey() {
        let id = SurveyId::new();
        let msg = StatisticsError::SurveyNotFound(id).to_string();
        assert!(msg.contains(&id.to_string()));
    }
}
