//! PostgreSQL implementation of StatisticsReader.
//!
//! Read-optimized aggregation queries over the denormalized answers table.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{AnswerOptionId, QuestionId, SurveyId};
use crate::ports::{AnswerTally, SessionCounts, StatisticsError, StatisticsReader};

/// PostgreSQL implementation of StatisticsReader.
#[derive(Clone)]
pub struct PostgresStatisticsReader {
    pool: PgPool,
}

impl PostgresStatisticsReader {
    /// Creates a new PostgresStatisticsReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatisticsReader for PostgresStatisticsReader {
    async fn session_counts(&self, survey_id: &SurveyId) -> Result<SessionCounts, StatisticsError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE is_completed) AS completed
            FROM survey_sessions
            WHERE survey_id = $1
            "#,
        )
        .bind(survey_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(SessionCounts {
            total: row.get::<i64, _>("total") as u64,
            completed: row.get::<i64, _>("completed") as u64,
        })
    }

    async fn completion_durations_secs(
        &self,
        survey_id: &SurveyId,
    ) -> Result<Vec<f64>, StatisticsError> {
        let rows = sqlx::query(
            r#"
            SELECT EXTRACT(EPOCH FROM (completed_at - started_at))::DOUBLE PRECISION AS secs
            FROM survey_sessions
            WHERE survey_id = $1
              AND is_completed
              AND completed_at IS NOT NULL
            "#,
        )
        .bind(survey_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.get::<f64, _>("secs")).collect())
    }

    async fn answer_tallies(
        &self,
        survey_id: &SurveyId,
    ) -> Result<Vec<AnswerTally>, StatisticsError> {
        let rows = sqlx::query(
            r#"
            SELECT a.question_id, a.selected_option_id, o.text AS option_text,
                   COUNT(*) AS count
            FROM user_answers a
            JOIN answer_options o ON o.id = a.selected_option_id
            WHERE a.survey_id = $1
            GROUP BY a.question_id, a.selected_option_id, o.text
            "#,
        )
        .bind(survey_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| AnswerTally {
                question_id: QuestionId::from_uuid(r.get("question_id")),
                option_id: AnswerOptionId::from_uuid(r.get("selected_option_id")),
                option_text: r.get("option_text"),
                count: r.get::<i64, _>("count") as u64,
            })
            .collect())
    }
}
