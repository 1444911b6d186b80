//! PostgreSQL implementation of ResponseRepository.
//!
//! Owns the concurrency-sensitive paths: the atomic get-or-create of the
//! single incomplete session (backed by a partial unique index) and the
//! transactional answer-recording sequence.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::collections::HashSet;

use crate::domain::foundation::{
    AnswerId, AnswerOptionId, QuestionId, SessionId, SurveyId, Timestamp, UserId,
};
use crate::domain::response::{ResponseError, SurveySession, UserAnswer};
use crate::ports::{RecordAnswer, ResponseRepository};

use super::survey_repository::is_unique_violation;

/// PostgreSQL implementation of ResponseRepository.
#[derive(Clone)]
pub struct PostgresResponseRepository {
    pool: PgPool,
}

impl PostgresResponseRepository {
    /// Creates a new PostgresResponseRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Conditional insert + reselect of the unique incomplete session.
    ///
    /// The partial unique index on (user_id, survey_id) WHERE NOT
    /// is_completed makes the insert race-free; concurrent callers all land
    /// on the same row.
    async fn get_or_create_session_in(
        executor: &mut Transaction<'_, Postgres>,
        user_id: &UserId,
        survey_id: &SurveyId,
    ) -> Result<SurveySession, ResponseError> {
        let fresh = SurveySession::start(SessionId::new(), *survey_id, user_id.clone());

        sqlx::query(
            r#"
            INSERT INTO survey_sessions (id, survey_id, user_id, started_at, completed_at, is_completed)
            VALUES ($1, $2, $3, $4, NULL, FALSE)
            ON CONFLICT (user_id, survey_id) WHERE NOT is_completed DO NOTHING
            "#,
        )
        .bind(fresh.id().as_uuid())
        .bind(survey_id.as_uuid())
        .bind(user_id.as_str())
        .bind(fresh.started_at().as_datetime())
        .execute(&mut **executor)
        .await
        .map_err(|e| db_error("create session", e))?;

        let row = sqlx::query(
            r#"
            SELECT id, survey_id, user_id, started_at, completed_at, is_completed
            FROM survey_sessions
            WHERE user_id = $1 AND survey_id = $2 AND NOT is_completed
            "#,
        )
        .bind(user_id.as_str())
        .bind(survey_id.as_uuid())
        .fetch_one(&mut **executor)
        .await
        .map_err(|e| db_error("fetch session", e))?;

        row_to_session(row)
    }
}

#[async_trait]
impl ResponseRepository for PostgresResponseRepository {
    async fn get_or_create_active_session(
        &self,
        user_id: &UserId,
        survey_id: &SurveyId,
    ) -> Result<SurveySession, ResponseError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;
        let session = Self::get_or_create_session_in(&mut tx, user_id, survey_id).await?;
        tx.commit()
            .await
            .map_err(|e| db_error("commit session", e))?;
        Ok(session)
    }

    async fn answered_question_ids(
        &self,
        session_id: &SessionId,
    ) -> Result<HashSet<QuestionId>, ResponseError> {
        let rows = sqlx::query("SELECT question_id FROM user_answers WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("fetch answered questions", e))?;

        Ok(rows
            .into_iter()
            .map(|r| QuestionId::from_uuid(r.get("question_id")))
            .collect())
    }

    async fn record_answer(&self, cmd: RecordAnswer) -> Result<UserAnswer, ResponseError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        // Reference checks run inside the transaction so the whole
        // sequence stands or falls together.
        let survey_ok: Option<(i32,)> =
            sqlx::query_as("SELECT 1 FROM surveys WHERE id = $1 AND is_active")
                .bind(cmd.survey_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("check survey", e))?;
        if survey_ok.is_none() {
            return Err(ResponseError::survey_not_found(cmd.survey_id));
        }

        let question_ok: Option<(i32,)> =
            sqlx::query_as("SELECT 1 FROM questions WHERE id = $1 AND survey_id = $2")
                .bind(cmd.question_id.as_uuid())
                .bind(cmd.survey_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("check question", e))?;
        if question_ok.is_none() {
            return Err(ResponseError::question_not_in_survey(
                cmd.question_id,
                cmd.survey_id,
            ));
        }

        let option_ok: Option<(i32,)> =
            sqlx::query_as("SELECT 1 FROM answer_options WHERE id = $1 AND question_id = $2")
                .bind(cmd.selected_option_id.as_uuid())
                .bind(cmd.question_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("check answer option", e))?;
        if option_ok.is_none() {
            return Err(ResponseError::option_not_in_question(
                cmd.selected_option_id,
                cmd.question_id,
            ));
        }

        let session = Self::get_or_create_session_in(&mut tx, &cmd.user_id, &cmd.survey_id).await?;

        // Upsert keyed by (session, question): resubmission replaces the
        // selection and timestamp instead of adding a row.
        let answer_row = sqlx::query(
            r#"
            INSERT INTO user_answers
                (id, session_id, question_id, selected_option_id, survey_id, user_id, answered_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (session_id, question_id)
            DO UPDATE SET selected_option_id = EXCLUDED.selected_option_id,
                          answered_at = EXCLUDED.answered_at
            RETURNING id, session_id, question_id, selected_option_id, survey_id, user_id, answered_at
            "#,
        )
        .bind(AnswerId::new().as_uuid())
        .bind(session.id().as_uuid())
        .bind(cmd.question_id.as_uuid())
        .bind(cmd.selected_option_id.as_uuid())
        .bind(cmd.survey_id.as_uuid())
        .bind(cmd.user_id.as_str())
        .bind(Timestamp::now().as_datetime())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("upsert answer", e))?;

        let (answered, total): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM user_answers WHERE session_id = $1),
                (SELECT COUNT(*) FROM questions WHERE survey_id = $2)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(cmd.survey_id.as_uuid())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("count progress", e))?;

        // The only incomplete -> complete transition point. The NOT
        // is_completed guard keeps it monotonic under concurrent submits.
        if answered >= total {
            sqlx::query(
                r#"
                UPDATE survey_sessions
                SET is_completed = TRUE, completed_at = $2
                WHERE id = $1 AND NOT is_completed
                "#,
            )
            .bind(session.id().as_uuid())
            .bind(Timestamp::now().as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("complete session", e))?;

            tracing::info!(
                session_id = %session.id(),
                survey_id = %cmd.survey_id,
                "survey session completed"
            );
        }

        tx.commit()
            .await
            .map_err(|e| db_error("commit answer", e))?;

        row_to_answer(answer_row)
    }
}

fn db_error(context: &str, e: sqlx::Error) -> ResponseError {
    if is_unique_violation(&e) {
        // The upsert path never hits this; seeing it means a write bypassed
        // the ON CONFLICT clauses.
        ResponseError::conflict(format!("{}: {}", context, e))
    } else {
        ResponseError::infrastructure(format!("Failed to {}: {}", context, e))
    }
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<SurveySession, ResponseError> {
    let user_id = UserId::new(row.get::<String, _>("user_id"))
        .map_err(|e| ResponseError::infrastructure(format!("corrupt user_id: {}", e)))?;

    Ok(SurveySession::reconstitute(
        SessionId::from_uuid(row.get("id")),
        SurveyId::from_uuid(row.get("survey_id")),
        user_id,
        Timestamp::from_datetime(row.get("started_at")),
        row.get::<Option<chrono::DateTime<chrono::Utc>>, _>("completed_at")
            .map(Timestamp::from_datetime),
        row.get("is_completed"),
    ))
}

fn row_to_answer(row: sqlx::postgres::PgRow) -> Result<UserAnswer, ResponseError> {
    let user_id = UserId::new(row.get::<String, _>("user_id"))
        .map_err(|e| ResponseError::infrastructure(format!("corrupt user_id: {}", e)))?;

    Ok(UserAnswer::reconstitute(
        AnswerId::from_uuid(row.get("id")),
        SessionId::from_uuid(row.get("session_id")),
        QuestionId::from_uuid(row.get("question_id")),
        AnswerOptionId::from_uuid(row.get("selected_option_id")),
        SurveyId::from_uuid(row.get("survey_id")),
        user_id,
        Timestamp::from_datetime(row.get("answered_at")),
    ))
}
