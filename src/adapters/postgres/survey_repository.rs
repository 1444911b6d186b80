//! PostgreSQL implementation of SurveyRepository.
//!
//! Persists the Survey aggregate (survey, questions, options) and
//! reassembles it on read.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::collections::HashMap;

use crate::domain::foundation::{
    AnswerOptionId, QuestionId, SurveyId, Timestamp, UserId,
};
use crate::domain::survey::{AnswerOption, Question, Survey, SurveyError};
use crate::ports::SurveyRepository;

/// PostgreSQL implementation of SurveyRepository.
#[derive(Clone)]
pub struct PostgresSurveyRepository {
    pool: PgPool,
}

impl PostgresSurveyRepository {
    /// Creates a new PostgresSurveyRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_question(
        tx: &mut Transaction<'_, Postgres>,
        question: &Question,
    ) -> Result<(), SurveyError> {
        sqlx::query(
            r#"
            INSERT INTO questions (id, survey_id, text, "order", created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(question.id().as_uuid())
        .bind(question.survey_id().as_uuid())
        .bind(question.text())
        .bind(question.order() as i32)
        .bind(question.created_at().as_datetime())
        .execute(&mut **tx)
        .await
        .map_err(|e| write_error("insert question", e))?;

        for option in question.options() {
            sqlx::query(
                r#"
                INSERT INTO answer_options (id, question_id, text, "order", created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(option.id().as_uuid())
            .bind(option.question_id().as_uuid())
            .bind(option.text())
            .bind(option.order() as i32)
            .bind(option.created_at().as_datetime())
            .execute(&mut **tx)
            .await
            .map_err(|e| write_error("insert answer option", e))?;
        }

        Ok(())
    }

    async fn load_survey(&self, row: sqlx::postgres::PgRow) -> Result<Survey, SurveyError> {
        let survey_id = SurveyId::from_uuid(row.get("id"));

        let question_rows = sqlx::query(
            r#"
            SELECT id, survey_id, text, "order", created_at
            FROM questions
            WHERE survey_id = $1
            ORDER BY "order" ASC
            "#,
        )
        .bind(survey_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_error("fetch questions", e))?;

        let option_rows = sqlx::query(
            r#"
            SELECT o.id, o.question_id, o.text, o."order", o.created_at
            FROM answer_options o
            JOIN questions q ON q.id = o.question_id
            WHERE q.survey_id = $1
            ORDER BY o."order" ASC
            "#,
        )
        .bind(survey_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_error("fetch answer options", e))?;

        let mut options_by_question: HashMap<QuestionId, Vec<AnswerOption>> = HashMap::new();
        for r in option_rows {
            let option = AnswerOption::reconstitute(
                AnswerOptionId::from_uuid(r.get("id")),
                QuestionId::from_uuid(r.get("question_id")),
                r.get("text"),
                r.get::<i32, _>("order") as u32,
                Timestamp::from_datetime(r.get("created_at")),
            );
            options_by_question
                .entry(*option.question_id())
                .or_default()
                .push(option);
        }

        let questions = question_rows
            .into_iter()
            .map(|r| {
                let question_id = QuestionId::from_uuid(r.get("id"));
                Question::reconstitute(
                    question_id,
                    survey_id,
                    r.get("text"),
                    r.get::<i32, _>("order") as u32,
                    options_by_question.remove(&question_id).unwrap_or_default(),
                    Timestamp::from_datetime(r.get("created_at")),
                )
            })
            .collect();

        let author_id = UserId::new(row.get::<String, _>("author_id"))
            .map_err(|e| SurveyError::infrastructure(format!("corrupt author_id: {}", e)))?;

        Ok(Survey::reconstitute(
            survey_id,
            row.get("title"),
            author_id,
            row.get("is_active"),
            questions,
            Timestamp::from_datetime(row.get("created_at")),
            Timestamp::from_datetime(row.get("updated_at")),
        ))
    }

    async fn load_surveys(
        &self,
        rows: Vec<sqlx::postgres::PgRow>,
    ) -> Result<Vec<Survey>, SurveyError> {
        let mut surveys = Vec::with_capacity(rows.len());
        for row in rows {
            surveys.push(self.load_survey(row).await?);
        }
        Ok(surveys)
    }
}

#[async_trait]
impl SurveyRepository for PostgresSurveyRepository {
    async fn create(&self, survey: &Survey) -> Result<(), SurveyError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| write_error("begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO surveys (id, title, author_id, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(survey.id().as_uuid())
        .bind(survey.title())
        .bind(survey.author_id().as_str())
        .bind(survey.is_active())
        .bind(survey.created_at().as_datetime())
        .bind(survey.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error("insert survey", e))?;

        for question in survey.questions() {
            Self::insert_question(&mut tx, question).await?;
        }

        tx.commit()
            .await
            .map_err(|e| write_error("commit survey", e))
    }

    async fn find_by_id(&self, id: &SurveyId) -> Result<Option<Survey>, SurveyError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author_id, is_active, created_at, updated_at
            FROM surveys
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| read_error("fetch survey", e))?;

        match row {
            Some(row) => Ok(Some(self.load_survey(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_active_by_id(&self, id: &SurveyId) -> Result<Option<Survey>, SurveyError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author_id, is_active, created_at, updated_at
            FROM surveys
            WHERE id = $1 AND is_active
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| read_error("fetch active survey", e))?;

        match row {
            Some(row) => Ok(Some(self.load_survey(row).await?)),
            None => Ok(None),
        }
    }

    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Survey>, SurveyError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author_id, is_active, created_at, updated_at
            FROM surveys
            WHERE author_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(author_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_error("list surveys by author", e))?;

        self.load_surveys(rows).await
    }

    async fn list_active(&self) -> Result<Vec<Survey>, SurveyError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author_id, is_active, created_at, updated_at
            FROM surveys
            WHERE is_active
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_error("list active surveys", e))?;

        self.load_surveys(rows).await
    }
}

fn write_error(context: &str, e: sqlx::Error) -> SurveyError {
    if is_unique_violation(&e) {
        SurveyError::conflict(format!("{}: {}", context, e))
    } else {
        SurveyError::infrastructure(format!("Failed to {}: {}", context, e))
    }
}

fn read_error(context: &str, e: sqlx::Error) -> SurveyError {
    SurveyError::infrastructure(format!("Failed to {}: {}", context, e))
}

/// Postgres class 23505: unique_violation.
pub(super) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}
