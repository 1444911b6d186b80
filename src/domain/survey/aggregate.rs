//! Survey aggregate: a survey with its ordered questions and options.
//!
//! The aggregate is built atomically by the survey builder use case and
//! persisted as one unit. Questions and options are owned by the survey;
//! they never exist without it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{
    AnswerOptionId, QuestionId, SurveyId, Timestamp, UserId, ValidationError,
};

/// Maximum length for a survey title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum length for an answer option text.
pub const MAX_OPTION_LENGTH: usize = 255;

/// One selectable answer for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    id: AnswerOptionId,
    question_id: QuestionId,
    text: String,
    order: u32,
    created_at: Timestamp,
}

impl AnswerOption {
    /// Creates a new option.
    ///
    /// # Errors
    ///
    /// - `EmptyField`/`TooLong` for invalid text
    pub fn new(
        id: AnswerOptionId,
        question_id: QuestionId,
        text: String,
        order: u32,
    ) -> Result<Self, ValidationError> {
        let text = validate_text("option_text", text, MAX_OPTION_LENGTH)?;
        Ok(Self {
            id,
            question_id,
            text,
            order,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitutes an option from persistence (no validation).
    pub fn reconstitute(
        id: AnswerOptionId,
        question_id: QuestionId,
        text: String,
        order: u32,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            question_id,
            text,
            order,
            created_at,
        }
    }

    pub fn id(&self) -> &AnswerOptionId {
        &self.id
    }

    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

/// One question within a survey, with its selectable options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    survey_id: SurveyId,
    text: String,
    order: u32,
    options: Vec<AnswerOption>,
    created_at: Timestamp,
}

impl Question {
    /// Creates a new question with its options.
    ///
    /// # Errors
    ///
    /// - `EmptyField` for empty text
    /// - `DuplicateOrder` if two options share an order value
    pub fn new(
        id: QuestionId,
        survey_id: SurveyId,
        text: String,
        order: u32,
        options: Vec<AnswerOption>,
    ) -> Result<Self, ValidationError> {
        let text = validate_text("question_text", text, usize::MAX)?;
        validate_unique_orders("question", options.iter().map(AnswerOption::order))?;

        let mut options = options;
        options.sort_by_key(AnswerOption::order);

        Ok(Self {
            id,
            survey_id,
            text,
            order,
            options,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitutes a question from persistence (no validation).
    pub fn reconstitute(
        id: QuestionId,
        survey_id: SurveyId,
        text: String,
        order: u32,
        mut options: Vec<AnswerOption>,
        created_at: Timestamp,
    ) -> Self {
        options.sort_by_key(AnswerOption::order);
        Self {
            id,
            survey_id,
            text,
            order,
            options,
            created_at,
        }
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn survey_id(&self) -> &SurveyId {
        &self.survey_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    /// Options sorted ascending by order.
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Looks up an option belonging to this question.
    pub fn option(&self, option_id: &AnswerOptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id() == option_id)
    }
}

/// Survey aggregate root.
///
/// # Invariants
///
/// - `title` is 1-255 characters after trimming
/// - question `order` values are unique within the survey
/// - option `order` values are unique within each question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    id: SurveyId,
    title: String,
    author_id: UserId,
    is_active: bool,
    questions: Vec<Question>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Survey {
    /// Creates a new active survey from builder input.
    ///
    /// Question and option drafts carry optional orders; a missing order
    /// defaults to 0, after which orders must be unique per parent.
    ///
    /// # Errors
    ///
    /// - `EmptyField`/`TooLong` for an invalid title or text
    /// - `DuplicateOrder` when two siblings resolve to the same order
    pub fn create(
        id: SurveyId,
        author_id: UserId,
        title: String,
        drafts: Vec<QuestionDraft>,
    ) -> Result<Self, ValidationError> {
        let title = validate_text("title", title, MAX_TITLE_LENGTH)?;

        let mut questions = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let question_id = QuestionId::new();
            let order = draft.order.unwrap_or(0);

            let mut options = Vec::with_capacity(draft.options.len());
            for option_draft in draft.options {
                options.push(AnswerOption::new(
                    AnswerOptionId::new(),
                    question_id,
                    option_draft.text,
                    option_draft.order.unwrap_or(0),
                )?);
            }

            questions.push(Question::new(question_id, id, draft.text, order, options)?);
        }

        validate_unique_orders("survey", questions.iter().map(Question::order))?;
        questions.sort_by_key(Question::order);

        let now = Timestamp::now();
        Ok(Self {
            id,
            title,
            author_id,
            is_active: true,
            questions,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a survey from persistence (no validation).
    pub fn reconstitute(
        id: SurveyId,
        title: String,
        author_id: UserId,
        is_active: bool,
        mut questions: Vec<Question>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        questions.sort_by_key(Question::order);
        Self {
            id,
            title,
            author_id,
            is_active,
            questions,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &SurveyId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Questions sorted ascending by order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Checks if the given user authored this survey.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }

    /// Looks up a question belonging to this survey.
    pub fn question(&self, question_id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == question_id)
    }

    /// Deactivates the survey. Data is retained; the survey simply stops
    /// accepting responses. Idempotent.
    pub fn deactivate(&mut self) {
        if self.is_active {
            self.is_active = false;
            self.updated_at = Timestamp::now();
        }
    }
}

/// Builder input for one question.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDraft {
    pub text: String,
    pub order: Option<u32>,
    #[serde(default)]
    pub options: Vec<AnswerOptionDraft>,
}

/// Builder input for one answer option.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerOptionDraft {
    pub text: String,
    pub order: Option<u32>,
}

fn validate_text(field: &str, text: String, max: usize) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if trimmed.len() > max {
        return Err(ValidationError::too_long(field, max, trimmed.len()));
    }
    Ok(trimmed.to_string())
}

fn validate_unique_orders(
    scope: &str,
    orders: impl Iterator<Item = u32>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for order in orders {
        if !seen.insert(order) {
            return Err(ValidationError::duplicate_order("order", order, scope));
        }
    }
    Ok(())
}
