//! Survey authoring domain: surveys, questions, answer options.

mod aggregate;
mod errors;

pub use aggregate::{
    AnswerOption, AnswerOptionDraft, Question, QuestionDraft, Survey, MAX_OPTION_LENGTH,
    MAX_TITLE_LENGTH,
};
pub use errors::SurveyError;
