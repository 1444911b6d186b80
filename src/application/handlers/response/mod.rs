//! Response collection handlers.

mod next_question;
mod submit_answer;
mod survey_statistics;

pub use next_question::{NextQuestionHandler, NextQuestionQuery, NextQuestionResult};
pub use submit_answer::{SubmitAnswerCommand, SubmitAnswerHandler};
pub use survey_statistics::{SurveyStatisticsHandler, SurveyStatisticsQuery};
