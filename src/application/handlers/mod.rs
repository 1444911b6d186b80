//! Use case handlers, one per operation.

pub mod response;
pub mod survey;

#[cfg(test)]
pub(crate) mod testing;

pub use response::{
    NextQuestionHandler, NextQuestionQuery, NextQuestionResult, SubmitAnswerCommand,
    SubmitAnswerHandler, SurveyStatisticsHandler, SurveyStatisticsQuery,
};
pub use survey::{
    CreateSurveyCommand, CreateSurveyHandler, GetSurveyHandler, GetSurveyQuery,
    ListSurveysHandler, ListSurveysQuery,
};
