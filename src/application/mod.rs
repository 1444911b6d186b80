//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers mutate state; query handlers only read.

pub mod handlers;

pub use handlers::{
    CreateSurveyCommand, CreateSurveyHandler, GetSurveyHandler, GetSurveyQuery,
    ListSurveysHandler, ListSurveysQuery, NextQuestionHandler, NextQuestionQuery,
    NextQuestionResult, SubmitAnswerCommand, SubmitAnswerHandler, SurveyStatisticsHandler,
    SurveyStatisticsQuery,
};
