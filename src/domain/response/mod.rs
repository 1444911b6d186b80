//! Response collection domain: sessions, answers, progress, statistics.

mod answer;
mod errors;
mod progress;
mod session;
mod statistics;

pub use answer::UserAnswer;
pub use errors::ResponseError;
pub use progress::Progress;
pub use session::SurveySession;
pub use statistics::{
    average_completion_secs, rank_popular_answers, OptionCount, PopularAnswer,
    QuestionStatistics, SurveyStatistics,
};
