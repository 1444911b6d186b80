//! Survey authoring handlers.

mod create_survey;
mod get_survey;
mod list_surveys;

pub use create_survey::{CreateSurveyCommand, CreateSurveyHandler};
pub use get_survey::{GetSurveyHandler, GetSurveyQuery};
pub use list_surveys::{ListSurveysHandler, ListSurveysQuery};
