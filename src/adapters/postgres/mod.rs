//! PostgreSQL adapters - Database implementations of the repository ports.

mod response_repository;
mod statistics_reader;
mod survey_repository;

pub use response_repository::PostgresResponseRepository;
pub use statistics_reader::PostgresStatisticsReader;
pub use survey_repository::PostgresSurveyRepository;
