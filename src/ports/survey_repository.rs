//! Survey repository port (authoring side).
//!
//! Defines the contract for persisting and retrieving Survey aggregates.
//! Implementations handle the actual database operations.

use async_trait::async_trait;

use crate::domain::foundation::{SurveyId, UserId};
use crate::domain::survey::{Survey, SurveyError};

/// Repository port for Survey aggregate persistence.
///
/// Implementations must persist `create` atomically: the survey, its
/// questions, and their options either all become visible or none do.
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// Save a new survey with its nested questions and options.
    ///
    /// # Errors
    ///
    /// - `Conflict` on a uniqueness violation (duplicate order slipped past
    ///   domain validation)
    /// - `Infrastructure` on persistence failure
    async fn create(&self, survey: &Survey) -> Result<(), SurveyError>;

    /// Find a survey by id, active or not.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SurveyId) -> Result<Option<Survey>, SurveyError>;

    /// Find a survey by id, only if it is active.
    ///
    /// Returns `None` for missing AND inactive surveys; callers cannot
    /// distinguish the two.
    async fn find_active_by_id(&self, id: &SurveyId) -> Result<Option<Survey>, SurveyError>;

    /// All surveys authored by a user, newest first.
    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Survey>, SurveyError>;

    /// Active surveys visible to respondents, newest first.
    async fn list_active(&self) -> Result<Vec<Survey>, SurveyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survey_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SurveyRepository) {}
    }
}
