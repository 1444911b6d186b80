//! Progress through a survey session.

use serde::{Deserialize, Serialize};

/// How far a respondent has gotten through a survey.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Questions answered in this session.
    pub answered: u64,
    /// Questions in the survey.
    pub total: u64,
    /// answered / total on a 0-100 scale; 0 when the survey has no questions.
    pub percentage: f64,
}

impl Progress {
    /// Computes progress from the answered and total counts.
    pub fn new(answered: u64, total: u64) -> Self {
        let percentage = if total > 0 {
            answered as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            answered,
            total,
            percentage,
        }
    }

    /// A survey with no questions counts as immediately complete.
    pub fn is_complete(&self) -> bool {
        self.answered >= self.total
    }
}
