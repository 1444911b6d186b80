//! Statistics views for a survey, plus the pure aggregation math.
//!
//! The statistics reader port supplies raw counts and durations from
//! storage; the derived numbers (percentages, ranking, averages) are
//! computed here.

use serde::Serialize;

use crate::domain::foundation::{AnswerOptionId, QuestionId, SurveyId};

/// One option's share of the answers to a question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularAnswer {
    pub answer_option_id: AnswerOptionId,
    pub answer_text: String,
    pub count: u64,
    /// count / total_answers on a 0-100 scale; 0 when the question has no answers.
    pub percentage: f64,
}

/// Answer distribution for one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionStatistics {
    pub question_id: QuestionId,
    pub question_text: String,
    pub question_order: u32,
    pub total_answers: u64,
    /// Sorted descending by count; ascending option id breaks ties.
    pub popular_answers: Vec<PopularAnswer>,
}

/// Aggregated statistics for a whole survey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyStatistics {
    pub survey_id: SurveyId,
    pub survey_title: String,
    /// Sessions started, complete or not.
    pub total_responses: u64,
    /// Sessions that reached completion.
    pub completed_responses: u64,
    /// Mean seconds from start to completion; None with no completed sessions.
    pub average_completion_time: Option<f64>,
    /// Per-question distributions, ascending by question order.
    pub questions: Vec<QuestionStatistics>,
}

/// Raw per-option tally as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionCount {
    pub option_id: AnswerOptionId,
    pub option_text: String,
    pub count: u64,
}

/// Ranks option tallies into the popular-answers list.
///
/// Options nobody picked are omitted, matching the per-answer grouping the
/// counts come from. Returns the total answer count alongside the ranking.
pub fn rank_popular_answers(mut counts: Vec<OptionCount>) -> (u64, Vec<PopularAnswer>) {
    let total: u64 = counts.iter().map(|c| c.count).sum();

    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.option_id.cmp(&b.option_id))
    });

    let popular = counts
        .into_iter()
        .map(|c| PopularAnswer {
            percentage: if total > 0 {
                c.count as f64 / total as f64 * 100.0
            } else {
                0.0
            },
            answer_option_id: c.option_id,
            answer_text: c.option_text,
            count: c.count,
        })
        .collect();

    (total, popular)
}

/// Mean of completion durations in seconds; None for an empty slice.
pub fn average_completion_secs(durations: &[f64]) -> Option<f64> {
    if durations.is_empty() {
        return None;
    }
    Some(durations.iter().sum::<f64>() / durations.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(option_id: AnswerOptionId, text: &str, count: u64) -> OptionCount {
        OptionCount {
            option_id,
            option_text: text.to_string(),
            count,
        }
    }

    #[test]
    fn ranking_sorts_descending_by_count() {
        let a = AnswerOptionId::new();
        let b = AnswerOptionId::new();
        let (total, ranked) =
            rank_popular_answers(vec![tally(a, "A", 2), tally(b, "B", 5)]);

        assert_eq!(total, 7);
        assert_eq!(ranked[0].answer_text, "B");
        assert_eq!(ranked[1].answer_text, "A");
    }

    #[test]
    fn ranking_breaks_count_ties_by_option_id() {
        let mut ids = [AnswerOptionId::new(), AnswerOptionId::new()];
        ids.sort();
        let (_, ranked) =
            rank_popular_answers(vec![tally(ids[1], "high", 1), tally(ids[0], "low", 1)]);

        assert_eq!(ranked[0].answer_option_id, ids[0]);
        assert_eq!(ranked[1].answer_option_id, ids[1]);
    }

    #[test]
    fn two_respondents_split_evenly() {
        let a = AnswerOptionId::new();
        let b = AnswerOptionId::new();
        let (total, ranked) =
            rank_popular_answers(vec![tally(a, "optionA", 1), tally(b, "optionB", 1)]);

        assert_eq!(total, 2);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|p| p.count == 1));
        assert!(ranked.iter().all(|p| p.percentage == 50.0));
    }

    #[test]
    fn empty_tallies_produce_empty_ranking() {
        let (total, ranked) = rank_popular_answers(vec![]);
        assert_eq!(total, 0);
        assert!(ranked.is_empty());
    }

    #[test]
    fn average_of_no_durations_is_none() {
        assert_eq!(average_completion_secs(&[]), None);
    }

    #[test]
    fn average_is_the_mean() {
        assert_eq!(average_completion_secs(&[30.0, 90.0]), Some(60.0));
    }
}
