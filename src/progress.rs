//! Quiz progress and score
//!
//! Persisted to LocalStorage, read once at startup and written after every
//! scoring event.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::sim::Apparatus;

/// Points for each question answered correctly
pub const POINTS_PER_ANSWER: u32 = 10;

/// Identifies one quiz question
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionKey {
    pub apparatus: Apparatus,
    /// Index into the apparatus's question list
    pub question: usize,
}

impl QuestionKey {
    pub fn new(apparatus: Apparatus, question: usize) -> Self {
        Self {
            apparatus,
            question,
        }
    }
}

/// Cumulative score and completed apparatuses.
///
/// A question scores once: `score` is `POINTS_PER_ANSWER` times the number
/// of questions in `answered`, plus any bare score carried over from storage
/// written before answers were tracked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub score: u32,
    /// Apparatuses with at least one correct answer
    pub completed: BTreeSet<Apparatus>,
    /// Questions answered correctly
    pub answered: BTreeSet<QuestionKey>,
}

impl Progress {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "playground_score";

    /// Create empty progress
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer. Returns the points awarded (0 for wrong answers and
    /// for questions that already scored).
    pub fn record_answer(&mut self, key: QuestionKey, correct: bool) -> u32 {
        if !correct || !self.answered.insert(key) {
            return 0;
        }
        self.score = self.score.saturating_add(POINTS_PER_ANSWER);
        self.completed.insert(key.apparatus);
        POINTS_PER_ANSWER
    }

    /// Whether `key` has already been answered correctly
    pub fn has_scored(&self, key: QuestionKey) -> bool {
        self.answered.contains(&key)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// "Completed: n/5"
    pub fn completed_text(&self) -> String {
        format!(
            "Completed: {}/{}",
            self.completed_count(),
            Apparatus::ALL.len()
        )
    }

    /// "Score: s"
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// Parse stored progress. Older builds stored the bare score.
    pub fn from_storage_str(s: &str) -> Option<Self> {
        if let Ok(progress) = serde_json::from_str::<Progress>(s) {
            return Some(progress);
        }
        let score = s.trim().parse::<u32>().ok()?;
        Some(Self {
            score,
            ..Self::default()
        })
    }

    /// Load progress from LocalStorage (empty on native or when absent)
    pub fn load() -> Self {
        let loaded = persistence::load_string(Self::STORAGE_KEY)
            .and_then(|stored| Self::from_storage_str(&stored));
        match loaded {
            Some(progress) => {
                log::info!(
                    "Loaded progress: score {}, {} completed",
                    progress.score,
                    progress.completed_count()
                );
                progress
            }
            None => {
                log::info!("No progress found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save progress to LocalStorage
    pub fn save(&self) {
        if persistence::store_json(Self::STORAGE_KEY, self) {
            log::info!("Progress saved (score {})", self.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_answer_scores_once() {
        let mut progress = Progress::new();
        let key = QuestionKey::new(Apparatus::Swing, 1);

        assert_eq!(progress.record_answer(key, true), 10);
        assert_eq!(progress.record_answer(key, true), 0);
        assert_eq!(progress.score, 10);
        assert!(progress.has_scored(key));
        assert_eq!(progress.completed_count(), 1);
    }

    #[test]
    fn test_wrong_answer_scores_nothing() {
        let mut progress = Progress::new();
        let key = QuestionKey::new(Apparatus::Slide, 0);
        assert_eq!(progress.record_answer(key, false), 0);
        assert_eq!(progress.score, 0);
        assert!(progress.completed.is_empty());

        // A later correct answer still counts
        assert_eq!(progress.record_answer(key, true), 10);
    }

    #[test]
    fn test_score_matches_answered() {
        let mut progress = Progress::new();
        for apparatus in Apparatus::ALL {
            for question in 0..apparatus.info().questions.len() {
                let key = QuestionKey::new(apparatus, question);
                progress.record_answer(key, true);
                progress.record_answer(key, true);
            }
        }
        assert_eq!(
            progress.score,
            POINTS_PER_ANSWER * progress.answered.len() as u32
        );
        assert_eq!(progress.completed_text(), "Completed: 5/5");
        assert_eq!(progress.score_text(), "Score: 60");
    }

    #[test]
    fn test_storage_round_trip_and_legacy_score() {
        let mut progress = Progress::new();
        progress.record_answer(QuestionKey::new(Apparatus::Seesaw, 0), true);
        let json = serde_json::to_string(&progress).unwrap();
        assert_eq!(Progress::from_storage_str(&json), Some(progress));

        let legacy = Progress::from_storage_str("40").unwrap();
        assert_eq!(legacy.score, 40);
        assert!(legacy.answered.is_empty());

        assert_eq!(Progress::from_storage_str("not a score"), None);
    }

    #[test]
    fn test_score_saturates_at_max() {
        let mut progress = Progress::from_storage_str("4294967295").unwrap();
        let key = QuestionKey::new(Apparatus::Swing, 0);
        assert_eq!(progress.record_answer(key, true), POINTS_PER_ANSWER);
        assert_eq!(progress.score, u32::MAX);
        assert!(progress.has_scored(key));
    }
}
