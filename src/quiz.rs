//! Quiz for the apparatus on screen
//!
//! Each question takes one answer per visit. Scoring goes through
//! `Progress`, which only pays out once per question.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use crate::content::Question;
use crate::error::SimError;
use crate::progress::{Progress, QuestionKey};
use crate::settings::Settings;
use crate::sim::Apparatus;

/// A question as shown, with its options in presentation order
#[derive(Debug, Clone)]
pub struct PresentedQuestion {
    source: &'static Question,
    /// order[shown index] = index in the source question
    order: Vec<usize>,
    /// Shown index of the chosen option
    chosen: Option<usize>,
}

impl PresentedQuestion {
    fn new(source: &'static Question, order: Vec<usize>) -> Self {
        Self {
            source,
            order,
            chosen: None,
        }
    }

    pub fn prompt(&self) -> &'static str {
        self.source.prompt
    }

    /// Option labels in presentation order
    pub fn options(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().map(|&i| self.source.options[i])
    }

    pub fn option_count(&self) -> usize {
        self.order.len()
    }

    /// Shown index of the right answer
    pub fn correct_option(&self) -> usize {
        self.order
            .iter()
            .position(|&i| i == self.source.correct)
            .unwrap_or(self.source.correct)
    }

    pub fn chosen(&self) -> Option<usize> {
        self.chosen
    }
}

/// Result of a first answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    /// Shown index of the right answer, to highlight it
    pub correct_option: usize,
    pub feedback: &'static str,
    pub points_awarded: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Answered(AnswerFeedback),
    /// The question was already answered during this visit
    AlreadyAnswered,
}

/// Questions of one apparatus for one visit to its page
#[derive(Debug, Clone)]
pub struct QuizSession {
    apparatus: Apparatus,
    questions: Vec<PresentedQuestion>,
}

impl QuizSession {
    /// Options in their authored order
    pub fn new(apparatus: Apparatus) -> Self {
        let questions = apparatus
            .info()
            .questions
            .iter()
            .map(|q| PresentedQuestion::new(q, (0..q.options.len()).collect()))
            .collect();
        Self {
            apparatus,
            questions,
        }
    }

    /// Options in an order fixed by `seed`
    pub fn shuffled(apparatus: Apparatus, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed ^ apparatus as u64);
        let mut session = Self::new(apparatus);
        for question in &mut session.questions {
            question.order.shuffle(&mut rng);
        }
        session
    }

    /// Build the session the settings ask for
    pub fn from_settings(apparatus: Apparatus, settings: &Settings, session_seed: u64) -> Self {
        if !settings.shuffle_answers {
            return Self::new(apparatus);
        }
        let seed = if settings.answer_seed != 0 {
            settings.answer_seed
        } else {
            session_seed
        };
        Self::shuffled(apparatus, seed)
    }

    pub fn apparatus(&self) -> Apparatus {
        self.apparatus
    }

    pub fn questions(&self) -> &[PresentedQuestion] {
        &self.questions
    }

    /// Answer question `question` with shown option `option`
    pub fn answer(
        &mut self,
        question: usize,
        option: usize,
        progress: &mut Progress,
    ) -> Result<AnswerOutcome, SimError> {
        let count = self.questions.len();
        let presented = self
            .questions
            .get_mut(question)
            .ok_or(SimError::QuestionOutOfRange {
                index: question,
                count,
            })?;
        if option >= presented.option_count() {
            return Err(SimError::OptionOutOfRange {
                index: option,
                count: presented.option_count(),
            });
        }
        if presented.chosen.is_some() {
            return Ok(AnswerOutcome::AlreadyAnswered);
        }
        presented.chosen = Some(option);

        let correct = presented.order[option] == presented.source.correct;
        let points_awarded =
            progress.record_answer(QuestionKey::new(self.apparatus, question), correct);
        log::info!(
            "{} Q{}: {} (+{})",
            self.apparatus,
            question + 1,
            if correct { "correct" } else { "wrong" },
            points_awarded
        );

        Ok(AnswerOutcome::Answered(AnswerFeedback {
            correct,
            correct_option: presented.correct_option(),
            feedback: presented.source.feedback,
            points_awarded,
        }))
    }
}
