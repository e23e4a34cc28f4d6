use thiserror::Error;

/// Errors raised by the simulation and its collaborators.
///
/// Invalid control values are never errors: they are clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("Unknown apparatus: {0:?}")]
    UnknownApparatus(String),

    #[error("No apparatus selected")]
    NoApparatus,

    #[error("Question {index} out of range ({count} questions)")]
    QuestionOutOfRange { index: usize, count: usize },

    #[error("Option {index} out of range ({count} options)")]
    OptionOutOfRange { index: usize, count: usize },
}
