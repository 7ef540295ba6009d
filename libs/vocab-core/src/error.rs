//! Error types for vocab-core.

use thiserror::Error;

use crate::quiz::QuizState;

/// Errors raised when a quiz session operation is used outside its permitted state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("cannot {operation} while quiz is {state}")]
    InvalidState {
        operation: &'static str,
        state: QuizState,
    },
}

/// A vocabulary record failed its construction invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("word must not be empty")]
    EmptyWord,

    #[error("meaning must not be empty")]
    EmptyMeaning,
}

/// Entry rejected by the validation rules applied before a store write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("word cannot be empty")]
    EmptyWord,

    #[error("meaning cannot be empty")]
    EmptyMeaning,

    #[error("word too long ({len} characters, max {max})")]
    WordTooLong { len: usize, max: usize },

    #[error("meaning too long ({len} characters, max {max})")]
    MeaningTooLong { len: usize, max: usize },

    #[error("word cannot contain newlines or tabs")]
    WordControlCharacter,

    #[error("invalid difficulty {0:?}, must be one of: easy, medium, hard")]
    InvalidDifficulty(String),

    #[error("invalid category {value:?}, must be one of: {allowed}")]
    InvalidCategory { value: String, allowed: String },
}
