//! Entry and quiz workflows exposed to the command line.

pub mod entry;
pub mod quiz;

use vocab_core::{QuizError, ValidationError};

use crate::store::StoreError;

pub use entry::{add_entries, delete_entry, edit_entry, list_entries, EditOutcome, EntryOutcome};
pub use quiz::{fetch_quiz, load_quiz, LoadTicket, QuizController, QuizOptions};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Every input line was dropped by the parser.
    #[error("no valid entries found")]
    NoValidEntries,

    #[error("invalid entry: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Quiz(#[from] QuizError),
}
