//! Core vocabulary library shared by the client application.
//!
//! Provides:
//! - Free-text parser for bulk word/meaning entry
//! - Quiz session state machine with scoring
//! - Answer matching for quiz rounds (trimmed, case-insensitive)
//! - Entry validation rules applied before writes to the store
//! - Shared types (VocabularyRecord, ParsedEntry, RecordId, etc.)

pub mod error;
pub mod matching;
pub mod parser;
pub mod quiz;
pub mod types;
pub mod validation;

pub use error::{QuizError, RecordError, ValidationError};
pub use matching::{compare_answers, normalize_answer, MatchResult};
pub use parser::{parse, parse_report, ParseReport, SkipReason, SkippedLine};
pub use quiz::{AnswerOutcome, AnsweredQuestion, QuizResult, QuizSession, QuizState, QuizStatistics};
pub use types::{Difficulty, ParsedEntry, RecordId, VocabularyRecord};
pub use validation::{validate_batch, validate_entry, validate_record};
