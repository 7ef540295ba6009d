//! Quiz session state machine.
//!
//! ```text
//! NotStarted --start--> InProgress --last answer--> Completed
//!      ^                     |                          |
//!      +-------restart-------+----------restart---------+
//! ```
//!
//! A session owns its snapshot of records for its whole lifetime, so later
//! changes to the store never leak into a running quiz.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt;

use crate::error::QuizError;
use crate::matching::compare_answers;
use crate::types::{Difficulty, VocabularyRecord};

/// Lifecycle state of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizState {
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for QuizState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        })
    }
}

/// Final score of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
}

impl QuizResult {
    /// Score as a percentage of the total (0 for an empty quiz).
    pub fn percentage(&self) -> f64 {
        percentage(self.score, self.total)
    }
}

/// Outcome of a single submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    /// The stored meaning, for feedback.
    pub expected: String,
    /// Whether this answer finished the quiz.
    pub completed: bool,
}

/// One entry of the answer history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnsweredQuestion {
    pub word: String,
    pub expected: String,
    pub answer: String,
    pub is_correct: bool,
}

/// Summary statistics for a session, available in any state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizStatistics {
    pub total_questions: usize,
    pub questions_answered: usize,
    pub correct_answers: usize,
    pub incorrect_answers: usize,
    pub score_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Whole seconds since `start`; `None` before the session has started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<i64>,
}

/// A finite sequence of question/answer rounds over a snapshot of records.
#[derive(Debug, Clone)]
pub struct QuizSession {
    snapshot: Vec<VocabularyRecord>,
    index: usize,
    score: usize,
    state: QuizState,
    history: Vec<AnsweredQuestion>,
    started_at: Option<DateTime<Utc>>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    /// Create a session in the `NotStarted` state.
    pub fn new() -> Self {
        Self {
            snapshot: Vec::new(),
            index: 0,
            score: 0,
            state: QuizState::NotStarted,
            history: Vec::new(),
            started_at: None,
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    /// 0-based position of the current question.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Number of questions in the captured snapshot.
    pub fn total(&self) -> usize {
        self.snapshot.len()
    }

    pub fn snapshot(&self) -> &[VocabularyRecord] {
        &self.snapshot
    }

    pub fn history(&self) -> &[AnsweredQuestion] {
        &self.history
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Time since `start`, measured against `now`.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.started_at.map(|started| now - started)
    }

    /// Capture `snapshot` and begin the first round.
    ///
    /// An empty snapshot completes immediately with a result of 0/0.
    pub fn start(&mut self, snapshot: Vec<VocabularyRecord>) -> Result<(), QuizError> {
        self.require(QuizState::NotStarted, "start")?;

        self.snapshot = snapshot;
        self.index = 0;
        self.score = 0;
        self.history.clear();
        self.started_at = Some(Utc::now());
        self.state = if self.snapshot.is_empty() {
            QuizState::Completed
        } else {
            QuizState::InProgress
        };
        Ok(())
    }

    /// The word to prompt for. Repeated calls return the same word until an answer is submitted.
    pub fn current_question(&self) -> Result<&str, QuizError> {
        self.current_record().map(VocabularyRecord::word)
    }

    pub fn current_record(&self) -> Result<&VocabularyRecord, QuizError> {
        self.require(QuizState::InProgress, "read the current question")?;
        Ok(&self.snapshot[self.index])
    }

    /// Score `answer` against the current record and move to the next round.
    pub fn submit_answer(&mut self, answer: &str) -> Result<AnswerOutcome, QuizError> {
        self.require(QuizState::InProgress, "submit an answer")?;

        let record = &self.snapshot[self.index];
        let matched = compare_answers(answer, record.meaning());
        if matched.is_correct {
            self.score += 1;
        }

        self.history.push(AnsweredQuestion {
            word: record.word().to_string(),
            expected: record.meaning().to_string(),
            answer: answer.to_string(),
            is_correct: matched.is_correct,
        });
        let expected = record.meaning().to_string();

        if self.index + 1 == self.snapshot.len() {
            self.state = QuizState::Completed;
        } else {
            self.index += 1;
        }

        Ok(AnswerOutcome {
            is_correct: matched.is_correct,
            expected,
            completed: self.state == QuizState::Completed,
        })
    }

    /// Final score. Only available once the session is `Completed`.
    pub fn result(&self) -> Result<QuizResult, QuizError> {
        self.require(QuizState::Completed, "read the result")?;
        Ok(QuizResult {
            score: self.score,
            total: self.snapshot.len(),
        })
    }

    /// Return to `NotStarted`, releasing the snapshot.
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    /// Summary of the session so far, with elapsed time measured against `now`.
    pub fn statistics(&self, now: DateTime<Utc>) -> QuizStatistics {
        let questions_answered = self.history.len();
        let correct_answers = self.history.iter().filter(|a| a.is_correct).count();

        QuizStatistics {
            total_questions: self.snapshot.len(),
            questions_answered,
            correct_answers,
            incorrect_answers: questions_answered - correct_answers,
            score_percentage: percentage(self.score, self.snapshot.len()),
            difficulty: self.difficulty(),
            elapsed_seconds: self.elapsed(now).map(|d| d.num_seconds()),
        }
    }

    /// Overall difficulty: hard or easy when more than half the records say so,
    /// medium otherwise. Records without a known difficulty count as medium.
    pub fn difficulty(&self) -> Option<Difficulty> {
        if self.snapshot.is_empty() {
            return None;
        }

        let levels: Vec<Difficulty> = self
            .snapshot
            .iter()
            .map(|r| {
                r.difficulty
                    .as_deref()
                    .and_then(Difficulty::from_str)
                    .unwrap_or_default()
            })
            .collect();
        let half = levels.len() / 2;
        let hard = levels.iter().filter(|d| **d == Difficulty::Hard).count();
        let easy = levels.iter().filter(|d| **d == Difficulty::Easy).count();

        Some(if hard > half {
            Difficulty::Hard
        } else if easy > half {
            Difficulty::Easy
        } else {
            Difficulty::Medium
        })
    }

    fn require(&self, expected: QuizState, operation: &'static str) -> Result<(), QuizError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(QuizError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}

fn percentage(score: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        score as f64 / total as f64 * 100.0
    }
}
