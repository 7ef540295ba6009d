//! Application state.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::commands::quiz::QuizController;

/// State shared between the command handlers and background loads.
///
/// The quiz lock is never held across an `.await`.
#[derive(Default)]
pub struct AppState {
    quiz: Mutex<QuizController>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiz(&self) -> MutexGuard<'_, QuizController> {
        self.quiz.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
