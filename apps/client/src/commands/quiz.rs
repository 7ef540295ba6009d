//! Quiz workflow: fetch a snapshot, then drive a session over it.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};
use vocab_core::{QuizSession, VocabularyRecord};

use super::CommandError;
use crate::state::AppState;
use crate::store::VocabularyStore;

/// How to build the question list from the fetched vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizOptions {
    pub shuffle: bool,
    /// Keep at most this many questions (after shuffling).
    pub limit: Option<usize>,
}

/// Proof that a snapshot fetch was requested for the current quiz view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Owns the quiz session shown to the user.
///
/// Each load gets a ticket; leaving the quiz invalidates outstanding tickets,
/// so a fetch that finishes afterwards is dropped instead of starting a
/// session nobody is looking at.
#[derive(Debug, Default)]
pub struct QuizController {
    session: QuizSession,
    generation: u64,
}

impl QuizController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    /// Reset the view and hand out a ticket for a new snapshot fetch.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.session.restart();
        LoadTicket(self.generation)
    }

    /// Start the session with `snapshot` if `ticket` is still current.
    ///
    /// Returns `Ok(false)` when the load was superseded or abandoned.
    pub fn finish_load<R: Rng + ?Sized>(
        &mut self,
        ticket: LoadTicket,
        mut snapshot: Vec<VocabularyRecord>,
        options: QuizOptions,
        rng: &mut R,
    ) -> Result<bool, CommandError> {
        if ticket.0 != self.generation {
            warn!(ticket = ticket.0, current = self.generation, "discarding stale quiz snapshot");
            return Ok(false);
        }

        if options.shuffle {
            snapshot.shuffle(rng);
        }
        if let Some(limit) = options.limit {
            snapshot.truncate(limit);
        }

        self.session.start(snapshot)?;
        info!(total = self.session.total(), "quiz started");
        Ok(true)
    }

    /// Leave the quiz view: drop the session and any in-flight load.
    pub fn leave(&mut self) {
        self.generation += 1;
        self.session.restart();
    }
}

/// Fetch the full vocabulary and start a quiz over it.
///
/// The session only starts after `list_all` has completed; a store failure
/// leaves the session untouched in `NotStarted`.
pub async fn load_quiz(
    state: &AppState,
    store: &dyn VocabularyStore,
    options: QuizOptions,
) -> Result<bool, CommandError> {
    let ticket = state.quiz().begin_load();
    fetch_quiz(state, store, ticket, options).await
}

/// Fetch the snapshot for a load already begun with
/// [`QuizController::begin_load`] and start the session if `ticket` is still
/// current.
pub async fn fetch_quiz(
    state: &AppState,
    store: &dyn VocabularyStore,
    ticket: LoadTicket,
    options: QuizOptions,
) -> Result<bool, CommandError> {
    let snapshot = store.list_all().await?;
    let started = state
        .quiz()
        .finish_load(ticket, snapshot, options, &mut rand::thread_rng())?;
    Ok(started)
}
